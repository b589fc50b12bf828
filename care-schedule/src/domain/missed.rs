use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::application::time::ClockTime;
use crate::domain::models::{Person, Task, TaskStatus};
use crate::domain::shift_assign::shift_for_person;
use crate::domain::shift_role::Language;

/// One task instance nobody finished in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissedTask {
    pub task_id: String,
    pub title: String,
    pub staff_name: String,
    pub time: Option<ClockTime>,
    pub date: NaiveDate,
}

/// Earlier days are always overdue. Today is overdue once the end time has
/// passed; a task without an end time never is.
pub fn is_overdue(task: &Task, date: NaiveDate, now: NaiveDateTime) -> bool {
    let today = now.date();
    if date < today {
        return true;
    }
    if date > today {
        return false;
    }

    task.time_end.is_some_and(|end| now > date.and_time(end.to_naive_time()))
}

/// Status to show for a (task, date): a stored `pending` turns `missed` once overdue
pub fn effective_status(stored: TaskStatus, task: &Task, date: NaiveDate, now: NaiveDateTime) -> TaskStatus {
    match stored {
        TaskStatus::Pending if is_overdue(task, date, now) => TaskStatus::Missed,
        other => other,
    }
}

/// Walks every working staff member on every date and collects the tasks they
/// own that are still open past their deadline.
pub fn collect_missed_tasks<F>(
    dates: &[NaiveDate],
    tasks: &[Task],
    roster: &[Person],
    status_of: F,
    now: NaiveDateTime,
) -> Vec<MissedTask>
where
    F: Fn(&str, NaiveDate) -> TaskStatus,
{
    let mut missed = Vec::new();

    for &date in dates {
        for person in roster {
            let shift = shift_for_person(&person.id, date, roster, Language::default());
            if shift.is_off() {
                continue;
            }

            for task in tasks
                .iter()
                .filter(|task| task.applies_on(date) && task.is_responsibility_of(&person.id, shift.id))
            {
                if status_of(task.id.as_str(), date).is_done() {
                    continue;
                }

                if is_overdue(task, date, now) {
                    missed.push(MissedTask {
                        task_id: task.id.clone(),
                        title: task.title.clone(),
                        staff_name: person.name.clone(),
                        time: task.time_start,
                        date,
                    });
                }
            }
        }
    }

    missed
}
