use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::application::time::ClockTime;
use crate::domain::models::{Person, Task};
use crate::domain::shift_assign::shift_for_person;
use crate::domain::shift_role::{Language, ShiftWindow};

/// Why a proposed task time was rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    OffDuty,
    OutsideShift { label: String, window: String },
    Overlap { title: String, time_start: ClockTime, time_end: ClockTime },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::OffDuty => f.write_str("person is off duty on this day"),
            ValidationIssue::OutsideShift { label, window } => {
                write!(f, "Outside of shift ({label}: {window})")
            }
            ValidationIssue::Overlap { title, time_start, time_end } => {
                write!(f, "Overlaps with task: {title} ({time_start}-{time_end})")
            }
        }
    }
}

/// Advisory outcome. Callers decide whether a failure blocks the save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ValidationResult {
    Valid,
    Invalid(ValidationIssue),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn issue(&self) -> Option<&ValidationIssue> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(issue) => Some(issue),
        }
    }

    pub fn error(&self) -> Option<String> {
        self.issue().map(ToString::to_string)
    }

    /// Keeps the first failure when chaining several checks
    pub fn and(self, other: ValidationResult) -> ValidationResult {
        match self {
            ValidationResult::Valid => other,
            invalid => invalid,
        }
    }
}

/// Checks that `start..end` lies inside the person's shift on `date`.
///
/// ```text
/// day shift      07:00 ────────── 16:00         start >= 07:00 && end <= 16:00
/// night shift    21:00 ──────── 24:00 ── 07:00  start >= 21:00 (tonight's part)
///                   or yesterday was a night shift and end <= its 07:00 end
/// ```
///
/// Yesterday's night shift is only consulted when today's shift is overnight
/// too. A day-shift worker coming off a night shift is checked against today's
/// window alone.
pub fn validate_shift_compatibility(
    person_id: &str,
    date: NaiveDate,
    start: ClockTime,
    end: ClockTime,
    roster: &[Person],
    lang: Language,
) -> ValidationResult {
    let shift = shift_for_person(person_id, date, roster, lang);

    if shift.is_off() {
        return ValidationResult::Invalid(ValidationIssue::OffDuty);
    }

    let Some(window) = shift.window() else {
        // no time window, nothing to check against
        return ValidationResult::Valid;
    };

    if !window.is_overnight() {
        if start >= window.start && end <= window.end {
            return ValidationResult::Valid;
        }
    } else {
        if start >= window.start {
            return ValidationResult::Valid;
        }
        if spills_over_from_previous_night(person_id, date, end, roster, lang) {
            return ValidationResult::Valid;
        }
    }

    ValidationResult::Invalid(ValidationIssue::OutsideShift {
        label: shift.label.to_string(),
        window: shift.time.to_string(),
    })
}

/// The morning part of last night's shift also belongs to `date`
fn spills_over_from_previous_night(
    person_id: &str,
    date: NaiveDate,
    end: ClockTime,
    roster: &[Person],
    lang: Language,
) -> bool {
    let Some(yesterday) = date.pred_opt() else {
        return false;
    };

    let previous = shift_for_person(person_id, yesterday, roster, lang);
    if previous.is_off() {
        return false;
    }

    previous
        .window()
        .is_some_and(|window: ShiftWindow| window.is_overnight() && end <= window.end)
}

/// Checks `start..end` against the person's other tasks on `date`.
///
/// Candidates are tasks assigned to the person directly or to the role they
/// hold that day, anchored on `date` or recurring. Touching ranges
/// (09:00-10:00 after 08:00-09:00) do not overlap.
pub fn validate_task_overlap(
    person_id: &str,
    date: NaiveDate,
    start: ClockTime,
    end: ClockTime,
    existing_tasks: &[Task],
    exclude_task_id: Option<&str>,
    roster: &[Person],
) -> ValidationResult {
    let shift = shift_for_person(person_id, date, roster, Language::default());

    let new_start = start.minutes_from_midnight();
    let new_end = end.minutes_from_midnight();

    let conflict = existing_tasks
        .iter()
        .filter(|task| {
            (task.assignee_id.as_deref() == Some(person_id) || task.shift_role == Some(shift.id))
                && task.applies_on(date)
                && Some(task.id.as_str()) != exclude_task_id
        })
        .filter_map(|task| task.time_range().map(|range| (task, range)))
        .find(|(_, (task_start, task_end))| {
            new_start.max(task_start.minutes_from_midnight()) < new_end.min(task_end.minutes_from_midnight())
        });

    match conflict {
        Some((task, (time_start, time_end))) => ValidationResult::Invalid(ValidationIssue::Overlap {
            title: task.title.clone(),
            time_start,
            time_end,
        }),
        None => ValidationResult::Valid,
    }
}
