use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime, Utc};
use tracing::{debug, info, warn};

use crate::application::dto::{TaskCreate, TaskInstanceUpdate};
use crate::domain::missed;
use crate::domain::models::{Task, TaskId, TaskStatus, TaskUpdate};
use crate::error::ScheduleError;
use crate::infrastructure::api_client::ScheduleApi;

/// Status entries are keyed by task and calendar day: a recurring task has
/// an independent status on every date.
pub type StatusKey = (TaskId, NaiveDate);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The response replaced the task list
    Applied { tasks: usize },
    /// A newer load was issued while this one was in flight
    Stale,
    /// Transport or payload error; the task list was cleared
    Failed,
}

/// In-memory tasks and per-day statuses for the unit/date currently shown.
///
/// Meant for a single-threaded event loop: methods take `&self`, several
/// loads may be in flight at once, and no borrow is held across an await.
pub struct TaskStore<A> {
    api: A,
    signer_id: String,
    tasks: RefCell<Vec<Task>>,
    statuses: RefCell<HashMap<StatusKey, TaskStatus>>,
    latest_load: Cell<u64>,
}

impl<A: ScheduleApi> TaskStore<A> {
    pub fn new(api: A, signer_id: impl Into<String>) -> Self {
        Self {
            api,
            signer_id: signer_id.into(),
            tasks: RefCell::new(Vec::new()),
            statuses: RefCell::new(HashMap::new()),
            latest_load: Cell::new(0),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn signer_id(&self) -> &str {
        &self.signer_id
    }

    /// Snapshot of the loaded tasks
    pub fn tasks(&self) -> Vec<Task> {
        self.tasks.borrow().clone()
    }

    /// Snapshot of every known status entry
    pub fn statuses(&self) -> HashMap<StatusKey, TaskStatus> {
        self.statuses.borrow().clone()
    }

    pub fn task(&self, task_id: &str) -> Option<Task> {
        self.tasks.borrow().iter().find(|task| task.id == task_id).cloned()
    }

    /// Loads one unit's day and replaces the task list.
    ///
    /// Every call takes a new generation number. When the response arrives,
    /// it is applied only if no later call has started in the meantime:
    ///
    /// ```text
    /// load(u1) gen 1 ──────────────────────────> done  (1 != 2: Stale)
    /// load(u2)        gen 2 ────> done  (2 == 2: Applied)
    /// ```
    pub async fn load_day(&self, date: NaiveDate, unit_id: &str) -> LoadOutcome {
        let generation = self.latest_load.get() + 1;
        self.latest_load.set(generation);

        let result = self.api.fetch_day_schedule(unit_id, date).await;

        if generation != self.latest_load.get() {
            debug!(unit_id, %date, generation, "discarding stale day load");
            return LoadOutcome::Stale;
        }

        match result {
            Ok(day) => {
                let mut loaded_statuses = HashMap::new();
                let tasks: Vec<Task> = day
                    .tasks
                    .into_iter()
                    .map(|dto| {
                        if let Some(status) = dto.instance_status() {
                            loaded_statuses.insert((dto.id.clone(), date), status);
                        }
                        dto.into_task(unit_id)
                    })
                    .collect();

                let count = tasks.len();
                *self.tasks.borrow_mut() = tasks;
                self.statuses.borrow_mut().extend(loaded_statuses);

                info!(unit_id, %date, tasks = count, "day schedule loaded");
                LoadOutcome::Applied { tasks: count }
            }
            Err(e) => {
                warn!(unit_id, %date, "failed to load day schedule: {}", e);
                self.tasks.borrow_mut().clear();
                LoadOutcome::Failed
            }
        }
    }

    /// Cached status, `pending` when nothing is known
    pub fn status(&self, task_id: &str, date: NaiveDate) -> TaskStatus {
        self.statuses
            .borrow()
            .get(&(task_id.to_string(), date))
            .copied()
            .unwrap_or_default()
    }

    /// Cached status with overdue pending tasks shown as `missed`
    pub fn effective_status(&self, task: &Task, date: NaiveDate, now: NaiveDateTime) -> TaskStatus {
        missed::effective_status(self.status(&task.id, date), task, date, now)
    }

    /// Applies the change locally first, then reports it to the backend.
    ///
    /// A failed request is logged and the local change is kept; the two can
    /// diverge until the next load.
    pub async fn update_status(&self, task_id: &str, update: TaskUpdate, date: NaiveDate) {
        // 1. optimistic local state
        self.statuses
            .borrow_mut()
            .insert((task_id.to_string(), date), update.status);

        if let Some(report) = &update.report_data {
            if let Some(task) = self.tasks.borrow_mut().iter_mut().find(|task| task.id == task_id) {
                task.report_data = Some(report.clone());
            }
        }

        // 2. backend
        let request = TaskInstanceUpdate {
            date,
            status: update.status,
            signed_by: self.signer_id.clone(),
            signed_at: Utc::now().to_rfc3339(),
            report_data: update.report_data,
        };

        if let Err(e) = self.api.update_task_status(task_id, &request).await {
            warn!(task_id, %date, status = request.status.as_str(), "failed to update task: {}", e);
        }
    }

    /// Creates the task on the backend and appends it under the id the
    /// backend assigned. Nothing changes locally on failure.
    pub async fn add_task(&self, task: Task) -> Result<TaskId, ScheduleError> {
        let created = self
            .api
            .create_task(&TaskCreate::from(&task))
            .await
            .inspect_err(|e| warn!(title = %task.title, "failed to create task: {}", e))?;

        let id = created.id.ok_or(ScheduleError::MissingTaskId)?;
        self.tasks.borrow_mut().push(Task { id: id.clone(), ..task });

        Ok(id)
    }

    /// Deletes on the backend, then drops the task locally
    pub async fn delete_task(&self, task_id: &str) -> Result<(), ScheduleError> {
        self.api
            .delete_task(task_id)
            .await
            .inspect_err(|e| warn!(task_id, "failed to delete task: {}", e))?;

        self.tasks.borrow_mut().retain(|task| task.id != task_id);
        Ok(())
    }
}
