use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::oneshot;

use care_schedule::application::dto::{
    CreatedDto, DayScheduleDto, TaskCreate, TaskDto, TaskInstanceUpdate, TaskMetaDto,
};
use care_schedule::domain::models::{Person, Unit};
use care_schedule::error::ScheduleError;
use care_schedule::infrastructure::api_client::ScheduleApi;

/// In-memory backend. Failure flags and held responses are read when a
/// request resolves, not when it starts.
#[derive(Default)]
pub struct FakeScheduleApi {
    days: RefCell<HashMap<(String, NaiveDate), Vec<TaskDto>>>,
    held: RefCell<HashMap<String, oneshot::Receiver<()>>>,
    pub staff: RefCell<Vec<Person>>,
    pub units: RefCell<Vec<Unit>>,

    failing_days: RefCell<HashMap<String, bool>>,
    pub fail_updates: Cell<bool>,
    pub fail_create: Cell<bool>,
    pub omit_created_id: Cell<bool>,
    pub fail_delete: Cell<bool>,

    pub day_requests: RefCell<Vec<(String, NaiveDate)>>,
    pub updates: RefCell<Vec<(String, TaskInstanceUpdate)>>,
    pub created: RefCell<Vec<TaskCreate>>,
    pub deleted: RefCell<Vec<String>>,
    next_id: Cell<u32>,
}

impl FakeScheduleApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_day(&self, unit_id: &str, date: NaiveDate, tasks: Vec<TaskDto>) {
        self.days.borrow_mut().insert((unit_id.to_string(), date), tasks);
    }

    pub fn fail_day(&self, unit_id: &str, fail: bool) {
        self.failing_days.borrow_mut().insert(unit_id.to_string(), fail);
    }

    /// Parks the next day request for `unit_id` until the returned sender fires
    pub fn hold_day(&self, unit_id: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.held.borrow_mut().insert(unit_id.to_string(), rx);
        tx
    }

    fn server_error(path: &str) -> ScheduleError {
        ScheduleError::Api {
            status: 500,
            path: path.to_string(),
        }
    }
}

#[async_trait(?Send)]
impl ScheduleApi for FakeScheduleApi {
    async fn fetch_day_schedule(&self, unit_id: &str, date: NaiveDate) -> Result<DayScheduleDto, ScheduleError> {
        self.day_requests.borrow_mut().push((unit_id.to_string(), date));

        let gate = self.held.borrow_mut().remove(unit_id);
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        if self.failing_days.borrow().get(unit_id).copied().unwrap_or(false) {
            return Err(Self::server_error("/schedule/day"));
        }

        let tasks = self
            .days
            .borrow()
            .get(&(unit_id.to_string(), date))
            .cloned()
            .unwrap_or_default();

        Ok(DayScheduleDto { date: Some(date), tasks })
    }

    async fn update_task_status(&self, task_id: &str, update: &TaskInstanceUpdate) -> Result<(), ScheduleError> {
        self.updates.borrow_mut().push((task_id.to_string(), update.clone()));
        if self.fail_updates.get() {
            return Err(Self::server_error("/task-instances"));
        }
        Ok(())
    }

    async fn create_task(&self, task: &TaskCreate) -> Result<CreatedDto, ScheduleError> {
        if self.fail_create.get() {
            return Err(Self::server_error("/tasks"));
        }
        self.created.borrow_mut().push(task.clone());

        if self.omit_created_id.get() {
            return Ok(CreatedDto { id: None });
        }
        let next = self.next_id.get() + 1;
        self.next_id.set(next);
        Ok(CreatedDto {
            id: Some(format!("new-{next}")),
        })
    }

    async fn delete_task(&self, task_id: &str) -> Result<(), ScheduleError> {
        if self.fail_delete.get() {
            return Err(Self::server_error("/tasks"));
        }
        self.deleted.borrow_mut().push(task_id.to_string());
        Ok(())
    }

    async fn fetch_staff(&self) -> Result<Vec<Person>, ScheduleError> {
        Ok(self.staff.borrow().clone())
    }

    async fn fetch_units(&self) -> Result<Vec<Unit>, ScheduleError> {
        Ok(self.units.borrow().clone())
    }
}

/// Backend task row with both times set
pub fn task_dto(id: &str, role: Option<&str>, start: &str, end: &str, status: Option<&str>) -> TaskDto {
    TaskDto {
        id: id.to_string(),
        title: format!("Task {id}"),
        category: Some("Care".to_string()),
        status: status.map(String::from),
        role_type: role.map(String::from),
        meta: Some(TaskMetaDto {
            time_start: Some(start.to_string()),
            time_end: Some(end.to_string()),
            ..TaskMetaDto::default()
        }),
        ..TaskDto::default()
    }
}
