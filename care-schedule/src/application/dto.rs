use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::application::time::ClockTime;
use crate::domain::models::{ReportData, Task, TaskCategory, TaskStatus};
use crate::domain::shift_role::ShiftRole;

// =====================
// GET /schedule/day
// =====================

/// Day schedule as the backend sends it: task templates joined with the
/// instance status for that date
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayScheduleDto {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub tasks: Vec<TaskDto>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDto {
    pub id: String,
    #[serde(default)]
    pub unit_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub substitute_instructions: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub role_type: Option<String>,
    #[serde(default)]
    pub valid_on_date: Option<NaiveDate>,
    #[serde(default)]
    pub meta: Option<TaskMetaDto>,
    #[serde(default)]
    pub assignee_id: Option<String>,
    #[serde(default)]
    pub report_data: Option<ReportData>,
}

/// Free-form template metadata; only the scheduling keys are typed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskMetaDto {
    #[serde(default)]
    pub time_start: Option<String>,
    #[serde(default)]
    pub time_end: Option<String>,
    #[serde(default)]
    pub requires_sign: Option<bool>,
    #[serde(default)]
    pub assignee_id: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Unparseable times are dropped so the task behaves like an untimed one
fn lenient_time(task_id: &str, field: &str, text: Option<&str>) -> Option<ClockTime> {
    let text = text?;
    match ClockTime::parse(text) {
        Ok(time) => Some(time),
        Err(e) => {
            warn!(task_id, field, "dropping task time: {}", e);
            None
        }
    }
}

impl TaskDto {
    /// Status the backend reported for the requested date, if any
    pub fn instance_status(&self) -> Option<TaskStatus> {
        self.status.as_deref().and_then(TaskStatus::from_api)
    }

    /// Converts to the domain task. `unit_id` is the unit the day was loaded
    /// for and wins over whatever the payload says.
    pub fn into_task(self, unit_id: &str) -> Task {
        let status = self.instance_status().unwrap_or_default();
        let meta = self.meta.unwrap_or_default();

        let time_start = lenient_time(&self.id, "timeStart", meta.time_start.as_deref());
        let time_end = lenient_time(&self.id, "timeEnd", meta.time_end.as_deref());

        let shift_role = self.role_type.as_deref().and_then(|text| match text.parse::<ShiftRole>() {
            Ok(role) => Some(role),
            Err(e) => {
                warn!(task_id = %self.id, "ignoring role type: {}", e);
                None
            }
        });

        Task {
            unit_id: unit_id.to_string(),
            title: self.title,
            description: self.description,
            substitute_instructions: self.substitute_instructions,
            category: self.category.as_deref().and_then(TaskCategory::from_api),
            time_start,
            time_end,
            shift_role,
            assignee_id: self.assignee_id.or(meta.assignee_id),
            requires_sign: meta.requires_sign.unwrap_or(false),
            status,
            date: self.valid_on_date,
            report_data: self.report_data,
            id: self.id,
        }
    }
}

// =====================
// PATCH /task-instances/{id}
// =====================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskInstanceUpdate {
    pub date: NaiveDate,
    pub status: TaskStatus,
    pub signed_by: String,
    /// RFC 3339
    pub signed_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_data: Option<ReportData>,
}

// =====================
// POST /tasks
// =====================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskCreate {
    pub unit_id: String,
    pub title: String,
    pub description: Option<String>,
    pub substitute_instructions: Option<String>,
    pub category: Option<TaskCategory>,
    pub role_type: ShiftRole,
    pub is_shared: bool,
    pub valid_on_date: Option<NaiveDate>,
    pub meta_data: TaskCreateMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreateMeta {
    pub time_start: Option<ClockTime>,
    pub time_end: Option<ClockTime>,
    pub requires_sign: bool,
    pub assignee_id: Option<String>,
}

impl From<&Task> for TaskCreate {
    fn from(task: &Task) -> Self {
        Self {
            unit_id: task.unit_id.clone(),
            title: task.title.clone(),
            description: task.description.clone(),
            substitute_instructions: task.substitute_instructions.clone(),
            category: task.category,
            // the backend requires a role on every template
            role_type: task.shift_role.unwrap_or(ShiftRole::AdminDay),
            is_shared: false,
            valid_on_date: task.date,
            meta_data: TaskCreateMeta {
                time_start: task.time_start,
                time_end: task.time_end,
                requires_sign: task.requires_sign,
                assignee_id: task.assignee_id.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CreatedDto {
    #[serde(default)]
    pub id: Option<String>,
}
