// =====================
// Domain model definitions
// =====================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::application::time::ClockTime;
use crate::domain::shift_role::ShiftRole;

pub type PersonId = String;
pub type UnitId = String;
pub type TaskId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonRole {
    Staff,
    Personal,
    Admin,
    UnitAdmin,
    /// Care recipient
    User,
    #[serde(other)]
    Other,
}

impl PersonRole {
    /// Only care staff take part in the daily shift rotation
    pub fn is_shift_staff(&self) -> bool {
        matches!(self, PersonRole::Staff | PersonRole::Personal)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: PersonId,
    #[serde(default)]
    pub name: String,
    pub role: PersonRole,
    // backend payloads spell it unit_id
    #[serde(default, alias = "unit_id")]
    pub unit_id: Option<UnitId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Hsl,
    Care,
    Service,
    Social,
    Admin,
}

impl TaskCategory {
    /// Backend categories arrive in mixed case
    pub fn from_api(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "hsl" => Some(TaskCategory::Hsl),
            "care" => Some(TaskCategory::Care),
            "service" => Some(TaskCategory::Service),
            "social" => Some(TaskCategory::Social),
            "admin" => Some(TaskCategory::Admin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::Hsl => "hsl",
            TaskCategory::Care => "care",
            TaskCategory::Service => "service",
            TaskCategory::Social => "social",
            TaskCategory::Admin => "admin",
        }
    }
}

/// Status of one task on one calendar day.
///
/// ```text
/// pending --complete--> completed   (requires_sign == false)
/// pending --sign------> signed      (requires_sign == true)
/// completed | signed --undo--> pending
/// pending --(end time passed)--> missed   (computed, never stored by us)
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
    Signed,
    Missed,
}

impl TaskStatus {
    pub fn from_api(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(TaskStatus::Pending),
            "completed" => Some(TaskStatus::Completed),
            "signed" => Some(TaskStatus::Signed),
            "missed" => Some(TaskStatus::Missed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "completed",
            TaskStatus::Signed => "signed",
            TaskStatus::Missed => "missed",
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Signed)
    }
}

/// Free-form report attached to a task instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    #[serde(default)]
    pub unit_id: UnitId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub substitute_instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<TaskCategory>,
    #[serde(default)]
    pub time_start: Option<ClockTime>,
    #[serde(default)]
    pub time_end: Option<ClockTime>,
    /// Ties the task to whoever holds this role on the day
    #[serde(default)]
    pub shift_role: Option<ShiftRole>,
    /// Ties the task to one person regardless of shift
    #[serde(default)]
    pub assignee_id: Option<PersonId>,
    #[serde(default)]
    pub requires_sign: bool,
    #[serde(default)]
    pub status: TaskStatus,
    /// Anchor date. `None` means the task recurs every day.
    #[serde(default, alias = "validOnDate")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_data: Option<ReportData>,
}

impl Task {
    /// Status an explicit "done" action moves this task to
    pub fn completion_status(&self) -> TaskStatus {
        if self.requires_sign {
            TaskStatus::Signed
        } else {
            TaskStatus::Completed
        }
    }

    pub fn applies_on(&self, date: NaiveDate) -> bool {
        self.date.map_or(true, |anchor| anchor == date)
    }

    /// Whether the person holding `shift` today is responsible for this task:
    /// either the task follows that role, or it has no role and names the person.
    pub fn is_responsibility_of(&self, person_id: &str, shift: ShiftRole) -> bool {
        match self.shift_role {
            Some(role) => role == shift,
            None => self.assignee_id.as_deref() == Some(person_id),
        }
    }

    pub fn time_range(&self) -> Option<(ClockTime, ClockTime)> {
        Some((self.time_start?, self.time_end?))
    }
}

/// Change requested for one (task, date) status entry
#[derive(Debug, Clone, PartialEq)]
pub struct TaskUpdate {
    pub status: TaskStatus,
    pub report_data: Option<ReportData>,
}

impl TaskUpdate {
    pub fn status(status: TaskStatus) -> Self {
        Self { status, report_data: None }
    }

    pub fn with_report(mut self, report: ReportData) -> Self {
        self.report_data = Some(report);
        self
    }
}
