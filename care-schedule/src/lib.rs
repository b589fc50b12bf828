//! Scheduling core for care units: deterministic daily shift assignment,
//! advisory validation of task times, timeline geometry, and a task/status
//! store over an injected backend client.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use application::task_store::{LoadOutcome, TaskStore};
pub use application::time::ClockTime;
pub use config::ScheduleConfig;
pub use domain::layout::{ScheduleLayout, ViewPeriod};
pub use domain::models::{Person, PersonRole, Task, TaskStatus, TaskUpdate, Unit};
pub use domain::shift_assign::{assign_shift, shift_for_person};
pub use domain::shift_role::{Language, ShiftInfo, ShiftRole};
pub use domain::validation::{validate_shift_compatibility, validate_task_overlap, ValidationResult};
pub use error::ScheduleError;
pub use infrastructure::api_client::{HttpScheduleApi, ScheduleApi};
