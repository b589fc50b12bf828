pub mod dto;
pub mod task_store;
pub mod time;
