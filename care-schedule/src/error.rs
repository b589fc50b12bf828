use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid api url: {0}")]
    InvalidUrl(String),

    #[error("api returned {status} for {path}")]
    Api { status: u16, path: String },

    #[error("invalid api payload: {0}")]
    Json(#[from] serde_json::Error),

    /// Clock times must be `HH:MM` with hour 0-23 and minute 0-59
    #[error("invalid clock time: {0:?}")]
    InvalidTime(String),

    #[error("unknown view period: {0:?}")]
    InvalidPeriod(String),

    #[error("create response did not carry a task id")]
    MissingTaskId,

    #[error("failed to read config: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
