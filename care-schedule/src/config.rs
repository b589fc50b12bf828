use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::layout::LayoutConfig;
use crate::domain::shift_role::Language;
use crate::error::ScheduleError;

/// Runtime settings. Every key is optional in the TOML file.
///
/// ```toml
/// api_url = "http://localhost:8000"
/// signer_id = "s1"
/// language = "sv"
/// request_timeout_secs = 10
///
/// [layout]
/// staff_column_width = 220
/// min_hour_width = 120
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub api_url: String,
    /// Sent as a bearer token when set
    pub api_token: Option<String>,
    /// Recorded as `signed_by` on status updates
    pub signer_id: String,
    pub language: Language,
    pub request_timeout_secs: u64,
    pub layout: LayoutConfig,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            api_token: None,
            signer_id: "s1".to_string(),
            language: Language::Sv,
            request_timeout_secs: 10,
            layout: LayoutConfig::default(),
        }
    }
}

impl ScheduleConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ScheduleError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScheduleError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod config_tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ScheduleConfig::from_toml_str("").unwrap();
        assert_eq!(config, ScheduleConfig::default());
        assert_eq!(config.layout.staff_column_width, 220.0);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
api_url = "https://schema.example.org/api"
language = "ar"

[layout]
min_hour_width = 90.0
"#
        )
        .unwrap();

        let config = ScheduleConfig::load(file.path()).unwrap();
        assert_eq!(config.api_url, "https://schema.example.org/api");
        assert_eq!(config.language, Language::Ar);
        assert_eq!(config.signer_id, "s1");
        assert_eq!(config.layout.min_hour_width, 90.0);
        assert_eq!(config.layout.staff_column_width, 220.0);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = ScheduleConfig::load(dir.path().join("absent.toml"));
        assert!(matches!(missing, Err(ScheduleError::ConfigIo(_))));

        let bad = ScheduleConfig::from_toml_str("request_timeout_secs = \"soon\"");
        assert!(matches!(bad, Err(ScheduleError::ConfigParse(_))));
    }
}
