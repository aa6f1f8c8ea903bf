use crate::presentation::config::{Environment, LoggingSettings};

/// Configuration for tracing initialization.
pub struct TracingConfig {
    pub environment: String,
    pub level: String,
    pub json_format: bool,
}

impl TracingConfig {
    /// `LOG_FORMAT=json` forces JSON output regardless of the settings.
    pub fn from_settings(logging: &LoggingSettings, environment: Environment) -> Self {
        Self {
            environment: environment.to_string(),
            level: logging.level.clone(),
            json_format: logging.enable_json || json_requested_by_env(),
        }
    }
}

fn json_requested_by_env() -> bool {
    std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
