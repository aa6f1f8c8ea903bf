use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::Environment;

/// Service settings. Every field has a default, so the service starts with
/// neither a settings file nor environment overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub analysis: AnalysisSettings,
    pub llm: LlmSettings,
    pub logging: LoggingSettings,
    pub ui: UiSettings,
}

impl Settings {
    /// Layers `appsettings.<environment>.*` (optional) under `APP_*`
    /// environment variables, with `__` separating nested keys
    /// (`APP_SERVER__PORT=9000`).
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let settings: Self = Config::builder()
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Rejects values the router cannot mount.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ui.enabled {
            self.ui.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub reports_dir: String,
    pub queue_capacity: usize,
    pub max_concurrent_jobs: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            reports_dir: "reports".to_string(),
            queue_capacity: 64,
            max_concurrent_jobs: 4,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub base_url: String,
    pub api_key: String,
    pub chat_model: String,
    pub max_tokens: usize,
    pub temperature: f32,
    pub timeout_seconds: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            chat_model: "gpt-4o-mini".to_string(),
            max_tokens: 1500,
            temperature: 0.2,
            timeout_seconds: 120,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            enable_json: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub enabled: bool,
    pub path: String,
}

/// Paths owned by the API. The UI may not be mounted on or below them.
const API_PATHS: [&str; 4] = ["/health", "/analyze", "/status", "/result"];

impl UiSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let path = self.path.as_str();
        if !path.starts_with('/') {
            return Err(invalid_ui_path(path, "must start with '/'"));
        }
        if path.contains(['{', '}', '*']) {
            return Err(invalid_ui_path(path, "must not contain route parameters"));
        }
        let reserved = API_PATHS.iter().any(|api| {
            path.strip_prefix(api)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        });
        if reserved {
            return Err(invalid_ui_path(path, "collides with an API route"));
        }
        Ok(())
    }
}

fn invalid_ui_path(path: &str, reason: &str) -> ConfigError {
    ConfigError::Message(format!("invalid ui.path {:?}: {}", path, reason))
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/ui".to_string(),
        }
    }
}
