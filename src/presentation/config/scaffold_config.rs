use std::time::Duration;

use super::LlmSettings;

const DEFAULT_MOCK_DELAY_MS: u64 = 2000;

/// Scaffold mode replaces the LLM crew with a canned report, for running the
/// service without credentials. Read from `SCAFFOLD_MODE` and
/// `MOCK_RESPONSE_DELAY` (milliseconds).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldConfig {
    pub enabled: bool,
    pub mock_response_delay_ms: u64,
}

impl ScaffoldConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("SCAFFOLD_MODE").ok().as_deref(),
            std::env::var("MOCK_RESPONSE_DELAY").ok().as_deref(),
        )
    }

    pub fn from_values(mode: Option<&str>, delay_ms: Option<&str>) -> Self {
        Self {
            enabled: mode.is_some_and(flag_enabled),
            mock_response_delay_ms: delay_ms
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_MOCK_DELAY_MS),
        }
    }

    /// Scaffold mode is also forced when no LLM api key is configured.
    pub fn is_active(&self, llm: &LlmSettings) -> bool {
        self.enabled || llm.api_key.trim().is_empty()
    }

    pub fn mock_response_delay(&self) -> Duration {
        Duration::from_millis(self.mock_response_delay_ms)
    }
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            mock_response_delay_ms: DEFAULT_MOCK_DELAY_MS,
        }
    }
}

fn flag_enabled(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
