use async_trait::async_trait;

use crate::domain::CompanyName;

use super::LlmClientError;

/// Produces the text report for one company. The worker treats an
/// implementation as an opaque, possibly slow, possibly failing step.
#[async_trait]
pub trait AnalysisEngine: Send + Sync {
    async fn analyze(&self, company: &CompanyName) -> Result<String, AnalysisEngineError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisEngineError {
    #[error("llm: {0}")]
    Llm(#[from] LlmClientError),
    #[error("task `{0}` produced no output")]
    EmptyOutput(String),
    #[error("engine unavailable: {0}")]
    Unavailable(String),
}
