use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{CompanyName, JobStatus};

/// Client-side view of the analysis HTTP API, as driven by the poller.
#[async_trait]
pub trait AnalysisApi: Send + Sync {
    /// Triggers an analysis and returns the acknowledgement message.
    async fn submit(&self, company: &CompanyName) -> Result<String, AnalysisApiError>;

    async fn status(&self, company: &CompanyName) -> Result<StatusSnapshot, AnalysisApiError>;

    async fn result(&self, company: &CompanyName) -> Result<String, AnalysisApiError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusSnapshot {
    pub status: JobStatus,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisApiError {
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
