mod analysis_api;
mod analysis_engine;
mod job_repository;
mod llm_client;
mod report_store;
mod repository_error;

pub use analysis_api::{AnalysisApi, AnalysisApiError, StatusSnapshot};
pub use analysis_engine::{AnalysisEngine, AnalysisEngineError};
pub use job_repository::JobRepository;
pub use llm_client::{LlmClient, LlmClientError};
pub use report_store::{ReportStore, ReportStoreError};
pub use repository_error::RepositoryError;
