use crate::domain::{JobId, JobStatus};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("job {0} is still in progress")]
    JobInProgress(JobId),
    #[error("job {0} has been superseded by a newer submission")]
    StaleJob(JobId),
    #[error("invalid status transition from {from} to {to}")]
    InvalidTransition { from: JobStatus, to: JobStatus },
}
