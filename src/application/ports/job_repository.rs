use crate::domain::{CompanyName, Job, JobId, JobStatus};
use async_trait::async_trait;

use super::RepositoryError;

/// Store of the current job per company.
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Makes `job` the current job for its company. Fails with
    /// [`RepositoryError::JobInProgress`] while the company's current job
    /// has not reached a terminal status.
    async fn create(&self, job: &Job) -> Result<(), RepositoryError>;

    async fn get_by_id(&self, id: JobId) -> Result<Option<Job>, RepositoryError>;

    async fn get_by_company(&self, company: &CompanyName) -> Result<Option<Job>, RepositoryError>;

    /// Moves a job to `status` and returns the updated record. Writes for a
    /// job that is no longer current, and transitions its status does not
    /// allow, are rejected.
    async fn update_status(
        &self,
        id: JobId,
        status: JobStatus,
        error_message: Option<&str>,
    ) -> Result<Job, RepositoryError>;

    async fn list_by_status(&self, status: JobStatus) -> Result<Vec<Job>, RepositoryError>;
}
