use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::application::ports::{JobRepository, RepositoryError};
use crate::domain::{CompanyName, Job, JobId, JobStatus};

/// Process-wide job store. Records are never evicted.
#[derive(Debug, Default)]
pub struct InMemoryJobRepository {
    inner: RwLock<JobTable>,
}

#[derive(Debug, Default)]
struct JobTable {
    current: HashMap<CompanyName, Job>,
    // Every job id ever created, so writes from superseded runs can be told
    // apart from unknown ids.
    owners: HashMap<JobId, CompanyName>,
}

impl InMemoryJobRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    #[instrument(skip(self, job), fields(job_id = %job.id, company = %job.company))]
    async fn create(&self, job: &Job) -> Result<(), RepositoryError> {
        let mut table = self.inner.write().await;

        if let Some(existing) = table.current.get(&job.company) {
            if !existing.status.is_terminal() {
                return Err(RepositoryError::JobInProgress(existing.id));
            }
        }

        table.owners.insert(job.id, job.company.clone());
        table.current.insert(job.company.clone(), job.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: JobId) -> Result<Option<Job>, RepositoryError> {
        let table = self.inner.read().await;
        let job = table
            .owners
            .get(&id)
            .and_then(|company| table.current.get(company))
            .filter(|job| job.id == id)
            .cloned();
        Ok(job)
    }

    async fn get_by_company(&self, company: &CompanyName) -> Result<Option<Job>, RepositoryError> {
        Ok(self.inner.read().await.current.get(company).cloned())
    }

    #[instrument(skip(self, error_message), fields(job_id = %id, status = %status))]
    async fn update_status(
        &self,
        id: JobId,
        status: JobStatus,
        error_message: Option<&str>,
    ) -> Result<Job, RepositoryError> {
        let mut table = self.inner.write().await;

        let company = table
            .owners
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        let job = table
            .current
            .get_mut(&company)
            .filter(|job| job.id == id)
            .ok_or(RepositoryError::StaleJob(id))?;

        if !job.status.can_transition_to(status) {
            return Err(RepositoryError::InvalidTransition {
                from: job.status,
                to: status,
            });
        }

        job.status = status;
        job.error_message = error_message.map(str::to_string);
        job.updated_at = Utc::now();
        Ok(job.clone())
    }

    async fn list_by_status(&self, status: JobStatus) -> Result<Vec<Job>, RepositoryError> {
        let table = self.inner.read().await;
        let mut jobs: Vec<Job> = table
            .current
            .values()
            .filter(|job| job.status == status)
            .cloned()
            .collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(jobs)
    }
}
