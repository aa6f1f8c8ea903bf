use super::{CompanyName, JobId, JobStatus, StoragePath};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Job {
    pub id: JobId,
    pub company: CompanyName,
    pub status: JobStatus,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// A freshly submitted job. Submission is what starts the job, so it
    /// begins in progress.
    pub fn new(company: CompanyName) -> Self {
        let now = Utc::now();
        Self {
            id: JobId::new(),
            company,
            status: JobStatus::InProgress,
            error_message: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn report_path(&self) -> StoragePath {
        StoragePath::for_report(&self.id, &self.company)
    }
}
