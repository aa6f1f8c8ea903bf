use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::application::ports::{JobRepository, ReportStore, ReportStoreError, RepositoryError};
use crate::domain::{CompanyName, Job, JobStatus};

use super::{AnalysisMessage, JobSupervisor, TaskOutcome};

pub const RESULT_PLACEHOLDER: &str = "Analysis not complete or file not found";

#[derive(Debug, Clone)]
pub enum Submission {
    Started(Job),
    AlreadyInProgress(Job),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub status: JobStatus,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportLookup {
    Ready(String),
    Pending,
    Failed(String),
    Cancelled,
}

/// The job-status protocol: submit, query status, fetch the report, cancel.
pub struct AnalysisService {
    job_repository: Arc<dyn JobRepository>,
    report_store: Arc<dyn ReportStore>,
    sender: mpsc::Sender<AnalysisMessage>,
    supervisor: Arc<JobSupervisor>,
}

impl AnalysisService {
    pub fn new(
        job_repository: Arc<dyn JobRepository>,
        report_store: Arc<dyn ReportStore>,
        sender: mpsc::Sender<AnalysisMessage>,
        supervisor: Arc<JobSupervisor>,
    ) -> Self {
        Self {
            job_repository,
            report_store,
            sender,
            supervisor,
        }
    }

    #[tracing::instrument(skip_all, fields(company = %company))]
    pub async fn submit(&self, company: CompanyName) -> Result<Submission, AnalysisServiceError> {
        let job = Job::new(company);

        match self.job_repository.create(&job).await {
            Ok(()) => {}
            Err(RepositoryError::JobInProgress(_)) => {
                if let Some(current) = self.job_repository.get_by_company(&job.company).await? {
                    tracing::info!(job_id = %current.id, "Analysis already in progress");
                    return Ok(Submission::AlreadyInProgress(current));
                }
                return Err(RepositoryError::NotFound(job.company.to_string()).into());
            }
            Err(e) => return Err(e.into()),
        }

        let msg = AnalysisMessage {
            job_id: job.id,
            company: job.company.clone(),
        };

        if let Err(e) = self.sender.try_send(msg) {
            let reason = match e {
                TrySendError::Full(_) => "analysis queue is full",
                TrySendError::Closed(_) => "analysis worker is unavailable",
            };
            tracing::error!(job_id = %job.id, reason, "Failed to enqueue analysis job");
            self.job_repository
                .update_status(job.id, JobStatus::Failed, Some(reason))
                .await?;
            return Err(AnalysisServiceError::QueueUnavailable(reason.to_string()));
        }

        tracing::info!(job_id = %job.id, "Analysis job enqueued");
        Ok(Submission::Started(job))
    }

    pub async fn status(
        &self,
        company: &CompanyName,
    ) -> Result<StatusView, AnalysisServiceError> {
        let view = match self.job_repository.get_by_company(company).await? {
            Some(job) => StatusView {
                status: job.status,
                error_message: job.error_message,
            },
            None => StatusView {
                status: JobStatus::NotStarted,
                error_message: None,
            },
        };
        Ok(view)
    }

    /// Reads the report of the company's current job. Only a `Complete` job
    /// is ever read from storage.
    pub async fn result(
        &self,
        company: &CompanyName,
    ) -> Result<ReportLookup, AnalysisServiceError> {
        let Some(job) = self.job_repository.get_by_company(company).await? else {
            return Ok(ReportLookup::Pending);
        };

        match job.status {
            JobStatus::NotStarted | JobStatus::InProgress => Ok(ReportLookup::Pending),
            JobStatus::Failed => Ok(ReportLookup::Failed(
                job.error_message
                    .unwrap_or_else(|| "unknown error".to_string()),
            )),
            JobStatus::Cancelled => Ok(ReportLookup::Cancelled),
            JobStatus::Complete => match self.report_store.fetch(&job.report_path()).await {
                Ok(report) => Ok(ReportLookup::Ready(report)),
                Err(ReportStoreError::NotFound(path)) => {
                    tracing::warn!(
                        job_id = %job.id,
                        path = %path,
                        "Report missing for completed job"
                    );
                    Ok(ReportLookup::Pending)
                }
                Err(e) => Err(e.into()),
            },
        }
    }

    /// Cancels the company's in-progress job. Returns `None` when nothing is
    /// in progress, or when the run finished before the cancellation could
    /// take effect.
    #[tracing::instrument(skip_all, fields(company = %company))]
    pub async fn cancel(
        &self,
        company: &CompanyName,
    ) -> Result<Option<Job>, AnalysisServiceError> {
        let Some(job) = self.job_repository.get_by_company(company).await? else {
            return Ok(None);
        };
        if job.status != JobStatus::InProgress {
            return Ok(None);
        }

        if let Some(handle) = self.supervisor.cancel(job.id) {
            tracing::info!(job_id = %job.id, "Cancellation signalled");
            return match handle.wait().await {
                TaskOutcome::Cancelled => Ok(self
                    .job_repository
                    .get_by_id(job.id)
                    .await?
                    .filter(|job| job.status == JobStatus::Cancelled)),
                outcome => {
                    tracing::info!(
                        job_id = %job.id,
                        ?outcome,
                        "Analysis finished before cancellation"
                    );
                    Ok(None)
                }
            };
        }

        // Still queued: no run to signal, so record the cancellation directly.
        match self
            .job_repository
            .update_status(job.id, JobStatus::Cancelled, None)
            .await
        {
            Ok(updated) => {
                tracing::info!(job_id = %job.id, "Queued analysis cancelled");
                Ok(Some(updated))
            }
            Err(RepositoryError::InvalidTransition { .. } | RepositoryError::StaleJob(_)) => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisServiceError {
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
    #[error("report store: {0}")]
    ReportStore(#[from] ReportStoreError),
    #[error("queue unavailable: {0}")]
    QueueUnavailable(String),
}
