use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tracing::Instrument;

use crate::application::ports::{
    AnalysisEngine, AnalysisEngineError, JobRepository, ReportStore, ReportStoreError,
    RepositoryError,
};
use crate::domain::{CompanyName, JobId, JobStatus, StoragePath};

use super::{JobHandle, JobSupervisor, TaskOutcome};

pub struct AnalysisMessage {
    pub job_id: JobId,
    pub company: CompanyName,
}

pub struct AnalysisWorker {
    receiver: mpsc::Receiver<AnalysisMessage>,
    runner: Arc<JobRunner>,
    supervisor: Arc<JobSupervisor>,
}

/// Everything a single job run needs, shared by all runs.
struct JobRunner {
    engine: Arc<dyn AnalysisEngine>,
    job_repository: Arc<dyn JobRepository>,
    report_store: Arc<dyn ReportStore>,
    limiter: Arc<Semaphore>,
}

impl AnalysisWorker {
    pub fn new(
        receiver: mpsc::Receiver<AnalysisMessage>,
        engine: Arc<dyn AnalysisEngine>,
        job_repository: Arc<dyn JobRepository>,
        report_store: Arc<dyn ReportStore>,
        supervisor: Arc<JobSupervisor>,
        max_concurrent_jobs: usize,
    ) -> Self {
        Self {
            receiver,
            runner: Arc::new(JobRunner {
                engine,
                job_repository,
                report_store,
                limiter: Arc::new(Semaphore::new(max_concurrent_jobs.max(1))),
            }),
            supervisor,
        }
    }

    pub async fn run(mut self) {
        tracing::info!("Analysis worker started");
        while let Some(msg) = self.receiver.recv().await {
            self.dispatch(msg).await;
        }
        tracing::info!("Analysis worker stopped: channel closed");
    }

    /// Starts the supervised run for `msg`, unless its job was cancelled or
    /// superseded while it sat in the queue.
    pub async fn dispatch(&self, msg: AnalysisMessage) -> Option<JobHandle> {
        let span = tracing::info_span!(
            "analysis_job",
            job_id = %msg.job_id,
            company = %msg.company,
        );

        match self.runner.job_repository.get_by_id(msg.job_id).await {
            Ok(Some(job)) if job.status == JobStatus::InProgress => {}
            Ok(Some(job)) => {
                span.in_scope(|| {
                    tracing::debug!(
                        status = %job.status,
                        "Skipping job that is no longer in progress"
                    )
                });
                return None;
            }
            Ok(None) => {
                span.in_scope(|| tracing::warn!("Skipping job missing from the job store"));
                return None;
            }
            Err(e) => {
                span.in_scope(|| tracing::error!(error = %e, "Failed to load queued job"));
                return None;
            }
        }

        let job_id = msg.job_id;
        let company = msg.company;
        let path = StoragePath::for_report(&job_id, &company);

        let task = Arc::clone(&self.runner)
            .process_job(job_id, company, path.clone())
            .instrument(span.clone());
        let runner = Arc::clone(&self.runner);
        let finish = move |outcome: TaskOutcome| {
            async move { runner.record_outcome(job_id, &path, outcome).await }.instrument(span)
        };

        Some(self.supervisor.spawn(job_id, task, finish))
    }
}

impl JobRunner {
    async fn process_job(
        self: Arc<Self>,
        job_id: JobId,
        company: CompanyName,
        path: StoragePath,
    ) -> Result<(), AnalysisWorkerError> {
        let _permit = Arc::clone(&self.limiter)
            .acquire_owned()
            .await
            .map_err(|_| AnalysisWorkerError::LimiterClosed)?;

        // A cancel that lands before the run is registered with the
        // supervisor writes the status directly.
        let current = self
            .job_repository
            .get_by_id(job_id)
            .await
            .map_err(AnalysisWorkerError::Repository)?;
        if let Some(job) = current.filter(|job| job.status != JobStatus::InProgress) {
            tracing::debug!(status = %job.status, "Job left progress before its run started");
            return Ok(());
        }

        tracing::debug!("Running analysis engine");
        let report = self
            .engine
            .analyze(&company)
            .await
            .map_err(AnalysisWorkerError::Engine)?;

        let bytes = self
            .report_store
            .store(&path, &report)
            .await
            .map_err(AnalysisWorkerError::ReportStore)?;
        tracing::debug!(bytes, path = %path, "Report stored");

        Ok(())
    }

    async fn record_outcome(&self, job_id: JobId, path: &StoragePath, outcome: TaskOutcome) {
        let (status, error_message) = match &outcome {
            TaskOutcome::Succeeded => (JobStatus::Complete, None),
            TaskOutcome::Failed(message) => (JobStatus::Failed, Some(message.as_str())),
            TaskOutcome::Cancelled => (JobStatus::Cancelled, None),
        };

        match self
            .job_repository
            .update_status(job_id, status, error_message)
            .await
        {
            Ok(_) => match &outcome {
                TaskOutcome::Succeeded => tracing::info!("Analysis completed"),
                TaskOutcome::Failed(message) => {
                    tracing::error!(error = %message, "Analysis failed")
                }
                TaskOutcome::Cancelled => {
                    tracing::info!("Analysis cancelled");
                    self.discard_report(path).await;
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, status = %status, "Job status not recorded");
                if matches!(outcome, TaskOutcome::Succeeded) {
                    self.discard_report(path).await;
                }
            }
        }
    }

    async fn discard_report(&self, path: &StoragePath) {
        match self.report_store.delete(path).await {
            Ok(()) | Err(ReportStoreError::NotFound(_)) => {}
            Err(e) => tracing::warn!(error = %e, path = %path, "Failed to discard report"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisWorkerError {
    #[error("analysis engine: {0}")]
    Engine(AnalysisEngineError),
    #[error("report store: {0}")]
    ReportStore(ReportStoreError),
    #[error("job store: {0}")]
    Repository(RepositoryError),
    #[error("concurrency limiter closed")]
    LimiterClosed,
}
