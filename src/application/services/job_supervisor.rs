use std::any::Any;
use std::collections::HashMap;
use std::fmt::Display;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::FutureExt;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::domain::JobId;

/// How a supervised run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Succeeded,
    Failed(String),
    Cancelled,
}

/// Handle to one supervised job run. Clones observe the same run.
#[derive(Debug, Clone)]
pub struct JobHandle {
    job_id: JobId,
    token: CancellationToken,
    outcome: watch::Receiver<Option<TaskOutcome>>,
}

impl JobHandle {
    pub fn job_id(&self) -> JobId {
        self.job_id
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.borrow().is_some()
    }

    pub fn outcome(&self) -> Option<TaskOutcome> {
        self.outcome.borrow().clone()
    }

    /// Resolves once the run has finished and its completion hook has run.
    pub async fn wait(&self) -> TaskOutcome {
        let mut outcome = self.outcome.clone();
        let resolved = match outcome.wait_for(Option::is_some).await {
            Ok(guard) => (*guard).clone(),
            // The sender only disappears without an outcome if the task was
            // dropped by the runtime.
            Err(_) => None,
        };
        resolved.unwrap_or(TaskOutcome::Cancelled)
    }
}

/// Owns the handles of all running jobs.
#[derive(Debug, Default)]
pub struct JobSupervisor {
    handles: Mutex<HashMap<JobId, JobHandle>>,
    shutdown: CancellationToken,
}

impl JobSupervisor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `task` on the runtime as the supervised run of `job_id`.
    ///
    /// The task is dropped as soon as it is cancelled. A panic inside it is
    /// caught and reported as [`TaskOutcome::Failed`]. `finish` receives the
    /// outcome and completes before the outcome becomes visible on the
    /// handle.
    pub fn spawn<T, E, F, FinishFut>(
        self: &Arc<Self>,
        job_id: JobId,
        task: T,
        finish: F,
    ) -> JobHandle
    where
        T: Future<Output = Result<(), E>> + Send + 'static,
        E: Display + Send + 'static,
        F: FnOnce(TaskOutcome) -> FinishFut + Send + 'static,
        FinishFut: Future<Output = ()> + Send + 'static,
    {
        let token = self.shutdown.child_token();
        let (sender, receiver) = watch::channel(None);
        let handle = JobHandle {
            job_id,
            token: token.clone(),
            outcome: receiver,
        };
        self.lock_handles().insert(job_id, handle.clone());

        let supervisor = Arc::clone(self);
        tokio::spawn(async move {
            let outcome = tokio::select! {
                biased;
                _ = token.cancelled() => TaskOutcome::Cancelled,
                result = AssertUnwindSafe(task).catch_unwind() => match result {
                    Ok(Ok(())) => TaskOutcome::Succeeded,
                    Ok(Err(e)) => TaskOutcome::Failed(e.to_string()),
                    Err(panic) => TaskOutcome::Failed(panic_message(panic.as_ref())),
                },
            };

            finish(outcome.clone()).await;
            supervisor.lock_handles().remove(&job_id);
            sender.send_replace(Some(outcome));
        });

        handle
    }

    pub fn handle(&self, job_id: JobId) -> Option<JobHandle> {
        self.lock_handles().get(&job_id).cloned()
    }

    /// Signals cancellation and returns the run's handle, or `None` when the
    /// job is not running here. A run that already got past its last await
    /// point still finishes with its own outcome, so callers that need to
    /// know whether the cancellation took effect wait on the handle.
    pub fn cancel(&self, job_id: JobId) -> Option<JobHandle> {
        let handle = self.handle(job_id)?;
        handle.cancel();
        Some(handle)
    }

    pub fn running(&self) -> usize {
        self.lock_handles().len()
    }

    /// Cancels every running job, refuses new ones, and waits for all of
    /// them to finish.
    pub async fn shutdown(&self) {
        self.shutdown.cancel();
        let handles: Vec<JobHandle> = self.lock_handles().values().cloned().collect();
        tracing::info!(running = handles.len(), "Cancelling running analyses");
        for handle in handles {
            handle.wait().await;
        }
    }

    fn lock_handles(&self) -> MutexGuard<'_, HashMap<JobId, JobHandle>> {
        self.handles.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("analysis panicked: {}", message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("analysis panicked: {}", message)
    } else {
        "analysis panicked".to_string()
    }
}
