use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{AnalysisApi, AnalysisApiError};
use crate::domain::{CompanyName, JobStatus};

pub const ANALYSIS_COMPLETE: &str = "Analysis complete";

/// Bounded exponential backoff between status checks.
#[derive(Debug, Clone, PartialEq)]
pub struct PollPolicy {
    pub initial_interval: Duration,
    pub multiplier: f64,
    pub max_interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_secs(1),
            multiplier: 1.5,
            max_interval: Duration::from_secs(10),
            max_attempts: 600,
        }
    }
}

impl PollPolicy {
    /// Delay after the status check numbered `attempt` (zero-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = self.multiplier.max(1.0).powi(attempt.min(i32::MAX as u32) as i32);
        let delay = self.initial_interval.as_secs_f64() * factor;
        if !delay.is_finite() || delay >= self.max_interval.as_secs_f64() {
            return self.max_interval;
        }
        Duration::from_secs_f64(delay)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollReport {
    pub status: String,
    pub result: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error("Error initiating analysis")]
    Submission(#[source] AnalysisApiError),
    #[error("Error checking status")]
    StatusCheck(#[source] AnalysisApiError),
    #[error("Error retrieving result")]
    Result(#[source] AnalysisApiError),
    #[error("Analysis failed: {0}")]
    Failed(String),
    #[error("Analysis cancelled")]
    Cancelled,
    #[error("Analysis did not complete after {0} status checks")]
    TimedOut(u32),
}

/// Client-side driver: submit, poll until terminal, fetch the result.
pub struct AnalysisPoller<A: ?Sized> {
    api: Arc<A>,
    policy: PollPolicy,
}

impl<A> AnalysisPoller<A>
where
    A: AnalysisApi + ?Sized,
{
    pub fn new(api: Arc<A>, policy: PollPolicy) -> Self {
        Self { api, policy }
    }

    pub async fn analyze(&self, company: &CompanyName) -> Result<PollReport, PollError> {
        let message = self
            .api
            .submit(company)
            .await
            .map_err(PollError::Submission)?;
        tracing::debug!(%message, "Analysis submitted");

        self.wait_for_completion(company).await?;

        let result = self
            .api
            .result(company)
            .await
            .map_err(PollError::Result)?;

        Ok(PollReport {
            status: ANALYSIS_COMPLETE.to_string(),
            result,
        })
    }

    pub async fn wait_for_completion(&self, company: &CompanyName) -> Result<(), PollError> {
        for attempt in 0..self.policy.max_attempts {
            let snapshot = self
                .api
                .status(company)
                .await
                .map_err(PollError::StatusCheck)?;

            match snapshot.status {
                JobStatus::Complete => return Ok(()),
                JobStatus::Failed => {
                    return Err(PollError::Failed(
                        snapshot
                            .error
                            .unwrap_or_else(|| "unknown error".to_string()),
                    ));
                }
                JobStatus::Cancelled => return Err(PollError::Cancelled),
                JobStatus::NotStarted | JobStatus::InProgress => {}
            }

            if attempt + 1 < self.policy.max_attempts {
                let delay = self.policy.delay_for(attempt);
                tracing::trace!(attempt, delay_ms = delay.as_millis() as u64, "Waiting");
                tokio::time::sleep(delay).await;
            }
        }

        Err(PollError::TimedOut(self.policy.max_attempts))
    }
}
