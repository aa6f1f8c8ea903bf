use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use stock_analyzer::application::ports::{AnalysisApi, AnalysisApiError, StatusSnapshot};
use stock_analyzer::application::services::{
    ANALYSIS_COMPLETE, AnalysisPoller, PollError, PollPolicy,
};
use stock_analyzer::domain::{CompanyName, JobStatus};

use crate::helpers::company;

/// Replays scripted statuses, then repeats the last one.
struct ScriptedApi {
    submit_fails: bool,
    result_fails: bool,
    statuses: Mutex<VecDeque<StatusSnapshot>>,
    status_calls: Mutex<u32>,
}

impl ScriptedApi {
    fn new(statuses: Vec<StatusSnapshot>) -> Self {
        Self {
            submit_fails: false,
            result_fails: false,
            statuses: Mutex::new(statuses.into()),
            status_calls: Mutex::new(0),
        }
    }

    fn status_calls(&self) -> u32 {
        *self.status_calls.lock().unwrap()
    }
}

fn snapshot(status: JobStatus) -> StatusSnapshot {
    StatusSnapshot {
        status,
        error: None,
    }
}

fn server_error() -> AnalysisApiError {
    AnalysisApiError::UnexpectedStatus {
        status: 500,
        body: "boom".to_string(),
    }
}

#[async_trait]
impl AnalysisApi for ScriptedApi {
    async fn submit(&self, company: &CompanyName) -> Result<String, AnalysisApiError> {
        if self.submit_fails {
            return Err(server_error());
        }
        Ok(format!("Analysis started for {}", company))
    }

    async fn status(&self, _company: &CompanyName) -> Result<StatusSnapshot, AnalysisApiError> {
        *self.status_calls.lock().unwrap() += 1;
        let mut statuses = self.statuses.lock().unwrap();
        let next = if statuses.len() > 1 {
            statuses.pop_front()
        } else {
            statuses.front().cloned()
        };
        next.ok_or_else(server_error)
    }

    async fn result(&self, company: &CompanyName) -> Result<String, AnalysisApiError> {
        if self.result_fails {
            return Err(server_error());
        }
        Ok(format!("report for {}", company))
    }
}

fn policy(max_attempts: u32) -> PollPolicy {
    PollPolicy {
        initial_interval: Duration::from_millis(100),
        multiplier: 2.0,
        max_interval: Duration::from_secs(1),
        max_attempts,
    }
}

#[tokio::test(start_paused = true)]
async fn given_job_completing_after_polls_when_analyzing_then_returns_complete_report() {
    let api = Arc::new(ScriptedApi::new(vec![
        snapshot(JobStatus::InProgress),
        snapshot(JobStatus::InProgress),
        snapshot(JobStatus::Complete),
    ]));
    let poller = AnalysisPoller::new(Arc::clone(&api), policy(10));

    let report = poller.analyze(&company("Acme")).await.unwrap();

    assert_eq!(report.status, ANALYSIS_COMPLETE);
    assert_eq!(report.result, "report for Acme");
    assert_eq!(api.status_calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn given_job_never_finishing_when_analyzing_then_gives_up_after_max_attempts() {
    let api = Arc::new(ScriptedApi::new(vec![snapshot(JobStatus::InProgress)]));
    let poller = AnalysisPoller::new(Arc::clone(&api), policy(5));

    let err = poller.analyze(&company("Acme")).await.unwrap_err();

    assert!(matches!(err, PollError::TimedOut(5)));
    assert_eq!(api.status_calls(), 5);
}

#[tokio::test(start_paused = true)]
async fn given_backoff_policy_when_polling_then_waits_grow_between_checks() {
    let api = Arc::new(ScriptedApi::new(vec![snapshot(JobStatus::InProgress)]));
    let poller = AnalysisPoller::new(Arc::clone(&api), policy(4));

    let started = tokio::time::Instant::now();
    let _ = poller.wait_for_completion(&company("Acme")).await;

    // 100 + 200 + 400 ms between four checks, none after the last.
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(700), "{:?}", elapsed);
    assert!(elapsed < Duration::from_millis(750), "{:?}", elapsed);
}

#[tokio::test(start_paused = true)]
async fn given_failed_job_when_analyzing_then_returns_failure_message() {
    let api = Arc::new(ScriptedApi::new(vec![StatusSnapshot {
        status: JobStatus::Failed,
        error: Some("quota exceeded".to_string()),
    }]));
    let poller = AnalysisPoller::new(api, policy(10));

    let err = poller.analyze(&company("Acme")).await.unwrap_err();

    match err {
        PollError::Failed(message) => assert_eq!(message, "quota exceeded"),
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn given_cancelled_job_when_analyzing_then_returns_cancelled() {
    let api = Arc::new(ScriptedApi::new(vec![snapshot(JobStatus::Cancelled)]));
    let poller = AnalysisPoller::new(api, policy(10));

    let err = poller.analyze(&company("Acme")).await.unwrap_err();

    assert!(matches!(err, PollError::Cancelled));
}

#[tokio::test(start_paused = true)]
async fn given_failing_submission_when_analyzing_then_reports_initiation_error() {
    let api = Arc::new(ScriptedApi {
        submit_fails: true,
        ..ScriptedApi::new(vec![snapshot(JobStatus::Complete)])
    });
    let poller = AnalysisPoller::new(Arc::clone(&api), policy(10));

    let err = poller.analyze(&company("Acme")).await.unwrap_err();

    assert!(matches!(err, PollError::Submission(_)));
    assert_eq!(err.to_string(), "Error initiating analysis");
    assert_eq!(api.status_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn given_failing_status_endpoint_when_analyzing_then_reports_status_error() {
    let api = Arc::new(ScriptedApi::new(Vec::new()));
    let poller = AnalysisPoller::new(api, policy(10));

    let err = poller.analyze(&company("Acme")).await.unwrap_err();

    assert_eq!(err.to_string(), "Error checking status");
}

#[tokio::test(start_paused = true)]
async fn given_failing_result_endpoint_when_analyzing_then_reports_retrieval_error() {
    let api = Arc::new(ScriptedApi {
        result_fails: true,
        ..ScriptedApi::new(vec![snapshot(JobStatus::Complete)])
    });
    let poller = AnalysisPoller::new(api, policy(10));

    let err = poller.analyze(&company("Acme")).await.unwrap_err();

    assert_eq!(err.to_string(), "Error retrieving result");
}
