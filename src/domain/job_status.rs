use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle of an analysis job. Serialized with the human-readable strings
/// the status endpoint exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    Complete,
    Failed,
    Cancelled,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::NotStarted => "Not Started",
            JobStatus::InProgress => "In Progress",
            JobStatus::Complete => "Complete",
            JobStatus::Failed => "Failed",
            JobStatus::Cancelled => "Cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Complete | JobStatus::Failed | JobStatus::Cancelled
        )
    }

    /// Statuses only move forward; terminal statuses accept no transition.
    pub fn can_transition_to(&self, next: JobStatus) -> bool {
        matches!(
            (self, next),
            (JobStatus::NotStarted, JobStatus::InProgress)
                | (
                    JobStatus::InProgress,
                    JobStatus::Complete | JobStatus::Failed | JobStatus::Cancelled
                )
        )
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
