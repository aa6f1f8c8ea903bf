use stock_analyzer::domain::{CompanyName, Job, JobStatus};

const ALL: [JobStatus; 5] = [
    JobStatus::NotStarted,
    JobStatus::InProgress,
    JobStatus::Complete,
    JobStatus::Failed,
    JobStatus::Cancelled,
];

#[test]
fn given_status_when_serialized_then_uses_display_string() {
    for status in ALL {
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(json, format!("\"{}\"", status.as_str()));
    }
    assert_eq!(JobStatus::NotStarted.to_string(), "Not Started");
    assert_eq!(JobStatus::InProgress.to_string(), "In Progress");
}

#[test]
fn given_status_string_when_deserialized_then_matches_variant() {
    let status: JobStatus = serde_json::from_str("\"In Progress\"").unwrap();
    assert_eq!(status, JobStatus::InProgress);
}

#[test]
fn given_terminal_status_when_checking_transitions_then_none_allowed() {
    for from in [JobStatus::Complete, JobStatus::Failed, JobStatus::Cancelled] {
        assert!(from.is_terminal());
        for to in ALL {
            assert!(!from.can_transition_to(to), "{} -> {} allowed", from, to);
        }
    }
}

#[test]
fn given_in_progress_when_checking_transitions_then_only_terminal_allowed() {
    let from = JobStatus::InProgress;
    assert!(from.can_transition_to(JobStatus::Complete));
    assert!(from.can_transition_to(JobStatus::Failed));
    assert!(from.can_transition_to(JobStatus::Cancelled));
    assert!(!from.can_transition_to(JobStatus::NotStarted));
    assert!(!from.can_transition_to(JobStatus::InProgress));
}

#[test]
fn given_new_job_when_created_then_is_in_progress_without_error() {
    let job = Job::new(CompanyName::parse("Acme").unwrap());
    assert_eq!(job.status, JobStatus::InProgress);
    assert!(job.error_message.is_none());
    assert_eq!(job.created_at, job.updated_at);
}
