mod analysis_service;
mod analysis_worker;
mod job_supervisor;
mod poller;

pub use analysis_service::{
    AnalysisService, AnalysisServiceError, RESULT_PLACEHOLDER, ReportLookup, StatusView,
    Submission,
};
pub use analysis_worker::{AnalysisMessage, AnalysisWorker, AnalysisWorkerError};
pub use job_supervisor::{JobHandle, JobSupervisor, TaskOutcome};
pub use poller::{ANALYSIS_COMPLETE, AnalysisPoller, PollError, PollPolicy, PollReport};
