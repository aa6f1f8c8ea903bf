mod company_name;
mod job;
mod job_id;
mod job_status;
mod storage_path;

pub use company_name::{CompanyName, InvalidCompanyName};
pub use job::Job;
pub use job_id::JobId;
pub use job_status::JobStatus;
pub use storage_path::StoragePath;
