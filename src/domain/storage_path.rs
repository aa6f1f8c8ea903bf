use std::fmt;

use super::{CompanyName, JobId};

const FALLBACK_STEM: &str = "report";

/// Location of a persisted report, relative to the report store root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePath(String);

impl StoragePath {
    /// `<job-uuid>/<sanitized-company>_latest.txt`. Writers and readers both
    /// go through this, and the job id prefix keeps companies whose
    /// sanitized names collide apart.
    pub fn for_report(job_id: &JobId, company: &CompanyName) -> Self {
        let mut stem = company.sanitized();
        if stem.is_empty() {
            stem = FALLBACK_STEM.to_string();
        }
        Self(format!("{}/{}_latest.txt", job_id.as_uuid(), stem))
    }

    pub fn from_raw(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
