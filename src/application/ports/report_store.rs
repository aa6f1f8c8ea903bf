use std::io;

use crate::domain::StoragePath;

#[async_trait::async_trait]
pub trait ReportStore: Send + Sync {
    /// Persists the report atomically and returns its size in bytes.
    async fn store(&self, path: &StoragePath, report: &str) -> Result<u64, ReportStoreError>;

    async fn fetch(&self, path: &StoragePath) -> Result<String, ReportStoreError>;

    async fn delete(&self, path: &StoragePath) -> Result<(), ReportStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ReportStoreError {
    #[error("write failed: {0}")]
    WriteFailed(String),
    #[error("report not found: {0}")]
    NotFound(String),
    #[error("read failed: {0}")]
    ReadFailed(String),
    #[error("report is not valid UTF-8: {0}")]
    InvalidEncoding(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
