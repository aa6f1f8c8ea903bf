use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::application::ports::{ReportStore, ReportStoreError};
use crate::domain::StoragePath;

/// Report store held in memory, for tests and throwaway runs.
#[derive(Debug, Default)]
pub struct InMemoryReportStore {
    reports: RwLock<HashMap<String, String>>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.reports.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.reports.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl ReportStore for InMemoryReportStore {
    async fn store(&self, path: &StoragePath, report: &str) -> Result<u64, ReportStoreError> {
        self.reports
            .write()
            .await
            .insert(path.as_str().to_string(), report.to_string());
        Ok(report.len() as u64)
    }

    async fn fetch(&self, path: &StoragePath) -> Result<String, ReportStoreError> {
        self.reports
            .read()
            .await
            .get(path.as_str())
            .cloned()
            .ok_or_else(|| ReportStoreError::NotFound(path.to_string()))
    }

    async fn delete(&self, path: &StoragePath) -> Result<(), ReportStoreError> {
        self.reports
            .write()
            .await
            .remove(path.as_str())
            .map(|_| ())
            .ok_or_else(|| ReportStoreError::NotFound(path.to_string()))
    }
}
