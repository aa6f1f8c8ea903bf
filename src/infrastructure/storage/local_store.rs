use std::path::PathBuf;

use bytes::Bytes;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};

use crate::application::ports::{ReportStore, ReportStoreError};
use crate::domain::StoragePath;

/// Reports as plain text files under a base directory. Writes go through a
/// staged temporary file and a rename, so readers never see partial content.
pub struct LocalReportStore {
    inner: LocalFileSystem,
}

impl LocalReportStore {
    pub fn new(base_path: PathBuf) -> Result<Self, ReportStoreError> {
        std::fs::create_dir_all(&base_path)?;
        let fs = LocalFileSystem::new_with_prefix(base_path)
            .map_err(|e| ReportStoreError::WriteFailed(e.to_string()))?;
        Ok(Self { inner: fs })
    }
}

#[async_trait::async_trait]
impl ReportStore for LocalReportStore {
    async fn store(&self, path: &StoragePath, report: &str) -> Result<u64, ReportStoreError> {
        let store_path = StorePath::from(path.as_str());
        let payload = PutPayload::from(Bytes::from(report.to_owned()));

        self.inner
            .put(&store_path, payload)
            .await
            .map_err(|e| ReportStoreError::WriteFailed(e.to_string()))?;

        Ok(report.len() as u64)
    }

    async fn fetch(&self, path: &StoragePath) -> Result<String, ReportStoreError> {
        let store_path = StorePath::from(path.as_str());
        let result = match self.inner.get(&store_path).await {
            Ok(result) => result,
            Err(object_store::Error::NotFound { .. }) => {
                return Err(ReportStoreError::NotFound(path.to_string()));
            }
            Err(e) => return Err(ReportStoreError::ReadFailed(e.to_string())),
        };

        let bytes = result
            .bytes()
            .await
            .map_err(|e| ReportStoreError::ReadFailed(e.to_string()))?;

        String::from_utf8(bytes.to_vec())
            .map_err(|e| ReportStoreError::InvalidEncoding(e.to_string()))
    }

    async fn delete(&self, path: &StoragePath) -> Result<(), ReportStoreError> {
        let store_path = StorePath::from(path.as_str());
        match self.inner.delete(&store_path).await {
            Ok(()) => Ok(()),
            Err(object_store::Error::NotFound { .. }) => {
                Err(ReportStoreError::NotFound(path.to_string()))
            }
            Err(e) => Err(ReportStoreError::DeleteFailed(e.to_string())),
        }
    }
}
