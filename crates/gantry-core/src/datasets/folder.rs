use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::StorageConfig;
use crate::datasets::DataSet;
use crate::errors::DataSetError;
use crate::storage::{format_abfs_uri, join_blob_path, BlobStorageClient};
use crate::GantryResult;

/// Prefix inside the container under which named datasets live.
const DATASET_PREFIX: &str = "datasets";

/// Dataset bound to a named cloud folder. Load pulls the blob down to the
/// local path; save pushes the local file back up.
pub struct FolderDataSet {
    client: Arc<dyn BlobStorageClient>,
    storage: StorageConfig,
    dataset_name: String,
    local_path: PathBuf,
}

impl std::fmt::Debug for FolderDataSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FolderDataSet")
            .field("storage", &self.storage)
            .field("dataset_name", &self.dataset_name)
            .field("local_path", &self.local_path)
            .finish_non_exhaustive()
    }
}

impl FolderDataSet {
    pub fn new(
        client: Arc<dyn BlobStorageClient>,
        storage: StorageConfig,
        dataset_name: impl Into<String>,
        local_path: impl Into<PathBuf>,
        versioned: bool,
    ) -> GantryResult<Self> {
        if versioned {
            return Err(Box::new(DataSetError(
                "folder dataset does not support versioning of the underlying dataset; \
                 remove the versioned flag from the dataset definition"
                    .to_string(),
            )));
        }
        let dataset_name = dataset_name.into();
        if dataset_name.trim().is_empty() {
            return Err(Box::new(DataSetError(
                "folder dataset requires a dataset name".to_string(),
            )));
        }
        let local_path = local_path.into();
        if local_path.file_name().is_none() {
            return Err(Box::new(DataSetError(format!(
                "folder dataset local path must name a file (got {})",
                local_path.display()
            ))));
        }
        Ok(Self {
            client,
            storage,
            dataset_name,
            local_path,
        })
    }

    fn file_name(&self) -> String {
        self.local_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("object")
            .to_string()
    }

    pub fn blob_uri(&self) -> String {
        let key = join_blob_path(
            DATASET_PREFIX,
            &format!("{}/{}", self.dataset_name, self.file_name()),
        );
        format_abfs_uri(&self.storage.container, &self.storage.account_name, &key)
    }
}

impl DataSet for FolderDataSet {
    fn load(&self) -> GantryResult<Vec<u8>> {
        let dest_dir = self
            .local_path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let downloaded = self.client.download(&self.blob_uri(), dest_dir)?;
        fs::read(&downloaded).map_err(|err| {
            Box::new(DataSetError(format!(
                "folder dataset {} load failed for {}: {err}",
                self.dataset_name,
                downloaded.display()
            ))) as Box<dyn std::error::Error + Send + Sync>
        })
    }

    fn save(&self, data: &[u8]) -> GantryResult<()> {
        if let Some(parent) = self.local_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.local_path, data).map_err(|err| {
            Box::new(DataSetError(format!(
                "folder dataset {} save failed for {}: {err}",
                self.dataset_name,
                self.local_path.display()
            ))) as Box<dyn std::error::Error + Send + Sync>
        })?;
        self.client.upload(&self.local_path, &self.blob_uri())
    }

    fn exists(&self) -> GantryResult<bool> {
        self.client.exists(&self.blob_uri())
    }

    fn describe(&self) -> String {
        format!(
            "folder dataset {} at {}",
            self.dataset_name,
            self.blob_uri()
        )
    }
}
