use std::fs;
use std::sync::Arc;

use crate::config::RunnerConfig;
use crate::datasets::DataSet;
use crate::errors::DataSetError;
use crate::storage::{format_abfs_uri, temp_blob_path, BlobStorageClient};
use crate::GantryResult;

/// Passes intermediate data between pipeline steps through the temporary
/// storage container configured for the run.
pub struct RunnerDataSet {
    client: Arc<dyn BlobStorageClient>,
    config: RunnerConfig,
    dataset_name: String,
}

impl RunnerDataSet {
    pub fn new(
        client: Arc<dyn BlobStorageClient>,
        config: RunnerConfig,
        dataset_name: impl Into<String>,
    ) -> Self {
        Self {
            client,
            config,
            dataset_name: dataset_name.into(),
        }
    }

    pub fn blob_uri(&self) -> String {
        format_abfs_uri(
            &self.config.storage.container,
            &self.config.storage.account_name,
            &temp_blob_path(&self.config.run_id, &self.dataset_name),
        )
    }
}

impl DataSet for RunnerDataSet {
    fn load(&self) -> GantryResult<Vec<u8>> {
        let temp_dir = tempfile::TempDir::new().map_err(|err| {
            Box::new(DataSetError(format!(
                "runner dataset {} tempdir failed: {err}",
                self.dataset_name
            ))) as Box<dyn std::error::Error + Send + Sync>
        })?;
        let downloaded = self.client.download(&self.blob_uri(), temp_dir.path())?;
        fs::read(&downloaded).map_err(|err| {
            Box::new(DataSetError(format!(
                "runner dataset {} load failed: {err}",
                self.dataset_name
            ))) as Box<dyn std::error::Error + Send + Sync>
        })
    }

    fn save(&self, data: &[u8]) -> GantryResult<()> {
        let temp_dir = tempfile::TempDir::new().map_err(|err| {
            Box::new(DataSetError(format!(
                "runner dataset {} tempdir failed: {err}",
                self.dataset_name
            ))) as Box<dyn std::error::Error + Send + Sync>
        })?;
        let staged = temp_dir.path().join(format!("{}.bin", self.dataset_name));
        fs::write(&staged, data)?;
        self.client.upload(&staged, &self.blob_uri())
    }

    fn exists(&self) -> GantryResult<bool> {
        self.client.exists(&self.blob_uri())
    }

    fn describe(&self) -> String {
        format!(
            "runner dataset {} for run {} at {}",
            self.dataset_name,
            self.config.run_id,
            self.blob_uri()
        )
    }
}

/// Runner dataset for distributed training steps: every worker may load,
/// only the lead worker persists.
pub struct DistributedRunnerDataSet {
    inner: RunnerDataSet,
}

impl DistributedRunnerDataSet {
    pub fn new(
        client: Arc<dyn BlobStorageClient>,
        config: RunnerConfig,
        dataset_name: impl Into<String>,
    ) -> Self {
        Self {
            inner: RunnerDataSet::new(client, config, dataset_name),
        }
    }

    pub fn blob_uri(&self) -> String {
        self.inner.blob_uri()
    }
}

impl DataSet for DistributedRunnerDataSet {
    fn load(&self) -> GantryResult<Vec<u8>> {
        self.inner.load()
    }

    fn save(&self, data: &[u8]) -> GantryResult<()> {
        if worker_rank() != 0 {
            return Ok(());
        }
        self.inner.save(data)
    }

    fn exists(&self) -> GantryResult<bool> {
        self.inner.exists()
    }

    fn describe(&self) -> String {
        format!("distributed {}", self.inner.describe())
    }
}

/// Rank of this worker in a distributed launch. Torch-style launchers set
/// RANK, MPI launchers set OMPI_COMM_WORLD_RANK; a lone process is rank 0.
fn worker_rank() -> u64 {
    for var in ["RANK", "OMPI_COMM_WORLD_RANK"] {
        if let Ok(value) = std::env::var(var) {
            if let Ok(rank) = value.trim().parse::<u64>() {
                return rank;
            }
        }
    }
    0
}
