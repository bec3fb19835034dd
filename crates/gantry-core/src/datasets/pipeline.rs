use std::fs;
use std::path::PathBuf;

use crate::datasets::DataSet;
use crate::errors::DataSetError;
use crate::GantryResult;

/// Dataset bound to a file inside the staging folder the platform mounts
/// for each pipeline node.
#[derive(Debug)]
pub struct PipelineDataSet {
    root_dir: PathBuf,
    filepath: PathBuf,
}

impl PipelineDataSet {
    pub fn new(root_dir: impl Into<PathBuf>, filepath: impl Into<PathBuf>) -> GantryResult<Self> {
        let filepath = filepath.into();
        if filepath.as_os_str().is_empty() {
            return Err(Box::new(DataSetError(
                "pipeline dataset path must not be empty".to_string(),
            )));
        }
        if filepath.is_absolute() {
            return Err(Box::new(DataSetError(format!(
                "pipeline dataset path must be relative to the staging root (got {})",
                filepath.display()
            ))));
        }
        Ok(Self {
            root_dir: root_dir.into(),
            filepath,
        })
    }

    pub fn resolved_path(&self) -> PathBuf {
        self.root_dir.join(&self.filepath)
    }
}

impl DataSet for PipelineDataSet {
    fn load(&self) -> GantryResult<Vec<u8>> {
        let path = self.resolved_path();
        fs::read(&path).map_err(|err| {
            Box::new(DataSetError(format!(
                "pipeline dataset load failed for {}: {err}",
                path.display()
            ))) as Box<dyn std::error::Error + Send + Sync>
        })
    }

    fn save(&self, data: &[u8]) -> GantryResult<()> {
        let path = self.resolved_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, data).map_err(|err| {
            Box::new(DataSetError(format!(
                "pipeline dataset save failed for {}: {err}",
                path.display()
            ))) as Box<dyn std::error::Error + Send + Sync>
        })
    }

    fn exists(&self) -> GantryResult<bool> {
        Ok(self.resolved_path().exists())
    }

    fn describe(&self) -> String {
        format!("pipeline dataset at {}", self.resolved_path().display())
    }
}
