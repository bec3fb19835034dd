mod folder;
mod mlflow;
mod pipeline;
mod runner;

pub use folder::FolderDataSet;
pub use mlflow::{MlflowModelDataSet, PYFUNC_FLAVOR};
pub use pipeline::PipelineDataSet;
pub use runner::{DistributedRunnerDataSet, RunnerDataSet};

use crate::GantryResult;

/// Load/save seam the pipeline runner consumes. Datasets move opaque
/// bytes; interpreting them is the pipeline step's job.
pub trait DataSet {
    fn load(&self) -> GantryResult<Vec<u8>>;
    fn save(&self, data: &[u8]) -> GantryResult<()>;
    fn exists(&self) -> GantryResult<bool>;
    fn describe(&self) -> String;
}
