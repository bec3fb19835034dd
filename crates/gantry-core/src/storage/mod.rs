use std::path::{Path, PathBuf};

use crate::GantryResult;

pub mod adls;
pub mod paths;

pub use adls::AdlsClient;
pub use paths::{
    format_abfs_uri, join_blob_path, parse_abfs_uri, temp_blob_path, BlobLocation,
    TEMP_STORAGE_PREFIX,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobRef {
    pub uri: String,
    pub key: String,
    pub size: Option<u64>,
}

/// Blob access seam the dataset adapters are written against.
pub trait BlobStorageClient: Send + Sync {
    fn list(&self, prefix: &str) -> GantryResult<Vec<BlobRef>>;
    fn download(&self, uri: &str, dest_dir: &Path) -> GantryResult<PathBuf>;
    fn upload(&self, local_path: &Path, uri: &str) -> GantryResult<()>;
    fn exists(&self, uri: &str) -> GantryResult<bool>;
}
