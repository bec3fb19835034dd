use std::sync::Arc;

use gantry_core::datasets::{DataSet, FolderDataSet};

use crate::support::{sample_storage, MemoryBlobClient};

#[test]
fn versioned_underlying_dataset_is_rejected() {
    let client = Arc::new(MemoryBlobClient::new(&sample_storage()));
    let err = FolderDataSet::new(
        client,
        sample_storage(),
        "customer-features",
        "features.parquet",
        true,
    )
    .expect_err("expected error");
    assert!(err.to_string().contains("versioning"));
}

#[test]
fn blob_uri_addresses_the_named_dataset() {
    let client = Arc::new(MemoryBlobClient::new(&sample_storage()));
    let root = tempfile::tempdir().expect("tempdir");
    let dataset = FolderDataSet::new(
        client,
        sample_storage(),
        "customer-features",
        root.path().join("features.parquet"),
        false,
    )
    .expect("create dataset");
    assert_eq!(
        dataset.blob_uri(),
        "abfs://pipelines@mlstorage.dfs.core.windows.net/datasets/customer-features/features.parquet"
    );
}

#[test]
fn save_uploads_and_load_downloads() {
    let client = Arc::new(MemoryBlobClient::new(&sample_storage()));
    let root = tempfile::tempdir().expect("tempdir");
    let dataset = FolderDataSet::new(
        client.clone(),
        sample_storage(),
        "customer-features",
        root.path().join("features.parquet"),
        false,
    )
    .expect("create dataset");

    assert!(!dataset.exists().expect("exists"));
    dataset.save(b"feature-bytes").expect("save");
    assert_eq!(
        client
            .get("datasets/customer-features/features.parquet")
            .as_deref(),
        Some(b"feature-bytes".as_slice())
    );
    assert!(dataset.exists().expect("exists"));
    assert_eq!(dataset.load().expect("load"), b"feature-bytes");
}

#[test]
fn empty_dataset_name_is_rejected() {
    let client = Arc::new(MemoryBlobClient::new(&sample_storage()));
    let err = FolderDataSet::new(client, sample_storage(), "  ", "features.parquet", false)
        .expect_err("expected error");
    assert!(err.to_string().contains("dataset name"));
}
