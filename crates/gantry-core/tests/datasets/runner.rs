use std::sync::Arc;

use gantry_core::datasets::{DataSet, DistributedRunnerDataSet, RunnerDataSet};

use crate::support::{sample_runner_config, sample_storage, MemoryBlobClient};

#[test]
fn blob_uri_uses_the_temp_layout() {
    let client = Arc::new(MemoryBlobClient::new(&sample_storage()));
    let dataset = RunnerDataSet::new(client, sample_runner_config("run-1"), "features");
    assert_eq!(
        dataset.blob_uri(),
        "abfs://pipelines@mlstorage.dfs.core.windows.net/gantry-temp/run-1/features.bin"
    );
}

#[test]
fn save_then_load_round_trips_through_temp_storage() {
    let client = Arc::new(MemoryBlobClient::new(&sample_storage()));
    let dataset = RunnerDataSet::new(client.clone(), sample_runner_config("run-1"), "features");

    assert!(!dataset.exists().expect("exists"));
    dataset.save(b"intermediate").expect("save");
    assert_eq!(
        client.get("gantry-temp/run-1/features.bin").as_deref(),
        Some(b"intermediate".as_slice())
    );
    assert!(dataset.exists().expect("exists"));
    assert_eq!(dataset.load().expect("load"), b"intermediate");
}

#[test]
fn runs_do_not_share_staging_keys() {
    let client = Arc::new(MemoryBlobClient::new(&sample_storage()));
    let first = RunnerDataSet::new(client.clone(), sample_runner_config("run-1"), "features");
    let second = RunnerDataSet::new(client.clone(), sample_runner_config("run-2"), "features");

    first.save(b"first").expect("save");
    assert!(!second.exists().expect("exists"));
}

// Env-var driven, so the rank scenarios run inside one test to avoid
// racing with parallel test threads.
#[test]
fn distributed_save_only_persists_on_rank_zero() {
    let client = Arc::new(MemoryBlobClient::new(&sample_storage()));
    let dataset =
        DistributedRunnerDataSet::new(client.clone(), sample_runner_config("run-1"), "weights");

    std::env::set_var("RANK", "1");
    dataset.save(b"ignored").expect("save");
    assert!(client.is_empty());

    std::env::set_var("RANK", "0");
    dataset.save(b"persisted").expect("save");
    assert_eq!(
        client.get("gantry-temp/run-1/weights.bin").as_deref(),
        Some(b"persisted".as_slice())
    );
    std::env::remove_var("RANK");

    // without any launcher variables the process is rank 0
    dataset.save(b"standalone").expect("save");
    assert_eq!(
        client.get("gantry-temp/run-1/weights.bin").as_deref(),
        Some(b"standalone".as_slice())
    );
}

#[test]
fn distributed_load_works_on_any_rank() {
    let client = Arc::new(MemoryBlobClient::new(&sample_storage()));
    client.insert("gantry-temp/run-1/weights.bin", b"weights");
    let dataset = DistributedRunnerDataSet::new(client, sample_runner_config("run-1"), "weights");
    assert_eq!(dataset.load().expect("load"), b"weights");
}
