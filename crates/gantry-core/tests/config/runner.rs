use gantry_core::config::{RunnerConfig, StorageConfig, RUNNER_CONFIG_ENV_VAR};

fn sample_storage() -> StorageConfig {
    StorageConfig {
        account_name: "mlstorage".to_string(),
        container: "pipelines".to_string(),
    }
}

#[test]
fn json_round_trip() {
    let config = RunnerConfig {
        storage: sample_storage(),
        run_id: "run-123".to_string(),
        storage_account_key: "secret".to_string(),
    };
    let json = config.to_json().expect("serialize");
    let parsed = RunnerConfig::from_json(&json).expect("deserialize");
    assert_eq!(parsed, config);
}

#[test]
fn malformed_json_errors() {
    let err = RunnerConfig::from_json("{not json").expect_err("expected error");
    assert!(err.to_string().contains("not valid JSON"));
}

#[test]
fn new_generates_distinct_run_ids() {
    let first = RunnerConfig::new(sample_storage(), "secret".to_string());
    let second = RunnerConfig::new(sample_storage(), "secret".to_string());
    assert!(!first.run_id.is_empty());
    assert_ne!(first.run_id, second.run_id);
}

#[test]
fn from_env_reads_and_reports_missing() {
    let config = RunnerConfig {
        storage: sample_storage(),
        run_id: "run-123".to_string(),
        storage_account_key: "secret".to_string(),
    };
    std::env::set_var(RUNNER_CONFIG_ENV_VAR, config.to_json().expect("serialize"));
    let parsed = RunnerConfig::from_env().expect("read from env");
    assert_eq!(parsed, config);

    std::env::remove_var(RUNNER_CONFIG_ENV_VAR);
    let err = RunnerConfig::from_env().expect_err("expected error");
    assert!(err.to_string().contains(RUNNER_CONFIG_ENV_VAR));
}
