use serde::{Deserialize, Serialize};

use crate::config::StorageConfig;
use crate::{ConfigError, GantryResult};

/// Environment variable the orchestrator uses to hand worker processes
/// their runner configuration, JSON-encoded.
pub const RUNNER_CONFIG_ENV_VAR: &str = "GANTRY_RUNNER_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerConfig {
    pub storage: StorageConfig,
    pub run_id: String,
    pub storage_account_key: String,
}

impl RunnerConfig {
    pub fn new(storage: StorageConfig, storage_account_key: String) -> Self {
        Self {
            storage,
            run_id: uuid::Uuid::new_v4().simple().to_string(),
            storage_account_key,
        }
    }

    pub fn from_json(contents: &str) -> GantryResult<Self> {
        serde_json::from_str(contents).map_err(|err| {
            Box::new(ConfigError(format!("runner config is not valid JSON: {err}")))
                as Box<dyn std::error::Error + Send + Sync>
        })
    }

    pub fn to_json(&self) -> GantryResult<String> {
        serde_json::to_string(self).map_err(|err| {
            Box::new(ConfigError(format!("runner config serialization failed: {err}")))
                as Box<dyn std::error::Error + Send + Sync>
        })
    }

    pub fn from_env() -> GantryResult<Self> {
        let raw = std::env::var(RUNNER_CONFIG_ENV_VAR).map_err(|_| {
            Box::new(ConfigError(format!("{RUNNER_CONFIG_ENV_VAR} is not set")))
                as Box<dyn std::error::Error + Send + Sync>
        })?;
        Self::from_json(&raw)
    }
}
