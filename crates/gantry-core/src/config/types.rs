use serde::{Deserialize, Serialize};

use crate::config::ResourceTable;

#[derive(Debug)]
pub struct RootConfig {
    pub experiment_name: String,
    pub workspace_name: String,
    pub resource_group: String,
    pub cluster_name: String,
    pub storage: StorageConfig,
    pub docker: DockerConfig,
    pub resources: ResourceTable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub account_name: String,
    pub container: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockerConfig {
    pub image: String,
}

/// Compute target for one named resource role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceConfig {
    pub cluster_name: String,
}

/// A field overrides the default only when it is explicitly set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialResourceConfig {
    pub cluster_name: Option<String>,
}
