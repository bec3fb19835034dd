use std::collections::HashMap;

use crate::config::{PartialResourceConfig, ResourceConfig};

/// Key under which the fallback record is stored in the raw document.
pub const DEFAULT_RESOURCE_KEY: &str = "__default__";

/// Per-role compute configuration with a guaranteed fallback.
#[derive(Debug, Clone)]
pub struct ResourceTable {
    default: ResourceConfig,
    overrides: HashMap<String, PartialResourceConfig>,
}

impl ResourceTable {
    pub fn new(
        default: ResourceConfig,
        overrides: HashMap<String, PartialResourceConfig>,
    ) -> Self {
        Self { default, overrides }
    }

    pub fn default_record(&self) -> &ResourceConfig {
        &self.default
    }

    pub fn overrides(&self) -> &HashMap<String, PartialResourceConfig> {
        &self.overrides
    }

    pub fn is_override(&self, key: &str) -> bool {
        self.overrides.contains_key(key)
    }

    /// Field-level merge of the stored override onto the default record.
    /// Never fails: keys without an entry resolve to the default.
    pub fn resolve(&self, key: &str) -> ResourceConfig {
        if key == DEFAULT_RESOURCE_KEY {
            return self.default.clone();
        }
        let mut resolved = self.default.clone();
        if let Some(partial) = self.overrides.get(key) {
            if let Some(cluster_name) = &partial.cluster_name {
                resolved.cluster_name = cluster_name.clone();
            }
        }
        resolved
    }
}
