use crate::{ConfigError, GantryResult};

/// Prefix inside the configured container under which runner datasets
/// stage intermediate data. One directory per run id.
pub const TEMP_STORAGE_PREFIX: &str = "gantry-temp";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobLocation {
    pub account: String,
    pub container: String,
    pub path: String,
}

pub fn format_abfs_uri(container: &str, account: &str, path: &str) -> String {
    let trimmed = path.trim_start_matches('/');
    if trimmed.is_empty() {
        format!("abfs://{}@{}.dfs.core.windows.net", container, account)
    } else {
        format!(
            "abfs://{}@{}.dfs.core.windows.net/{}",
            container, account, trimmed
        )
    }
}

pub fn parse_abfs_uri(uri: &str) -> GantryResult<BlobLocation> {
    let stripped = uri.strip_prefix("abfs://").ok_or_else(|| {
        Box::new(ConfigError(format!("expected abfs uri, got {}", uri)))
            as Box<dyn std::error::Error + Send + Sync>
    })?;
    let (container, rest) = stripped.split_once('@').ok_or_else(|| {
        Box::new(ConfigError(format!("missing container in abfs uri: {}", uri)))
            as Box<dyn std::error::Error + Send + Sync>
    })?;
    let (account, path) = rest.split_once(".dfs.core.windows.net").ok_or_else(|| {
        Box::new(ConfigError(format!("missing account in abfs uri: {}", uri)))
            as Box<dyn std::error::Error + Send + Sync>
    })?;
    if container.is_empty() || account.is_empty() {
        return Err(Box::new(ConfigError(format!(
            "missing container or account in abfs uri: {}",
            uri
        ))));
    }
    Ok(BlobLocation {
        account: account.to_string(),
        container: container.to_string(),
        path: path.trim_start_matches('/').to_string(),
    })
}

pub fn join_blob_path(prefix: &str, relative: &str) -> String {
    let prefix = prefix.trim_matches('/');
    let trimmed = relative.trim_start_matches('/');
    match (prefix.is_empty(), trimmed.is_empty()) {
        (true, true) => String::new(),
        (true, false) => trimmed.to_string(),
        (false, true) => prefix.to_string(),
        (false, false) => format!("{}/{}", prefix, trimmed),
    }
}

/// Blob key under which a runner dataset stages one intermediate value.
pub fn temp_blob_path(run_id: &str, dataset_name: &str) -> String {
    format!("{TEMP_STORAGE_PREFIX}/{run_id}/{dataset_name}.bin")
}
