use crate::config::RootConfig;
use crate::{ConfigError, GantryResult};

pub(crate) fn validate_config(config: &RootConfig) -> GantryResult<()> {
    require_non_empty(&config.experiment_name, "root.experiment_name")?;
    require_non_empty(&config.workspace_name, "root.workspace_name")?;
    require_non_empty(&config.resource_group, "root.resource_group")?;
    require_non_empty(&config.cluster_name, "root.cluster_name")?;
    require_non_empty(&config.storage.account_name, "storage.account_name")?;
    require_non_empty(&config.storage.container, "storage.container")?;
    require_non_empty(&config.docker.image, "docker.image")?;
    require_non_empty(
        &config.resources.default_record().cluster_name,
        "resources.__default__.cluster_name",
    )?;

    for (key, record) in config.resources.overrides() {
        if let Some(cluster_name) = &record.cluster_name {
            require_non_empty(cluster_name, &format!("resources.{key}.cluster_name"))?;
        }
    }

    Ok(())
}

fn require_non_empty(value: &str, field: &str) -> GantryResult<()> {
    if value.trim().is_empty() {
        return Err(Box::new(ConfigError(format!(
            "{field} must not be empty"
        ))));
    }
    Ok(())
}
