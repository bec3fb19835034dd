use std::collections::HashMap;
use std::path::Path;

use yaml_rust2::yaml::Hash;
use yaml_rust2::Yaml;

use crate::config::resources::DEFAULT_RESOURCE_KEY;
use crate::config::yaml_decode::{
    hash_get, load_yaml, load_yaml_str, validate_known_keys, yaml_hash, yaml_string,
};
use crate::config::{
    DockerConfig, PartialResourceConfig, ResourceConfig, ResourceTable, RootConfig, StorageConfig,
};
use crate::{ConfigError, GantryResult};

pub(crate) fn parse_config(path: &Path) -> GantryResult<RootConfig> {
    parse_docs(load_yaml(path)?)
}

pub(crate) fn parse_config_str(contents: &str) -> GantryResult<RootConfig> {
    parse_docs(load_yaml_str(contents)?)
}

fn parse_docs(docs: Vec<Yaml>) -> GantryResult<RootConfig> {
    if docs.is_empty() {
        return Err(Box::new(ConfigError("YAML is empty".to_string())));
    }
    if docs.len() > 1 {
        return Err(Box::new(ConfigError(
            "YAML contains multiple documents; expected one".to_string(),
        )));
    }
    parse_root(&docs[0])
}

fn parse_root(doc: &Yaml) -> GantryResult<RootConfig> {
    let root = yaml_hash(doc, "root")?;
    validate_known_keys(
        root,
        "root",
        &[
            "experiment_name",
            "workspace_name",
            "resource_group",
            "cluster_name",
            "storage",
            "docker",
            "resources",
        ],
    )?;

    let cluster_name = get_string(root, "cluster_name", "root")?;
    let resources = parse_resources(hash_get(root, "resources"), &cluster_name)?;

    Ok(RootConfig {
        experiment_name: get_string(root, "experiment_name", "root")?,
        workspace_name: get_string(root, "workspace_name", "root")?,
        resource_group: get_string(root, "resource_group", "root")?,
        cluster_name,
        storage: parse_storage(get_value(root, "storage", "root")?)?,
        docker: parse_docker(get_value(root, "docker", "root")?)?,
        resources,
    })
}

fn parse_storage(value: &Yaml) -> GantryResult<StorageConfig> {
    let hash = yaml_hash(value, "storage")?;
    validate_known_keys(hash, "storage", &["account_name", "container"])?;
    Ok(StorageConfig {
        account_name: get_string(hash, "account_name", "storage")?,
        container: get_string(hash, "container", "storage")?,
    })
}

fn parse_docker(value: &Yaml) -> GantryResult<DockerConfig> {
    let hash = yaml_hash(value, "docker")?;
    validate_known_keys(hash, "docker", &["image"])?;
    Ok(DockerConfig {
        image: get_string(hash, "image", "docker")?,
    })
}

/// Builds the resource table. A missing `__default__` entry is synthesized
/// from the root cluster name, so every lookup stays resolvable.
fn parse_resources(
    value: Option<&Yaml>,
    root_cluster_name: &str,
) -> GantryResult<ResourceTable> {
    let mut default = None;
    let mut overrides = HashMap::new();

    if let Some(value) = value {
        let hash = yaml_hash(value, "resources")?;
        for (key, entry) in hash {
            let key = yaml_string(key, "resources")?;
            let ctx = format!("resources.{key}");
            let record = parse_partial_resource(entry, &ctx)?;
            if key == DEFAULT_RESOURCE_KEY {
                let cluster_name = record.cluster_name.ok_or_else(|| {
                    Box::new(ConfigError(format!(
                        "missing required field {ctx}.cluster_name"
                    ))) as Box<dyn std::error::Error + Send + Sync>
                })?;
                default = Some(ResourceConfig { cluster_name });
            } else {
                overrides.insert(key, record);
            }
        }
    }

    let default = default.unwrap_or_else(|| ResourceConfig {
        cluster_name: root_cluster_name.to_string(),
    });
    Ok(ResourceTable::new(default, overrides))
}

fn parse_partial_resource(value: &Yaml, ctx: &str) -> GantryResult<PartialResourceConfig> {
    let hash = yaml_hash(value, ctx)?;
    validate_known_keys(hash, ctx, &["cluster_name"])?;
    Ok(PartialResourceConfig {
        cluster_name: opt_string(hash, "cluster_name", ctx)?,
    })
}

fn get_value<'a>(hash: &'a Hash, key: &str, ctx: &str) -> GantryResult<&'a Yaml> {
    hash_get(hash, key).ok_or_else(|| {
        Box::new(ConfigError(format!("missing required field {ctx}.{key}")))
            as Box<dyn std::error::Error + Send + Sync>
    })
}

fn get_string(hash: &Hash, key: &str, ctx: &str) -> GantryResult<String> {
    let value = get_value(hash, key, ctx)?;
    yaml_string(value, &format!("{ctx}.{key}"))
}

fn opt_string(hash: &Hash, key: &str, ctx: &str) -> GantryResult<Option<String>> {
    match hash_get(hash, key) {
        None | Some(Yaml::Null) | Some(Yaml::BadValue) => Ok(None),
        Some(value) => Ok(Some(yaml_string(value, &format!("{ctx}.{key}"))?)),
    }
}
