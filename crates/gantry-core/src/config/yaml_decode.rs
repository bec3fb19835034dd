use std::path::Path;

use yaml_rust2::yaml::Hash;
use yaml_rust2::{Yaml, YamlLoader};

use crate::{ConfigError, GantryResult};

pub(crate) fn load_yaml(path: &Path) -> GantryResult<Vec<Yaml>> {
    let contents = std::fs::read_to_string(path)?;
    let docs = YamlLoader::load_from_str(&contents)?;
    Ok(docs)
}

pub(crate) fn load_yaml_str(contents: &str) -> GantryResult<Vec<Yaml>> {
    let docs = YamlLoader::load_from_str(contents)?;
    Ok(docs)
}

pub(crate) fn yaml_hash<'a>(value: &'a Yaml, ctx: &str) -> GantryResult<&'a Hash> {
    match value {
        Yaml::Hash(hash) => Ok(hash),
        _ => Err(Box::new(ConfigError(format!("expected map at {ctx}")))),
    }
}

pub(crate) fn yaml_string(value: &Yaml, ctx: &str) -> GantryResult<String> {
    match value {
        Yaml::String(value) => Ok(value.clone()),
        _ => Err(Box::new(ConfigError(format!("expected string at {ctx}")))),
    }
}

pub(crate) fn hash_get<'a>(hash: &'a Hash, key: &str) -> Option<&'a Yaml> {
    hash.get(&Yaml::String(key.to_string()))
}

pub(crate) fn validate_known_keys(hash: &Hash, ctx: &str, allowed: &[&str]) -> GantryResult<()> {
    for key in hash.keys() {
        let key = yaml_string(key, ctx)?;
        if !allowed.contains(&key.as_str()) {
            return Err(Box::new(ConfigError(format!(
                "unknown field {ctx}.{key} (allowed: {})",
                allowed.join(", ")
            ))));
        }
    }
    Ok(())
}
