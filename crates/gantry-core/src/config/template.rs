use std::collections::HashMap;

use crate::{ConfigError, GantryResult};

/// Starter configuration written by `gantry init`.
pub const CONFIG_TEMPLATE_YAML: &str = r#"# Azure ML compute cluster used when a pipeline node has no resource entry
cluster_name: "{{cluster_name}}"
# Azure ML experiment to group runs under
experiment_name: "{{experiment_name}}"
# Azure resource group the workspace lives in
resource_group: "{{resource_group}}"
# Azure ML workspace name
workspace_name: "{{workspace_name}}"

# Temporary storage used to pass data between pipeline steps when a dataset
# is not bound explicitly in the catalog. Run data lands under
# gantry-temp/<run_id>/ in the container; set a lifecycle management rule on
# the container so old runs expire instead of accruing storage costs.
storage:
  account_name: "{{storage_account_name}}"
  container: "{{storage_container}}"

# Docker image the pipeline nodes run in
docker:
  image: "{{docker_image}}"

resources:
  __default__:
    cluster_name: "{{cluster_name}}"
  # Role keys override only the fields they set; everything else inherits
  # from __default__. For example:
  # chunky:
  #   cluster_name: "chunky-cpu-cluster"
"#;

pub fn render_template(vars: &HashMap<String, String>) -> GantryResult<String> {
    replace_placeholders(CONFIG_TEMPLATE_YAML, vars, "config template")
}

fn replace_placeholders(
    value: &str,
    vars: &HashMap<String, String>,
    ctx: &str,
) -> GantryResult<String> {
    let mut result = String::new();
    let mut rest = value;
    while let Some(start) = rest.find("{{") {
        result.push_str(&rest[..start]);
        rest = &rest[start + 2..];
        let end = rest.find("}}").ok_or_else(|| {
            Box::new(ConfigError(format!("{ctx} missing closing '}}}}'")))
                as Box<dyn std::error::Error + Send + Sync>
        })?;
        let key = rest[..end].trim();
        if key.is_empty() {
            return Err(Box::new(ConfigError(format!("{ctx} empty placeholder"))));
        }
        let replacement = vars.get(key).ok_or_else(|| {
            Box::new(ConfigError(format!(
                "{ctx} references unknown variable {key}"
            ))) as Box<dyn std::error::Error + Send + Sync>
        })?;
        result.push_str(replacement);
        rest = &rest[end + 2..];
    }
    result.push_str(rest);
    Ok(result)
}
