use std::collections::HashMap;

use gantry_core::config::render_template;
use gantry_core::load_config_str;

fn sample_vars() -> HashMap<String, String> {
    let mut vars = HashMap::new();
    for (key, value) in [
        ("cluster_name", "base-cluster"),
        ("experiment_name", "churn"),
        ("resource_group", "ml-rg"),
        ("workspace_name", "ml-workspace"),
        ("storage_account_name", "mlstorage"),
        ("storage_container", "pipelines"),
        ("docker_image", "gantry/runtime:latest"),
    ] {
        vars.insert(key.to_string(), value.to_string());
    }
    vars
}

#[test]
fn rendered_template_parses_and_validates() {
    let rendered = render_template(&sample_vars()).expect("render template");
    let config = load_config_str(&rendered).expect("rendered template must be valid");

    assert_eq!(config.experiment_name, "churn");
    assert_eq!(config.cluster_name, "base-cluster");
    assert_eq!(config.storage.account_name, "mlstorage");
    assert_eq!(config.docker.image, "gantry/runtime:latest");
    assert_eq!(
        config.resources.default_record().cluster_name,
        "base-cluster"
    );
    assert_eq!(
        config.resources.resolve("any-role").cluster_name,
        "base-cluster"
    );
}

#[test]
fn missing_variable_errors_with_name() {
    let mut vars = sample_vars();
    vars.remove("docker_image");
    let err = render_template(&vars).expect_err("expected error");
    assert!(err.to_string().contains("docker_image"));
}
