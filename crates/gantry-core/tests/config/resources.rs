use gantry_core::load_config_str;

fn config_with_resources(resources_yaml: &str) -> String {
    format!(
        r#"experiment_name: "churn"
workspace_name: "ml-workspace"
resource_group: "ml-rg"
cluster_name: "base-cluster"
storage:
  account_name: "mlstorage"
  container: "pipelines"
docker:
  image: "gantry/runtime:latest"
{resources_yaml}"#
    )
}

#[test]
fn override_precedence() {
    let yaml = config_with_resources(
        r#"resources:
  __default__:
    cluster_name: "A"
  foo:
    cluster_name: "B"
"#,
    );
    let config = load_config_str(&yaml).expect("load config");
    assert_eq!(config.resources.resolve("foo").cluster_name, "B");
    assert_eq!(config.resources.resolve("bar").cluster_name, "A");
}

#[test]
fn resolve_is_idempotent() {
    let yaml = config_with_resources(
        r#"resources:
  __default__:
    cluster_name: "A"
  foo:
    cluster_name: "B"
"#,
    );
    let config = load_config_str(&yaml).expect("load config");
    assert_eq!(config.resources.resolve("foo"), config.resources.resolve("foo"));
    assert_eq!(config.resources.resolve("bar"), config.resources.resolve("bar"));
}

#[test]
fn resolve_never_fails_for_any_key() {
    let yaml = config_with_resources("");
    let config = load_config_str(&yaml).expect("load config");
    for key in ["", "  ", "__default__", "__default__suffix", "no-such-role"] {
        assert_eq!(config.resources.resolve(key).cluster_name, "base-cluster");
    }
}

#[test]
fn partial_override_inherits_default_fields() {
    let yaml = config_with_resources(
        r#"resources:
  __default__:
    cluster_name: "A"
  sparse: {}
"#,
    );
    let config = load_config_str(&yaml).expect("load config");
    assert!(config.resources.is_override("sparse"));
    assert_eq!(config.resources.resolve("sparse").cluster_name, "A");
}

#[test]
fn end_to_end_example() {
    let yaml = config_with_resources(
        r#"resources:
  __default__:
    cluster_name: "base-cluster"
  chunky:
    cluster_name: "chunky-cpu-cluster"
"#,
    );
    let config = load_config_str(&yaml).expect("load config");
    assert_eq!(
        config.resources.resolve("chunky").cluster_name,
        "chunky-cpu-cluster"
    );
    assert_eq!(
        config.resources.resolve("anything-else").cluster_name,
        "base-cluster"
    );
}
