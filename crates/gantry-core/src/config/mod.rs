mod parse;
mod resources;
mod runner;
mod template;
mod types;
mod validate;
mod yaml_decode;

pub use resources::{ResourceTable, DEFAULT_RESOURCE_KEY};
pub use runner::{RunnerConfig, RUNNER_CONFIG_ENV_VAR};
pub use template::{render_template, CONFIG_TEMPLATE_YAML};
pub use types::*;

pub(crate) use parse::{parse_config, parse_config_str};
pub(crate) use validate::validate_config;
