use gantry_core::config::ResourceConfig;
use gantry_core::GantryResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveSource {
    Default,
    Override,
}

impl ResolveSource {
    fn as_str(self) -> &'static str {
        match self {
            ResolveSource::Default => "default",
            ResolveSource::Override => "override",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    Json,
}

pub fn format_resolve_output(
    role: &str,
    resolved: &ResourceConfig,
    source: ResolveSource,
    mode: OutputMode,
) -> GantryResult<String> {
    match mode {
        OutputMode::Text => Ok(format!(
            "role {} resolves to cluster {} ({})",
            role,
            resolved.cluster_name,
            source.as_str()
        )),
        OutputMode::Json => {
            let value = serde_json::json!({
                "role": role,
                "cluster_name": resolved.cluster_name,
                "source": source.as_str(),
            });
            Ok(serde_json::to_string_pretty(&value)?)
        }
    }
}
