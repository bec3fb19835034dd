use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gantry_core::config::{render_template, DEFAULT_RESOURCE_KEY};
use gantry_core::{load_config, ConfigError, GantryResult};

mod output;

use output::{format_resolve_output, OutputMode, ResolveSource};

#[derive(Parser, Debug)]
#[command(
    name = "gantry",
    version = env!("GANTRY_VERSION"),
    about = "Azure ML integration plugin for YAML-driven pipelines"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a starter configuration file
    Init {
        #[arg(long)]
        cluster_name: String,
        #[arg(long)]
        experiment_name: String,
        #[arg(long)]
        resource_group: String,
        #[arg(long)]
        workspace_name: String,
        #[arg(long)]
        storage_account_name: String,
        #[arg(long)]
        storage_container: String,
        #[arg(long)]
        docker_image: String,
        #[arg(short, long, default_value = "gantry.yml")]
        output: PathBuf,
        #[arg(long)]
        force: bool,
    },
    /// Parse and validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Print the compute cluster a resource role resolves to
    Resolve {
        #[arg(short, long)]
        config: PathBuf,
        role: String,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> GantryResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Init {
            cluster_name,
            experiment_name,
            resource_group,
            workspace_name,
            storage_account_name,
            storage_container,
            docker_image,
            output,
            force,
        } => {
            let path = resolve_path(output)?;
            if path.exists() && !force {
                return Err(Box::new(ConfigError(format!(
                    "refusing to overwrite {}; pass --force to replace it",
                    path.display()
                ))));
            }
            let mut vars = HashMap::new();
            for (key, value) in [
                ("cluster_name", cluster_name),
                ("experiment_name", experiment_name),
                ("resource_group", resource_group),
                ("workspace_name", workspace_name),
                ("storage_account_name", storage_account_name),
                ("storage_container", storage_container),
                ("docker_image", docker_image),
            ] {
                vars.insert(key.to_string(), value);
            }
            let rendered = render_template(&vars)?;
            fs::write(&path, rendered)?;
            println!("Wrote starter config to {}", path.display());
            Ok(())
        }
        Command::Validate { config } => {
            let config_path = resolve_path(config)?;
            load_config(&config_path)?;
            println!(
                "Your config file at location {} is valid.",
                config_path.to_str().unwrap_or("default")
            );
            Ok(())
        }
        Command::Resolve { config, role, json } => {
            let config_path = resolve_path(config)?;
            let config = load_config(&config_path)?;
            let resolved = config.resources.resolve(&role);
            let source = if role != DEFAULT_RESOURCE_KEY && config.resources.is_override(&role) {
                ResolveSource::Override
            } else {
                ResolveSource::Default
            };
            let mode = if json {
                OutputMode::Json
            } else {
                OutputMode::Text
            };
            println!("{}", format_resolve_output(&role, &resolved, source, mode)?);
            Ok(())
        }
    }
}

fn resolve_path(path: PathBuf) -> GantryResult<PathBuf> {
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
