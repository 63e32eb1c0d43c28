use crate::cli::CommandContext;
use crate::config::PolicyConfig;
use crate::files;
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::process::ExitCode;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective, merged configuration
    Show {
        /// Output format
        #[arg(long, value_enum, default_value = "toml")]
        format: ConfigFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ConfigFormat {
    Toml,
    Json,
}

pub fn execute(args: ConfigArgs, context: &CommandContext) -> Result<ExitCode> {
    match args.command {
        ConfigCommands::Show { format } => show(format, context),
    }
}

fn show(format: ConfigFormat, context: &CommandContext) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Cannot determine current directory")?;
    let root = files::repository_root(&cwd);
    let config = PolicyConfig::load(&root, context.config.as_deref(), None)?;

    let rendered = match format {
        ConfigFormat::Toml => {
            toml::to_string_pretty(&config).context("Failed to serialize config to TOML")?
        }
        ConfigFormat::Json => {
            serde_json::to_string_pretty(&config).context("Failed to serialize config to JSON")?
        }
    };
    context.output.plain(rendered.trim_end());

    Ok(ExitCode::SUCCESS)
}
