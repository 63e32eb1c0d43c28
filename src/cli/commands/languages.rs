//! `repolint languages`: print the languages present in the candidate files
//!
//! Hook scripts use this to decide which linters and test runners to invoke.

use super::{OutputFormat, SelectionArgs};
use crate::cli::CommandContext;
use crate::config::PolicyConfig;
use crate::files;
use crate::languages;
use anyhow::{Context, Result};
use clap::Args;
use std::process::ExitCode;

#[derive(Args, Debug, Default)]
pub struct LanguagesArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Execute the languages command
pub fn execute(args: LanguagesArgs, context: &CommandContext) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Cannot determine current directory")?;
    let root = files::repository_root(&cwd);
    let config = PolicyConfig::load(&root, context.config.as_deref(), None)?;

    let file_set = files::enumerate(
        args.selection.mode(),
        &root,
        &config.files.all_excluded_dirs(),
    );
    for warning in &file_set.warnings {
        context.output.warning(&warning.to_string());
    }

    let detected = languages::classify_all(&file_set.records);
    tracing::info!("Detected {} languages in {} files", detected.len(), file_set.len());

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string(&detected).context("Failed to serialize languages")?;
            context.output.plain(&json);
        }
        OutputFormat::Text => {
            for language in &detected {
                context.output.plain(language.as_str());
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
