//! `repolint check`: run the policy rules and report violations

use super::{OutputFormat, SelectionArgs};
use crate::cli::{CommandContext, EXIT_PASSED, EXIT_VIOLATIONS, Output, absolute};
use crate::config::{CliOverrides, PolicyConfig};
use crate::files::{self, EnumerationMode};
use crate::parallel::ParallelMode;
use crate::policy::exceptions::load_patterns;
use crate::policy::{PolicyRunner, Report};
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Maximum lines per source file
    #[arg(long, value_name = "N")]
    pub max_lines: Option<usize>,

    /// File of glob patterns exempt from the line limit
    #[arg(long, value_name = "FILE")]
    pub exceptions: Option<PathBuf>,

    /// File listing doc names allowed at the repository root, one per line
    #[arg(long, value_name = "FILE")]
    pub docs_allowlist: Option<PathBuf>,

    /// Directory documentation must live in
    #[arg(long, value_name = "NAME")]
    pub docs_dir: Option<String>,

    /// Line counting strategy
    #[arg(long, value_enum)]
    pub mode: Option<ParallelMode>,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl CheckArgs {
    /// Flags given on the command line, as config overrides
    fn overrides(&self) -> Result<CliOverrides> {
        let exceptions_file = self
            .exceptions
            .as_deref()
            .map(absolute)
            .transpose()?
            .map(|path| path.to_string_lossy().into_owned());

        let allowed_root_docs = self
            .docs_allowlist
            .as_deref()
            .map(load_patterns)
            .transpose()
            .context("Failed to load docs allowlist")?;

        Ok(CliOverrides {
            max_lines: self.max_lines,
            exceptions_file,
            docs_dir: self.docs_dir.clone(),
            allowed_root_docs,
            mode: self.mode,
        })
    }
}

/// Execute the check command
pub fn execute(args: CheckArgs, context: &CommandContext) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Cannot determine current directory")?;
    let root = files::repository_root(&cwd);

    // Everything that can make the run impossible happens before enumeration
    let config = PolicyConfig::load(&root, context.config.as_deref(), Some(args.overrides()?))?;
    let runner = PolicyRunner::from_config(&config, &root)?;

    let mode = args.selection.mode();
    let file_set = files::enumerate(mode, &root, &config.files.all_excluded_dirs());
    let report = runner.run(&file_set);

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            context.output.plain(&json);
        }
        OutputFormat::Text => print_report(&context.output, mode, file_set.len(), &report),
    }

    Ok(ExitCode::from(if report.passed() {
        EXIT_PASSED
    } else {
        EXIT_VIOLATIONS
    }))
}

fn print_report(output: &Output, mode: EnumerationMode, checked: usize, report: &Report) {
    output.verbose(&format!("Checked {checked} files ({mode})"));

    for warning in report.warnings() {
        output.warning(&warning.to_string());
    }

    if report.passed() {
        if checked == 0 {
            output.info(&format!("No files to check ({mode})"));
        } else {
            output.success(&format!("All policy checks passed ({checked} files)"));
        }
        return;
    }

    for (rule, violations) in report.by_rule() {
        output.section_header(&format!("{} [{}]", rule.title(), rule), violations.len());
        for violation in violations {
            output.file_issue(violation.file(), &violation.message());
        }
    }

    let total = report.violations().len();
    output.failure_summary(&format!(
        "{total} policy {} found",
        if total == 1 { "violation" } else { "violations" }
    ));
}
