//! Command-line interface for repolint
//!
//! clap-derived argument parsing, logging setup and dispatch to the
//! subcommand implementations in [`commands`].

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

mod commands;
mod output;

pub use commands::check::CheckArgs;
pub use commands::config::{ConfigArgs, ConfigCommands};
pub use commands::languages::LanguagesArgs;
pub use commands::{OutputFormat, SelectionArgs};
pub use output::Output;

/// All policies passed
pub const EXIT_PASSED: u8 = 0;
/// At least one violation was reported
pub const EXIT_VIOLATIONS: u8 = 1;
/// Configuration or argument problem; no policy was evaluated
pub const EXIT_CANNOT_RUN: u8 = 2;

/// repolint - repository policy checks for git hooks and CI
#[derive(Parser, Debug)]
#[command(
    name = "repolint",
    version,
    about,
    long_about = "repolint checks staged files (or the whole tree) against repository policy: \
                  source files must stay under a line limit and documentation must live in the \
                  docs directory. Exit status is 0 when all checks pass, 1 when violations are \
                  found and 2 when the check cannot run."
)]
pub struct Cli {
    /// Run as if started in <DIR> instead of current working directory
    #[arg(short = 'C', long = "directory", value_name = "DIR", global = true)]
    pub directory: Option<PathBuf>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use custom configuration file (TOML, JSON or YAML)
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check staged files (default) or the whole tree against repository policy
    Check(CheckArgs),
    /// Print the languages present in the candidate files
    Languages(LanguagesArgs),
    /// Configuration management
    Config(ConfigArgs),
    /// Show version information
    Version,
}

/// State shared by every subcommand
pub struct CommandContext {
    pub output: Output,
    /// Absolute path of `--config`, if given
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Execute the CLI command, returning the process exit status
    pub fn run(self) -> Result<ExitCode> {
        // Change directory if specified
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)
                .with_context(|| format!("Cannot change directory to {}", dir.display()))?;
        }

        // Set up logging based on verbosity
        setup_logging(self.verbose, self.quiet);

        let context = CommandContext {
            output: Output::new(self.verbose > 0, self.quiet),
            config: self.config.as_deref().map(absolute).transpose()?,
        };

        match self.command {
            Some(Commands::Check(args)) => commands::check::execute(args, &context),
            Some(Commands::Languages(args)) => commands::languages::execute(args, &context),
            Some(Commands::Config(args)) => commands::config::execute(args, &context),
            Some(Commands::Version) => commands::version::execute(&context),
            // Hooks call plain `repolint`; behave like `repolint check`
            None => commands::check::execute(CheckArgs::default(), &context),
        }
    }
}

/// Resolve a user-supplied path against the current directory
pub(crate) fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).with_context(|| format!("Invalid path: {}", path.display()))
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    // RUST_LOG wins over -v; ignore's walker is chatty below warn
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info,ignore=warn"),
            2 => tracing_subscriber::EnvFilter::new("debug,ignore=warn"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
