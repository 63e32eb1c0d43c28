//! Command implementations for the repolint CLI

use crate::files::EnumerationMode;
use clap::Args;

pub mod check;
pub mod config;
pub mod languages;
pub mod version;

/// Which files a command looks at
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct SelectionArgs {
    /// Use files staged for commit (default)
    #[arg(long, conflicts_with = "all")]
    pub staged: bool,

    /// Use every file in the working tree
    #[arg(long)]
    pub all: bool,
}

impl SelectionArgs {
    pub fn mode(&self) -> EnumerationMode {
        if self.all {
            EnumerationMode::FullTree
        } else {
            EnumerationMode::Staged
        }
    }
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, styled output
    #[default]
    Text,
    /// JSON for machine processing
    Json,
}
