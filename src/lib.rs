//! # repolint - Repository policy checks for git hooks and CI
//!
//! repolint enforces a small set of repository conventions against either the
//! files staged for the next commit or the whole working tree:
//!
//! - **File size**: source files must stay under a line limit, with glob-based
//!   exceptions loaded from a policy file
//! - **Documentation layout**: documentation lives under `docs/`, apart from an
//!   allowlist of well-known root files (README.md, LICENSE, ...)
//! - **Language detection**: the set of languages present in the candidate
//!   files, used by hooks to decide which external linters to invoke
//!
//! ## Quick Start
//!
//! ```bash
//! # Check staged files (pre-commit)
//! repolint check
//!
//! # Check the whole tree with a custom limit
//! repolint check --all --max-lines 800
//!
//! # Which languages are being committed?
//! repolint languages --staged
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use repolint::config::PolicyConfig;
//! use repolint::files::{self, EnumerationMode};
//! use repolint::policy::PolicyRunner;
//! use std::path::Path;
//!
//! let root = Path::new(".");
//! let config = PolicyConfig::load(root, None, None)?;
//! let file_set = files::enumerate(EnumerationMode::FullTree, root, &config.files.all_excluded_dirs());
//! let runner = PolicyRunner::from_config(&config, &file_set.root)?;
//! let report = runner.run(&file_set);
//! println!("passed: {}", report.passed());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod files;
pub mod git;
pub mod languages;
pub mod parallel;
pub mod policy;

pub use cli::{Cli, Output};
pub use config::PolicyConfig;

/// Result type alias for repolint operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
