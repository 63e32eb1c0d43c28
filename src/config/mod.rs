//! Configuration management for repolint
//!
//! Settings are layered with figment (see [`core`]) and extracted into the
//! typed [`PolicyConfig`], which is validated before any rule runs.

pub mod core;
pub mod overrides;

use crate::files::directory::default_excluded_dirs;
use crate::parallel::ParallelSettings;
use crate::policy::doc_location::{DEFAULT_ALLOWED_ROOT_DOCS, DEFAULT_DOCS_DIR};
use crate::policy::file_size::DEFAULT_MAX_LINES;
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

pub use overrides::CliOverrides;

/// Repository config file looked up at the repository root
pub const REPO_CONFIG_FILE: &str = "repolint.toml";

/// Prefix for environment overrides; nested keys are split on `__`
pub const ENV_PREFIX: &str = "REPOLINT_";

/// Effective, validated configuration for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PolicyConfig {
    pub rules: RulesConfig,
    pub files: FilesConfig,
    pub parallel: ParallelSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RulesConfig {
    pub file_size: FileSizeConfig,
    pub doc_location: DocLocationConfig,
}

/// File-size rule settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSizeConfig {
    pub enabled: bool,

    /// Files with more lines than this are violations
    pub max_lines: usize,

    /// Exception pattern file, relative to the repository root.
    /// When unset, `.repolint-exceptions` is used if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exceptions_file: Option<String>,
}

/// Documentation-location rule settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocLocationConfig {
    pub enabled: bool,

    /// Top-level directory where documentation lives
    pub docs_dir: String,

    /// Doc file names permitted at the repository root (case-sensitive)
    pub allowed_root_docs: Vec<String>,
}

/// Full-tree enumeration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilesConfig {
    /// Directory names never descended into
    pub excluded_dirs: Vec<String>,

    /// Added to `excluded_dirs` without restating the defaults
    #[serde(default)]
    pub extra_excluded_dirs: Vec<String>,
}

impl Default for FileSizeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_lines: DEFAULT_MAX_LINES,
            exceptions_file: None,
        }
    }
}

impl Default for DocLocationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            docs_dir: DEFAULT_DOCS_DIR.to_string(),
            allowed_root_docs: DEFAULT_ALLOWED_ROOT_DOCS
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            excluded_dirs: default_excluded_dirs(),
            extra_excluded_dirs: Vec::new(),
        }
    }
}

impl FilesConfig {
    /// Combined exclusion list, duplicates removed
    pub fn all_excluded_dirs(&self) -> Vec<String> {
        let mut dirs = self.excluded_dirs.clone();
        for dir in &self.extra_excluded_dirs {
            if !dirs.contains(dir) {
                dirs.push(dir.clone());
            }
        }
        dirs
    }
}

impl PolicyConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.rules.file_size.max_lines == 0 {
            bail!("rules.file_size.max_lines must be at least 1");
        }

        let docs_dir = &self.rules.doc_location.docs_dir;
        if docs_dir.trim().is_empty() {
            bail!("rules.doc_location.docs_dir cannot be empty");
        }
        if docs_dir.contains('/') || docs_dir.contains('\\') {
            bail!("rules.doc_location.docs_dir must be a single directory name, got '{docs_dir}'");
        }

        let percentage = self.parallel.thread_percentage;
        if !(1..=100).contains(&percentage) {
            bail!("parallel.thread_percentage must be between 1 and 100, got {percentage}");
        }

        Ok(())
    }
}
