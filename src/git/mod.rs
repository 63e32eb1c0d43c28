//! Git integration layer
//!
//! Thin wrapper over git2 used to locate the repository and query the index.

pub mod operations;

use anyhow::{Context, Result};
use git2::Repository;
use std::path::Path;

pub struct GitRepo {
    pub repo: Repository,
}

impl GitRepo {
    /// Discover the repository containing `path`, walking up parent directories
    pub fn discover_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Repository::discover(path)
            .with_context(|| format!("No Git repository found at {}", path.display()))?;

        Ok(GitRepo { repo })
    }

    /// Working directory of the repository; `None` for bare repositories
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }
}
