use super::GitRepo;
use anyhow::{Context, Result};
use git2::{Status, StatusOptions};

impl GitRepo {
    /// Get files staged for commit as added or modified (deletions excluded)
    ///
    /// Paths are relative to the working directory with `/` separators, as
    /// git reports them. Rename detection is off, so a staged rename shows up
    /// as its new path only.
    pub fn get_staged_files(&self) -> Result<Vec<String>> {
        let mut status_opts = StatusOptions::new();
        status_opts.include_ignored(false);
        status_opts.include_untracked(false);

        let statuses = self
            .repo
            .statuses(Some(&mut status_opts))
            .context("Failed to get repository status")?;

        let mut files = Vec::new();
        for entry in statuses.iter() {
            if entry
                .status()
                .intersects(Status::INDEX_NEW | Status::INDEX_MODIFIED)
            {
                match entry.path() {
                    Some(path) => files.push(path.to_string()),
                    None => tracing::debug!("Skipping staged entry with non UTF-8 path"),
                }
            }
        }

        tracing::debug!("Found {} staged files", files.len());
        Ok(files)
    }
}
