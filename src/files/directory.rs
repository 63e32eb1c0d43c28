//! Full-tree enumeration
//!
//! Walks the repository root and prunes excluded directories before
//! descending into them, so build outputs and dependency caches are never
//! read, let alone reported on.

use super::{FileRecord, FileSet, Warning};
use ignore::WalkBuilder;
use std::collections::HashSet;
use std::path::Path;

/// Directory names skipped during a full-tree walk
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    // Version control
    ".git",
    ".svn",
    ".hg",
    // Node.js/JavaScript
    "node_modules",
    "dist",
    "build",
    ".next",
    ".nuxt",
    // Rust
    "target",
    // Python
    "__pycache__",
    ".pytest_cache",
    "venv",
    ".venv",
    // Go
    "vendor",
    // Java
    "out",
    // IDE
    ".vscode",
    ".idea",
    // Coverage
    "coverage",
    ".nyc_output",
];

/// Owned copy of [`DEFAULT_EXCLUDED_DIRS`]
pub fn default_excluded_dirs() -> Vec<String> {
    DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect()
}

/// Walk `root` recursively, skipping any directory named in `excluded_dirs`
///
/// Entries are visited in file-name order. Symlinks are not followed.
/// Unreadable subtrees become warnings and the walk carries on.
pub fn walk(root: &Path, excluded_dirs: &[String]) -> FileSet {
    let excluded: HashSet<String> = excluded_dirs.iter().cloned().collect();

    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
            // The root itself is never pruned, whatever its name
            !(is_dir
                && entry.depth() > 0
                && excluded.contains(entry.file_name().to_string_lossy().as_ref()))
        });

    let mut records = Vec::new();
    let mut warnings = Vec::new();

    for entry in builder.build() {
        match entry {
            Ok(entry) => {
                if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                    continue;
                }
                match entry.path().strip_prefix(root) {
                    Ok(relative) => records.push(FileRecord::from_relative(relative)),
                    Err(_) => {
                        tracing::debug!("Path outside walk root: {}", entry.path().display())
                    }
                }
            }
            Err(e) => {
                // Log but don't fail on permission errors
                tracing::warn!("Skipping unreadable path: {}", e);
                warnings.push(Warning::enumeration(format!("Skipped unreadable path: {e}")));
            }
        }
    }

    let mut file_set = FileSet::new(root, records);
    file_set.warnings = warnings;
    file_set
}
