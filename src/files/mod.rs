//! Candidate file enumeration
//!
//! Produces the set of files a policy run looks at: either the files staged
//! for the next commit (hook context) or every file in the working tree
//! (manual/CI context). Enumeration never fails; anything that goes wrong is
//! reported as a [`Warning`] alongside whatever was collected.

pub mod directory;

use crate::git::GitRepo;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

pub use directory::DEFAULT_EXCLUDED_DIRS;

/// Where candidate files come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnumerationMode {
    /// Added/copied/modified files in the git index
    Staged,
    /// Recursive walk of the repository root
    FullTree,
}

impl fmt::Display for EnumerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumerationMode::Staged => write!(f, "staged files"),
            EnumerationMode::FullTree => write!(f, "full tree"),
        }
    }
}

/// One file under consideration, addressed relative to the repository root
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FileRecord {
    path: String,
    extension: String,
}

impl FileRecord {
    /// Build a record from a root-relative path. Separators are normalized to `/`.
    pub fn new(path: impl AsRef<str>) -> Self {
        let path = normalize_path(path.as_ref());
        let extension = extension_of(&path);
        Self { path, extension }
    }

    pub fn from_relative(path: &Path) -> Self {
        Self::new(path.to_string_lossy())
    }

    /// Root-relative path with forward slashes
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Lower-cased extension including the leading dot, empty when there is none
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// True when the file sits directly in the repository root
    pub fn is_root_level(&self) -> bool {
        !self.path.contains('/')
    }

    /// First path component for nested files
    pub fn top_level_dir(&self) -> Option<&str> {
        self.path.split_once('/').map(|(top, _)| top)
    }
}

fn normalize_path(path: &str) -> String {
    let path = if cfg!(windows) {
        path.replace('\\', "/")
    } else {
        path.to_string()
    };
    path.trim_start_matches("./").to_string()
}

fn extension_of(path: &str) -> String {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        // ".gitignore" is a name, not an extension
        None | Some(0) => String::new(),
        Some(idx) => name[idx..].to_ascii_lowercase(),
    }
}

/// Kind of non-fatal problem collected during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningCategory {
    Enumeration,
    FileRead,
}

/// Non-fatal problem; printed but never fails the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub category: WarningCategory,
    pub message: String,
}

impl Warning {
    pub fn enumeration(message: impl Into<String>) -> Self {
        Self {
            category: WarningCategory::Enumeration,
            message: message.into(),
        }
    }

    pub fn file_read(message: impl Into<String>) -> Self {
        Self {
            category: WarningCategory::FileRead,
            message: message.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Output of enumeration: the effective root, the records and any warnings
#[derive(Debug, Clone)]
pub struct FileSet {
    /// Directory the record paths are relative to
    pub root: PathBuf,
    pub records: Vec<FileRecord>,
    pub warnings: Vec<Warning>,
}

impl FileSet {
    /// Build a file set, dropping duplicate paths but keeping first-seen order
    pub fn new(root: impl Into<PathBuf>, records: impl IntoIterator<Item = FileRecord>) -> Self {
        let mut seen = HashSet::new();
        let records = records
            .into_iter()
            .filter(|record| seen.insert(record.path().to_string()))
            .collect();

        Self {
            root: root.into(),
            records,
            warnings: Vec::new(),
        }
    }

    /// An empty set carrying a single warning
    pub fn with_warning(root: impl Into<PathBuf>, warning: Warning) -> Self {
        Self {
            root: root.into(),
            records: Vec::new(),
            warnings: vec![warning],
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Produce the candidate file set for `mode`
///
/// `excluded_dirs` only applies to [`EnumerationMode::FullTree`]; the staged
/// list is taken as git reports it.
pub fn enumerate(mode: EnumerationMode, root: &Path, excluded_dirs: &[String]) -> FileSet {
    tracing::debug!("Enumerating {} from {}", mode, root.display());

    let file_set = match mode {
        EnumerationMode::Staged => staged_files(root),
        EnumerationMode::FullTree => directory::walk(root, excluded_dirs),
    };

    tracing::info!(
        "Enumerated {} candidate files ({} warnings)",
        file_set.len(),
        file_set.warnings.len()
    );
    file_set
}

/// Work directory of the repository containing `start`, or `start` itself
/// when it is not inside a git repository
pub fn repository_root(start: &Path) -> PathBuf {
    GitRepo::discover_from(start)
        .ok()
        .and_then(|repo| repo.workdir().map(Path::to_path_buf))
        .unwrap_or_else(|| start.to_path_buf())
}

fn staged_files(root: &Path) -> FileSet {
    let repo = match GitRepo::discover_from(root) {
        Ok(repo) => repo,
        Err(e) => {
            tracing::warn!("Cannot query staged files: {e:#}");
            return FileSet::with_warning(
                root,
                Warning::enumeration(format!("Cannot query staged files: {e:#}")),
            );
        }
    };

    let workdir = repo
        .workdir()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.to_path_buf());

    match repo.get_staged_files() {
        Ok(paths) => FileSet::new(workdir, paths.iter().map(FileRecord::new)),
        Err(e) => {
            tracing::warn!("Cannot query staged files: {e:#}");
            FileSet::with_warning(
                workdir,
                Warning::enumeration(format!("Cannot query staged files: {e:#}")),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Repository, Signature};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_file_record_extension() {
        assert_eq!(FileRecord::new("src/App.TSX").extension(), ".tsx");
        assert_eq!(FileRecord::new("Makefile").extension(), "");
        assert_eq!(FileRecord::new(".gitignore").extension(), "");
        assert_eq!(FileRecord::new("dir.d/file").extension(), "");
        assert_eq!(FileRecord::new("archive.tar.gz").extension(), ".gz");
    }

    #[test]
    fn test_file_record_location() {
        let root = FileRecord::new("NOTES.md");
        assert!(root.is_root_level());
        assert_eq!(root.top_level_dir(), None);
        assert_eq!(root.file_name(), "NOTES.md");

        let nested = FileRecord::new("./docs/guide/intro.md");
        assert_eq!(nested.path(), "docs/guide/intro.md");
        assert!(!nested.is_root_level());
        assert_eq!(nested.top_level_dir(), Some("docs"));
        assert_eq!(nested.file_name(), "intro.md");
    }

    #[test]
    fn test_file_set_dedup_keeps_first_order() {
        let set = FileSet::new(
            "/repo",
            ["b.ts", "a.ts", "b.ts", "./a.ts"].into_iter().map(FileRecord::new),
        );
        let paths: Vec<&str> = set.records.iter().map(FileRecord::path).collect();
        assert_eq!(paths, vec!["b.ts", "a.ts"]);
    }

    #[test]
    fn test_staged_outside_repository_warns() {
        let temp_dir = TempDir::new().unwrap();
        let set = enumerate(EnumerationMode::Staged, temp_dir.path(), &[]);

        assert!(set.is_empty());
        assert_eq!(set.warnings.len(), 1);
        assert_eq!(set.warnings[0].category, WarningCategory::Enumeration);
    }

    #[test]
    fn test_repository_root_falls_back_to_start() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(repository_root(temp_dir.path()), temp_dir.path());
    }

    #[test]
    fn test_repository_root_from_subdirectory() {
        let temp_dir = TempDir::new().unwrap();
        Repository::init(temp_dir.path()).unwrap();
        let nested = temp_dir.path().join("src/deep");
        fs::create_dir_all(&nested).unwrap();

        let root = repository_root(&nested);
        assert_eq!(
            root.canonicalize().unwrap(),
            temp_dir.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_staged_lists_added_and_modified_only() {
        let temp_dir = TempDir::new().unwrap();
        let repo = Repository::init(temp_dir.path()).unwrap();
        fs::write(temp_dir.path().join("kept.ts"), "a\n").unwrap();
        fs::write(temp_dir.path().join("gone.ts"), "a\n").unwrap();

        // Initial commit with both files
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("kept.ts")).unwrap();
        index.add_path(Path::new("gone.ts")).unwrap();
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
        let sig = Signature::now("test", "test@example.com").unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "init", &tree, &[]).unwrap();

        // Modify one, delete one, add one, leave one untracked
        fs::write(temp_dir.path().join("kept.ts"), "a\nb\n").unwrap();
        fs::write(temp_dir.path().join("new.md"), "# new\n").unwrap();
        fs::write(temp_dir.path().join("untracked.ts"), "x\n").unwrap();
        index.add_path(Path::new("kept.ts")).unwrap();
        index.add_path(Path::new("new.md")).unwrap();
        index.remove_path(Path::new("gone.ts")).unwrap();
        index.write().unwrap();

        let set = enumerate(EnumerationMode::Staged, temp_dir.path(), &[]);
        let mut paths: Vec<&str> = set.records.iter().map(FileRecord::path).collect();
        paths.sort();

        assert_eq!(paths, vec!["kept.ts", "new.md"]);
        assert!(set.warnings.is_empty());
    }
}
