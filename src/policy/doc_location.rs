//! Documentation-location rule
//!
//! Documentation belongs in the docs directory. The only docs allowed at
//! the repository root are the conventional ones listed in the allowlist.

use super::{DocLocationReason, Rule, RuleKind, RuleOutcome, Violation};
use crate::files::FileRecord;
use std::collections::BTreeSet;

/// Extensions that mark a file as documentation
pub const DOC_EXTENSIONS: &[&str] = &[".md", ".pdf", ".txt"];

pub const DEFAULT_DOCS_DIR: &str = "docs";

pub const DEFAULT_ALLOWED_ROOT_DOCS: &[&str] = &[
    "README.md",
    "LICENSE",
    "LICENSE.md",
    "LICENSE.txt",
    "CHANGELOG.md",
    "CONTRIBUTING.md",
    "CODE_OF_CONDUCT.md",
];

pub fn is_doc_file(record: &FileRecord) -> bool {
    DOC_EXTENSIONS.contains(&record.extension())
}

#[derive(Debug, Clone)]
pub struct DocLocationRule {
    allowed_root_docs: BTreeSet<String>,
    docs_dir: String,
}

impl Default for DocLocationRule {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_ROOT_DOCS, DEFAULT_DOCS_DIR)
    }
}

impl DocLocationRule {
    /// Allowlist entries are exact, case-sensitive file names
    pub fn new<S: AsRef<str>>(allowed_root_docs: &[S], docs_dir: impl Into<String>) -> Self {
        Self {
            allowed_root_docs: allowed_root_docs
                .iter()
                .map(|name| name.as_ref().to_string())
                .collect(),
            docs_dir: docs_dir.into(),
        }
    }

    /// Location verdict for one record; `None` when compliant or not a doc
    pub fn check(&self, record: &FileRecord) -> Option<DocLocationReason> {
        if !is_doc_file(record) {
            return None;
        }

        match record.top_level_dir() {
            None if self.allowed_root_docs.contains(record.file_name()) => None,
            None => Some(DocLocationReason::NotAllowedAtRoot),
            Some(dir) if dir == self.docs_dir => None,
            Some(_) => Some(DocLocationReason::OutsideDocsDir),
        }
    }
}

impl Rule for DocLocationRule {
    fn kind(&self) -> RuleKind {
        RuleKind::DocLocation
    }

    fn evaluate(&self, records: &[FileRecord]) -> RuleOutcome {
        let violations = records
            .iter()
            .filter_map(|record| {
                let reason = self.check(record)?;
                tracing::trace!("{}: {}", record.path(), reason);
                Some(Violation::doc_location(record.path(), reason))
            })
            .collect();

        RuleOutcome::from_violations(violations)
    }
}
