//! Violations and the aggregate run report

use crate::files::Warning;
use serde::{Serialize, Serializer};
use std::fmt;

/// Policy rule identifiers, in their fixed evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    FileSize,
    DocLocation,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::FileSize => "file-size",
            RuleKind::DocLocation => "doc-location",
        }
    }

    /// Human-readable heading used when printing grouped violations
    pub fn title(&self) -> &'static str {
        match self {
            RuleKind::FileSize => "File size limit exceeded",
            RuleKind::DocLocation => "Documentation in the wrong place",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a documentation file is misplaced
///
/// Serializes as its reason text, the same text the terminal report shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocLocationReason {
    /// Root-level doc whose name is not allowlisted
    NotAllowedAtRoot,
    /// Nested somewhere other than the docs directory
    OutsideDocsDir,
}

impl DocLocationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocLocationReason::NotAllowedAtRoot => "not in allowed root docs list",
            DocLocationReason::OutsideDocsDir => "should be in the docs directory",
        }
    }
}

impl fmt::Display for DocLocationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DocLocationReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Rule-specific payload of a violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ViolationDetail {
    FileSize { line_count: usize, limit: usize },
    DocLocation { reason: DocLocationReason },
}

/// A single detected policy breach. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    rule: RuleKind,
    file: String,
    detail: ViolationDetail,
}

impl Violation {
    pub fn file_size(file: impl Into<String>, line_count: usize, limit: usize) -> Self {
        Self {
            rule: RuleKind::FileSize,
            file: file.into(),
            detail: ViolationDetail::FileSize { line_count, limit },
        }
    }

    pub fn doc_location(file: impl Into<String>, reason: DocLocationReason) -> Self {
        Self {
            rule: RuleKind::DocLocation,
            file: file.into(),
            detail: ViolationDetail::DocLocation { reason },
        }
    }

    pub fn rule(&self) -> RuleKind {
        self.rule
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    /// One-line reason suitable for terminal output
    pub fn message(&self) -> String {
        match &self.detail {
            ViolationDetail::FileSize { line_count, limit } => {
                format!("{line_count} lines (limit {limit})")
            }
            ViolationDetail::DocLocation { reason } => reason.to_string(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.rule, self.file, self.message())
    }
}

/// Aggregate outcome of one policy run
///
/// Violations keep rule evaluation order, then file encounter order.
/// Warnings are informational and never affect [`Report::passed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    passed: bool,
    violations: Vec<Violation>,
    warnings: Vec<Warning>,
}

impl Report {
    pub fn new(violations: Vec<Violation>, warnings: Vec<Warning>) -> Self {
        Self {
            passed: violations.is_empty(),
            violations,
            warnings,
        }
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Violations grouped per rule, groups in first-seen order
    pub fn by_rule(&self) -> Vec<(RuleKind, Vec<&Violation>)> {
        let mut groups: Vec<(RuleKind, Vec<&Violation>)> = Vec::new();
        for violation in &self.violations {
            match groups.iter_mut().find(|(rule, _)| *rule == violation.rule) {
                Some((_, members)) => members.push(violation),
                None => groups.push((violation.rule, vec![violation])),
            }
        }
        groups
    }
}
