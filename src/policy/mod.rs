//! Policy rules and their aggregation
//!
//! Each rule looks at the same candidate records and produces violations
//! plus any non-fatal warnings. The [`PolicyRunner`] evaluates the enabled
//! rules in a fixed order and folds their outcomes into one [`Report`].

pub mod doc_location;
pub mod exceptions;
pub mod file_size;
pub mod report;
pub mod runner;

use crate::files::{FileRecord, Warning};

pub use doc_location::DocLocationRule;
pub use exceptions::ExceptionMatcher;
pub use file_size::FileSizeRule;
pub use report::{DocLocationReason, Report, RuleKind, Violation, ViolationDetail};
pub use runner::PolicyRunner;

/// Violations and warnings produced by one rule
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleOutcome {
    pub violations: Vec<Violation>,
    pub warnings: Vec<Warning>,
}

impl RuleOutcome {
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        Self {
            violations,
            warnings: Vec::new(),
        }
    }
}

/// A policy check over a set of candidate files
pub trait Rule: Send + Sync {
    /// Identifier used in reports
    fn kind(&self) -> RuleKind;

    /// Evaluate the rule; never fails, problems with single files become warnings
    fn evaluate(&self, records: &[FileRecord]) -> RuleOutcome;

    /// Name for logging
    fn name(&self) -> &'static str {
        self.kind().as_str()
    }
}
