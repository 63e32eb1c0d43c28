use super::exceptions::DEFAULT_EXCEPTIONS_FILE;
use super::{DocLocationRule, ExceptionMatcher, FileSizeRule, Report, Rule};
use crate::config::PolicyConfig;
use crate::files::{FileRecord, FileSet, Warning};
use anyhow::Result;
use std::path::Path;

/// Runs enabled rules over a file set and aggregates a [`Report`]
pub struct PolicyRunner {
    rules: Vec<Box<dyn Rule>>,
}

impl PolicyRunner {
    /// Rules are evaluated in the order given
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// Build the configured rule set for files under `root`
    ///
    /// Loads the exception file up front so that a missing or malformed
    /// policy file aborts before any rule runs.
    pub fn from_config(config: &PolicyConfig, root: &Path) -> Result<Self> {
        let mut rules: Vec<Box<dyn Rule>> = Vec::new();

        let file_size = &config.rules.file_size;
        if file_size.enabled {
            let matcher = load_exceptions(file_size.exceptions_file.as_deref(), root)?;
            rules.push(Box::new(
                FileSizeRule::new(root, matcher, file_size.max_lines)
                    .with_parallel(config.parallel.clone()),
            ));
        }

        let doc_location = &config.rules.doc_location;
        if doc_location.enabled {
            rules.push(Box::new(DocLocationRule::new(
                doc_location.allowed_root_docs.as_slice(),
                doc_location.docs_dir.as_str(),
            )));
        }

        tracing::debug!(
            "Policy rules: [{}]",
            rules.iter().map(|r| r.name()).collect::<Vec<_>>().join(", ")
        );
        Ok(Self::new(rules))
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Evaluate every rule; enumeration warnings come first in the report
    pub fn run(&self, file_set: &FileSet) -> Report {
        self.evaluate(&file_set.records, file_set.warnings.clone())
    }

    fn evaluate(&self, records: &[FileRecord], mut warnings: Vec<Warning>) -> Report {
        let mut violations = Vec::new();

        for rule in &self.rules {
            let outcome = rule.evaluate(records);
            tracing::info!(
                "{}: {} violations, {} warnings",
                rule.name(),
                outcome.violations.len(),
                outcome.warnings.len()
            );
            violations.extend(outcome.violations);
            warnings.extend(outcome.warnings);
        }

        Report::new(violations, warnings)
    }
}

/// Explicit exception files must be readable; the default file is optional
fn load_exceptions(configured: Option<&str>, root: &Path) -> Result<ExceptionMatcher> {
    if let Some(path) = configured {
        let path = root.join(path);
        tracing::debug!("Loading exceptions from {}", path.display());
        return ExceptionMatcher::load(&path);
    }

    let default_path = root.join(DEFAULT_EXCEPTIONS_FILE);
    if default_path.is_file() {
        tracing::debug!("Loading exceptions from {}", default_path.display());
        ExceptionMatcher::load(&default_path)
    } else {
        Ok(ExceptionMatcher::empty())
    }
}
