//! File-size rule: flags source files longer than the configured limit

use super::{Rule, RuleKind, RuleOutcome, Violation};
use crate::files::{FileRecord, Warning};
use crate::languages;
use crate::parallel::{ExecutionStrategy, ParallelSettings};
use crate::policy::ExceptionMatcher;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_MAX_LINES: usize = 500;

/// Count lines the way editors display them
///
/// A trailing newline terminates the last line instead of opening a new one,
/// and an empty file still counts as one line.
pub fn count_lines(content: &str) -> usize {
    content.lines().count().max(1)
}

pub struct FileSizeRule {
    root: PathBuf,
    matcher: ExceptionMatcher,
    limit: usize,
    parallel: ParallelSettings,
}

impl FileSizeRule {
    /// Rule reading files under `root`, sequential unless configured otherwise
    pub fn new(root: impl Into<PathBuf>, matcher: ExceptionMatcher, limit: usize) -> Self {
        Self {
            root: root.into(),
            matcher,
            limit,
            parallel: ParallelSettings {
                mode: crate::parallel::ParallelMode::Sequential,
                ..ParallelSettings::default()
            },
        }
    }

    pub fn with_parallel(mut self, parallel: ParallelSettings) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    fn is_candidate(&self, record: &FileRecord) -> bool {
        if !languages::is_source(record) {
            return false;
        }
        match self.matcher.matching_pattern(record.path()) {
            Some(pattern) => {
                tracing::trace!("{} exempt via '{}'", record.path(), pattern);
                false
            }
            None => true,
        }
    }

    fn measure(&self, record: &FileRecord) -> Result<usize> {
        let bytes = fs::read(self.root.join(record.path()))
            .with_context(|| format!("Cannot read {}", record.path()))?;
        Ok(count_lines(&String::from_utf8_lossy(&bytes)))
    }
}

impl Rule for FileSizeRule {
    fn kind(&self) -> RuleKind {
        RuleKind::FileSize
    }

    fn evaluate(&self, records: &[FileRecord]) -> RuleOutcome {
        let candidates: Vec<&FileRecord> = records
            .iter()
            .filter(|record| self.is_candidate(record))
            .collect();

        let strategy = self.parallel.strategy_for(candidates.len());
        tracing::debug!(
            "Measuring {} of {} files ({:?})",
            candidates.len(),
            records.len(),
            strategy
        );

        let measurements = match strategy.execute(&candidates, |record| self.measure(record)) {
            Ok(measurements) => measurements,
            Err(e) => {
                tracing::warn!("Parallel measurement unavailable, running sequentially: {e:#}");
                ExecutionStrategy::execute_sequential(&candidates, |record| self.measure(record))
            }
        };

        let mut outcome = RuleOutcome::default();
        for (record, measurement) in candidates.iter().zip(measurements) {
            match measurement {
                Ok(line_count) if line_count > self.limit => {
                    tracing::trace!("{}: {} lines over limit", record.path(), line_count);
                    outcome
                        .violations
                        .push(Violation::file_size(record.path(), line_count, self.limit));
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("Skipping unreadable file: {e:#}");
                    outcome.warnings.push(Warning::file_read(format!("{e:#}")));
                }
            }
        }
        outcome
    }
}
