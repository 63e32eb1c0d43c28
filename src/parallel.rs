//! Execution strategy for per-file work
//!
//! The File-Size rule reads every candidate file; on large trees that is
//! worth spreading across cores. This module decides between sequential and
//! parallel execution and runs the work either way. Results always come back
//! in input order, so callers never have to re-sort.
//!
//! ```rust
//! use repolint::parallel::ExecutionStrategy;
//!
//! // Small workload stays sequential
//! let strategy = ExecutionStrategy::auto(10, 50, 4);
//! assert!(matches!(strategy, ExecutionStrategy::Sequential));
//!
//! let doubled = ExecutionStrategy::Parallel { workers: 2 }
//!     .execute(&[1, 2, 3], |x| x * 2)
//!     .unwrap();
//! assert_eq!(doubled, vec![2, 4, 6]);
//! ```

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Processing mode requested by configuration or CLI
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ParallelMode {
    /// Always use sequential processing
    Sequential,
    /// Always use parallel processing
    Parallel,
    /// Choose based on file count
    #[default]
    Auto,
}

/// `[parallel]` configuration section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelSettings {
    pub mode: ParallelMode,
    /// Minimum candidate count before `auto` goes parallel
    pub min_files_for_parallel: usize,
    /// Upper bound on workers, 0 for no cap
    pub max_threads: usize,
    /// Share of available cores to use, 1..=100
    pub thread_percentage: u8,
}

impl Default for ParallelSettings {
    fn default() -> Self {
        Self {
            mode: ParallelMode::Auto,
            min_files_for_parallel: 50,
            max_threads: 0,
            thread_percentage: 75,
        }
    }
}

impl ParallelSettings {
    /// Concrete strategy for a batch of `work_items_count` items
    pub fn strategy_for(&self, work_items_count: usize) -> ExecutionStrategy {
        ExecutionStrategy::for_mode(
            self.mode,
            work_items_count,
            self.min_files_for_parallel,
            self.max_threads,
            self.thread_percentage,
        )
    }
}

/// How a batch of work items is executed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionStrategy {
    Sequential,
    Parallel { workers: usize },
}

impl ExecutionStrategy {
    /// Resolve a mode into a concrete strategy for `work_items_count` items
    pub fn for_mode(
        mode: ParallelMode,
        work_items_count: usize,
        min_items_for_parallel: usize,
        max_threads: usize,
        thread_percentage: u8,
    ) -> Self {
        let workers = Self::calculate_optimal_workers(max_threads, thread_percentage);
        match mode {
            ParallelMode::Sequential => ExecutionStrategy::Sequential,
            ParallelMode::Parallel => ExecutionStrategy::Parallel { workers },
            ParallelMode::Auto => Self::auto(work_items_count, min_items_for_parallel, workers),
        }
    }

    /// Threshold decision: parallel once the workload reaches `min_items_for_parallel`
    pub fn auto(
        work_items_count: usize,
        min_items_for_parallel: usize,
        optimal_workers: usize,
    ) -> Self {
        if work_items_count >= min_items_for_parallel && optimal_workers > 1 {
            ExecutionStrategy::Parallel {
                workers: optimal_workers,
            }
        } else {
            ExecutionStrategy::Sequential
        }
    }

    /// Workers from available cores, a percentage of them, and an optional cap
    ///
    /// `max_threads_config == 0` means no cap. Always at least 1.
    pub fn calculate_optimal_workers(max_threads_config: usize, thread_percentage: u8) -> usize {
        let available_cores = num_cpus::get();
        let workers_by_percentage =
            std::cmp::max(1, (available_cores * thread_percentage as usize) / 100);

        if max_threads_config > 0 {
            std::cmp::min(max_threads_config, workers_by_percentage)
        } else {
            workers_by_percentage
        }
    }

    /// Run `processor` over every item, returning results in input order
    pub fn execute<T, R, F>(&self, work_items: &[T], processor: F) -> Result<Vec<R>>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Send + Sync,
    {
        match self {
            ExecutionStrategy::Sequential => Ok(Self::execute_sequential(work_items, processor)),
            ExecutionStrategy::Parallel { workers } => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(*workers)
                    .thread_name(|index| format!("repolint-worker-{index}"))
                    .build()
                    .context("Failed to build worker thread pool")?;

                tracing::debug!("Processing {} items on {} workers", work_items.len(), workers);
                // Indexed collect keeps input order regardless of completion order
                Ok(pool.install(|| work_items.par_iter().map(processor).collect()))
            }
        }
    }

    /// Run `processor` over every item on the calling thread; cannot fail
    pub fn execute_sequential<T, R, F>(work_items: &[T], processor: F) -> Vec<R>
    where
        F: Fn(&T) -> R,
    {
        work_items.iter().map(processor).collect()
    }
}
