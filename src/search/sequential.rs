//! Single-threaded scan driver

use crate::search::progress::ProgressSink;
use crate::search::result::ScanResult;
use crate::search::scanner::Scanner;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Scans outer bases one after another on the calling thread.
#[derive(Debug, Clone, Default)]
pub struct SequentialScan {
    /// Stop before the next outer base once this much time has passed
    pub timeout: Option<Duration>,
}

impl SequentialScan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout_option(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn run(&self, scanner: &Scanner<'_>, progress: &dyn ProgressSink) -> ScanResult {
        let start_time = Instant::now();
        let deadline = self.timeout.map(|t| start_time + t);
        let num_bases = scanner.bases().len();
        info!(bases = num_bases, "starting sequential scan");

        let mut batches = Vec::with_capacity(num_bases);
        for base_index in 0..num_bases {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                warn!(
                    completed = base_index,
                    total = num_bases,
                    "timeout reached, stopping scan"
                );
                break;
            }
            batches.push(scanner.scan_base(base_index, progress));
        }

        let completed = batches.len() == num_bases;
        let mut statistics = scanner.initial_statistics();
        statistics.workers = 1;
        statistics.elapsed_time = start_time.elapsed();
        scanner.assemble(batches, statistics, completed)
    }
}
