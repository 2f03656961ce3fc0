//! Advisory progress reporting for long scans.
//!
//! Progress never affects results: a scan run with [`NoProgress`] produces
//! exactly the same solutions as one run with [`ConsoleProgress`].

use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Receives combination counts as the scan advances.
///
/// Implementations are shared between workers, so updates must be atomic.
pub trait ProgressSink: Sync {
    /// Record that `combinations` more `(a, x, b, y)` combinations were evaluated.
    fn advance(&self, combinations: u64);

    /// Called once after the scan ends.
    fn finish(&self) {}
}

/// Discards all progress updates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn advance(&self, _combinations: u64) {}
}

/// Number of progress lines printed over a full nominal scan.
const REPORT_STEPS: u64 = 200;

/// Prints a percentage and rate line to stderr roughly every 0.5% of the nominal total.
///
/// The nominal total counts `a == b` pairs that the scan skips, so the
/// percentage stays below 100 until [`ProgressSink::finish`] is called.
#[derive(Debug)]
pub struct ConsoleProgress {
    total: u64,
    step: u64,
    count: AtomicU64,
    started: Instant,
}

impl ConsoleProgress {
    pub fn new(total: u64) -> Self {
        Self {
            total,
            step: (total / REPORT_STEPS).max(1),
            count: AtomicU64::new(0),
            started: Instant::now(),
        }
    }

    /// Combinations recorded so far.
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    fn percent(&self, count: u64) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            100.0 * count as f64 / self.total as f64
        }
    }
}

impl ProgressSink for ConsoleProgress {
    fn advance(&self, combinations: u64) {
        let before = self.count.fetch_add(combinations, Ordering::Relaxed);
        let after = before + combinations;
        if after / self.step == before / self.step {
            return;
        }

        let rate = after as f64 / (self.started.elapsed().as_secs_f64() + 1e-9);
        let mut stderr = std::io::stderr().lock();
        let _ = write!(stderr, "\r{:5.1}%  {:.0} it/s", self.percent(after), rate);
        let _ = stderr.flush();
    }

    fn finish(&self) {
        eprintln!("\r{:<40}", "100.0%  done");
    }
}
