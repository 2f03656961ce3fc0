//! Worker count and deadline for the parallel scan.

use std::time::Duration;

/// Settings for [`run_parallel_scan`](super::run_parallel_scan).
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Worker threads to spawn, capped by the number of bases.
    pub num_workers: usize,
    /// Overall timeout; workers stop picking up new bases once it expires.
    pub timeout: Option<Duration>,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_workers: num_cpus::get(),
            timeout: None,
        }
    }
}

impl ParallelConfig {
    /// Set the number of workers (at least one).
    pub fn with_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = num_workers.max(1);
        self
    }

    /// Set the overall timeout for the parallel scan.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_timeout_option(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Workers actually worth spawning for `num_bases` outer bases.
    pub fn effective_workers(&self, num_bases: usize) -> usize {
        self.num_workers.min(num_bases).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_every_cpu() {
        let parallel = ParallelConfig::default();
        assert_eq!(parallel.num_workers, num_cpus::get());
        assert_eq!(parallel.timeout, None);
    }

    #[test]
    fn test_builder_sets_workers_and_timeout() {
        let parallel = ParallelConfig::default()
            .with_workers(3)
            .with_timeout_option(Some(Duration::from_millis(250)));

        assert_eq!(parallel.num_workers, 3);
        assert_eq!(parallel.timeout, Some(Duration::from_millis(250)));
        assert_eq!(parallel.with_timeout_option(None).timeout, None);
    }

    #[test]
    fn test_zero_workers_clamped_to_one() {
        assert_eq!(ParallelConfig::default().with_workers(0).num_workers, 1);
    }

    #[test]
    fn test_effective_workers_never_exceed_bases() {
        let parallel = ParallelConfig::default().with_workers(8);
        assert_eq!(parallel.effective_workers(3), 3);
        assert_eq!(parallel.effective_workers(100), 8);
        assert_eq!(parallel.effective_workers(0), 1);
    }
}
