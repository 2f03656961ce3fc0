//! Parallel scan execution across worker threads.
//!
//! The outer loop over base `a` is split into one job per base:
//! - A **coordinator** owns the result slots and the optional deadline
//! - **Workers** pull base indices from a shared queue and scan them with a
//!   private accumulator
//! - A **channel system** carries finished batches back to the coordinator
//! - **Shared state** carries the stop flag checked between bases
//!
//! # Example
//!
//! ```ignore
//! use kraiz::search::parallel::{ParallelConfig, run_parallel_scan};
//!
//! let config = ParallelConfig::default()
//!     .with_workers(4)
//!     .with_timeout(Duration::from_secs(60));
//!
//! let result = run_parallel_scan(&scanner, &config, &NoProgress);
//! ```

pub mod channel;
pub mod config;
pub mod coordinator;

pub use config::ParallelConfig;
pub use coordinator::run_parallel_scan;
