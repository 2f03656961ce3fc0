//! Bounded search for structurally distinct solutions of `A^x + B^y = C^z`
//!
//! This module ties the pieces of one search run together:
//! - Admissible bases: the configured range minus perfect powers
//! - Power table: every `c^z` for admissible `c` and `2 <= z <= z_limit`
//! - Scan: every `a^x + b^y` probed for exact and near-miss matches,
//!   sequentially or across worker threads
//! - Analysis: exact solutions grouped by unordered base triple

pub mod config;
pub mod parallel;
pub mod progress;
pub mod result;
pub mod scanner;
pub mod sequential;

pub use config::{ConfigError, RatioWindow, SearchConfig};
pub use parallel::{ParallelConfig, run_parallel_scan};
pub use progress::{ConsoleProgress, NoProgress, ProgressSink};
#[allow(unused_imports)]
pub use result::{ExactSolution, NearMissSolution, ScanResult, ScanStatistics};
pub use scanner::Scanner;
pub use sequential::SequentialScan;

use crate::analysis::{TripleAggregator, TripleAnalysis};
use crate::arith::{PowerTable, admissible_bases};
use tracing::{debug, info};

/// Strategy for driving a scan over every outer base.
pub trait ScanDriver {
    /// Scan every admissible base and return the solutions in base order.
    fn run(&self, scanner: &Scanner<'_>, progress: &dyn ProgressSink) -> ScanResult;
}

impl ScanDriver for SequentialScan {
    fn run(&self, scanner: &Scanner<'_>, progress: &dyn ProgressSink) -> ScanResult {
        SequentialScan::run(self, scanner, progress)
    }
}

impl ScanDriver for ParallelConfig {
    fn run(&self, scanner: &Scanner<'_>, progress: &dyn ProgressSink) -> ScanResult {
        run_parallel_scan(scanner, self, progress)
    }
}

/// Everything a search run produces.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub scan: ScanResult,
    pub analysis: TripleAnalysis,
}

impl SearchOutcome {
    /// True when at least one triple has more than one distinct solution.
    pub fn counterexample_found(&self) -> bool {
        !self.analysis.conjecture_holds()
    }
}

/// Nominal combination count for `config` without building the table.
pub fn nominal_combinations(config: &SearchConfig) -> u64 {
    let bases = admissible_bases(config.min_base, config.max_base);
    scanner::nominal_count(bases.len(), config.exponent_count())
}

/// Validate `config`, build the bases and power table, scan, and aggregate.
pub fn run_search(
    config: &SearchConfig,
    driver: &dyn ScanDriver,
    progress: &dyn ProgressSink,
) -> Result<SearchOutcome, ConfigError> {
    config.validate()?;

    let bases = admissible_bases(config.min_base, config.max_base);
    info!(
        count = bases.len(),
        min_base = config.min_base,
        max_base = config.max_base,
        "admissible bases selected"
    );

    let table = PowerTable::build(&bases, config.effective_z_limit());
    info!(
        values = table.len(),
        witnesses = table.witness_count(),
        z_limit = config.effective_z_limit(),
        "power table built"
    );

    let scanner = Scanner::new(&bases, &table, config);
    let scan = driver.run(&scanner, progress);
    progress.finish();
    debug!("{}", scan.statistics.format_summary().trim_end());

    let analysis = TripleAggregator::aggregate(&scan.exact);
    info!(
        triples = analysis.all.len(),
        multi = analysis.multi.len(),
        "solutions aggregated"
    );

    Ok(SearchOutcome { scan, analysis })
}
