//! Solution records and scan statistics

use num_bigint::BigUint;
use num_traits::CheckedSub;
use std::time::Duration;

/// An exact solution `a^x + b^y = c^z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExactSolution {
    pub a: u64,
    pub x: u32,
    pub b: u64,
    pub y: u32,
    pub c: u64,
    pub z: u32,
}

impl ExactSolution {
    /// The left-hand side `a^x + b^y`.
    pub fn sum(&self) -> BigUint {
        BigUint::from(self.a).pow(self.x) + BigUint::from(self.b).pow(self.y)
    }

    /// The right-hand side `c^z`.
    pub fn power(&self) -> BigUint {
        BigUint::from(self.c).pow(self.z)
    }

    /// Recompute both sides and check the equation holds.
    pub fn holds(&self) -> bool {
        self.sum() == self.power()
    }
}

impl std::fmt::Display for ExactSolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}^{} + {}^{} = {}^{}",
            self.a, self.x, self.b, self.y, self.c, self.z
        )
    }
}

/// A sum that lands within the tolerance of a table power.
///
/// `offset` is the signed amount added to the sum to reach the power:
/// `a^x + b^y + offset == c^z`. It is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NearMissSolution {
    pub a: u64,
    pub x: u32,
    pub b: u64,
    pub y: u32,
    pub c: u64,
    pub z: u32,
    pub offset: i64,
}

impl NearMissSolution {
    pub fn sum(&self) -> BigUint {
        BigUint::from(self.a).pow(self.x) + BigUint::from(self.b).pow(self.y)
    }

    pub fn power(&self) -> BigUint {
        BigUint::from(self.c).pow(self.z)
    }

    /// Recompute both sides and check `sum + offset == power`.
    pub fn holds(&self) -> bool {
        let sum = self.sum();
        let magnitude = BigUint::from(self.offset.unsigned_abs());
        if self.offset >= 0 {
            sum + magnitude == self.power()
        } else {
            sum.checked_sub(&magnitude) == Some(self.power())
        }
    }
}

impl std::fmt::Display for NearMissSolution {
    // Written as `a^x + b^y = c^z ± d` with the sign of the sum's excess.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.offset < 0 { '+' } else { '-' };
        write!(
            f,
            "{}^{} + {}^{} = {}^{} {}{}",
            self.a,
            self.x,
            self.b,
            self.y,
            self.c,
            self.z,
            sign,
            self.offset.unsigned_abs()
        )
    }
}

/// Statistics from a scan
#[derive(Debug, Clone, Default)]
pub struct ScanStatistics {
    /// Number of admissible bases
    pub admissible_bases: usize,
    /// Number of distinct values in the power table
    pub table_values: usize,
    /// Nominal combination count `bases² · (max_exponent - 1)²`, used for progress
    pub nominal_combinations: u64,
    /// Number of `(a, x, b, y)` combinations actually evaluated
    pub combinations_evaluated: u64,
    /// Number of outer-loop bases fully scanned
    pub bases_completed: usize,
    /// Number of exact solutions emitted
    pub exact_found: u64,
    /// Number of near-miss solutions emitted
    pub near_misses_found: u64,
    /// Number of workers that took part
    pub workers: usize,
    /// Total time spent scanning
    pub elapsed_time: Duration,
}

impl ScanStatistics {
    /// Combinations evaluated per second
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed_time.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.combinations_evaluated as f64 / secs
        }
    }

    /// Share of the nominal combination count that was evaluated (0.0 to 1.0)
    pub fn coverage(&self) -> f64 {
        if self.nominal_combinations == 0 {
            0.0
        } else {
            self.combinations_evaluated as f64 / self.nominal_combinations as f64
        }
    }

    /// Format statistics as a human-readable string
    pub fn format_summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Admissible bases: {}\n", self.admissible_bases));
        s.push_str(&format!("Power table values: {}\n", self.table_values));
        s.push_str(&format!("Workers: {}\n", self.workers));
        s.push_str(&format!("Time: {:.2?}\n", self.elapsed_time));
        s.push_str(&format!(
            "Combinations evaluated: {} ({:.1}% of nominal)\n",
            self.combinations_evaluated,
            self.coverage() * 100.0
        ));
        s.push_str(&format!(
            "Throughput: {:.0} combinations/sec\n",
            self.throughput()
        ));
        s.push_str(&format!("Exact solutions: {}\n", self.exact_found));
        if self.near_misses_found > 0 {
            s.push_str(&format!("Near misses: {}\n", self.near_misses_found));
        }
        s
    }
}

/// Output of a scan: solutions in discovery order plus statistics.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub exact: Vec<ExactSolution>,
    pub near_misses: Vec<NearMissSolution>,
    pub statistics: ScanStatistics,
    /// False if the scan was stopped before every base was processed
    pub completed: bool,
}

impl ScanResult {
    pub fn nominal_combinations(&self) -> u64 {
        self.statistics.nominal_combinations
    }
}
