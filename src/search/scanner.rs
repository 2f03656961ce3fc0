//! The combinatorial scan over `a^x + b^y` sums.
//!
//! For every admissible base `a` and exponent `x`, every other admissible
//! base `b` and exponent `y` is combined into `s = a^x + b^y`, and `s` (plus,
//! with a tolerance, `s ± m` for `m` in `1..=delta`) is probed in the power
//! table. Witnesses whose base coincides with `a` or `b`, or whose exponent
//! fails the fixed-z filter, are dropped.
//!
//! The work for one outer base `a` is independent of every other `a`, so
//! [`Scanner::scan_base`] is the unit both the sequential and the parallel
//! drivers hand out.

use crate::arith::{PowerTable, Witness};
use crate::search::config::SearchConfig;
use crate::search::progress::ProgressSink;
use crate::search::result::{ExactSolution, NearMissSolution, ScanResult, ScanStatistics};
use num_bigint::BigUint;
use num_traits::CheckedSub;

/// `bases² · exponents²`, saturating.
pub(crate) fn nominal_count(bases: usize, exponents: u64) -> u64 {
    let bases = bases as u64;
    bases
        .saturating_mul(bases)
        .saturating_mul(exponents.saturating_mul(exponents))
}

/// Solutions found for a single outer base `a`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaseScan {
    /// Index of `a` in the admissible base list
    pub base_index: usize,
    pub exact: Vec<ExactSolution>,
    pub near_misses: Vec<NearMissSolution>,
    /// Number of `(x, b, y)` combinations evaluated for this base
    pub combinations: u64,
}

impl BaseScan {
    fn new(base_index: usize) -> Self {
        Self {
            base_index,
            ..Default::default()
        }
    }
}

/// Read-only view of everything a scan needs.
///
/// Summand powers `b^y` are computed once up front and shared by every
/// outer base.
#[derive(Debug)]
pub struct Scanner<'a> {
    bases: &'a [u64],
    table: &'a PowerTable,
    config: &'a SearchConfig,
    /// `summand_powers[i][y - 2] == bases[i]^y`
    summand_powers: Vec<Vec<BigUint>>,
}

impl<'a> Scanner<'a> {
    pub fn new(bases: &'a [u64], table: &'a PowerTable, config: &'a SearchConfig) -> Self {
        let summand_powers = bases
            .iter()
            .map(|&base| {
                (2..=config.max_exponent)
                    .map(|exponent| BigUint::from(base).pow(exponent))
                    .collect()
            })
            .collect();

        Self {
            bases,
            table,
            config,
            summand_powers,
        }
    }

    pub fn bases(&self) -> &[u64] {
        self.bases
    }

    pub fn config(&self) -> &SearchConfig {
        self.config
    }

    /// Nominal combination count `bases² · (max_exponent - 1)²`.
    ///
    /// Pairs with `b == a` are counted here but never evaluated.
    pub fn nominal_combinations(&self) -> u64 {
        nominal_count(self.bases.len(), self.config.exponent_count())
    }

    /// Statistics skeleton shared by every driver.
    pub fn initial_statistics(&self) -> ScanStatistics {
        ScanStatistics {
            admissible_bases: self.bases.len(),
            table_values: self.table.len(),
            nominal_combinations: self.nominal_combinations(),
            ..Default::default()
        }
    }

    /// Scan every combination whose first summand base is `bases[base_index]`.
    pub fn scan_base(&self, base_index: usize, progress: &dyn ProgressSink) -> BaseScan {
        let a = self.bases[base_index];
        let mut batch = BaseScan::new(base_index);

        for (x, ax) in (2u32..).zip(&self.summand_powers[base_index]) {
            for (&b, b_powers) in self.bases.iter().zip(&self.summand_powers) {
                if b == a {
                    continue;
                }
                if let Some(window) = &self.config.ratio_window
                    && !window.admits(a, b)
                {
                    continue;
                }

                for (y, by) in (2u32..).zip(b_powers) {
                    let sum = ax + by;
                    self.collect_exact(&sum, a, x, b, y, &mut batch.exact);
                    if self.config.delta > 0 {
                        self.collect_near_misses(&sum, a, x, b, y, &mut batch.near_misses);
                    }
                    batch.combinations += 1;
                }
                progress.advance(b_powers.len() as u64);
            }
        }

        batch
    }

    /// Witnesses of `value` that may serve as `c^z` for summand bases `a` and `b`.
    fn matching_witnesses(
        &self,
        value: &BigUint,
        a: u64,
        b: u64,
    ) -> impl Iterator<Item = &Witness> + '_ {
        self.table
            .witnesses(value)
            .iter()
            .filter(move |w| w.base != a && w.base != b && self.config.accepts_z(w.exponent))
    }

    fn collect_exact(
        &self,
        sum: &BigUint,
        a: u64,
        x: u32,
        b: u64,
        y: u32,
        out: &mut Vec<ExactSolution>,
    ) {
        out.extend(
            self.matching_witnesses(sum, a, b)
                .map(|w| ExactSolution {
                    a,
                    x,
                    b,
                    y,
                    c: w.base,
                    z: w.exponent,
                }),
        );
    }

    fn collect_near_misses(
        &self,
        sum: &BigUint,
        a: u64,
        x: u32,
        b: u64,
        y: u32,
        out: &mut Vec<NearMissSolution>,
    ) {
        for magnitude in 1..=self.config.delta {
            let step = BigUint::from(magnitude);
            // delta is validated to fit in i64
            let magnitude = magnitude as i64;

            for offset in [-magnitude, magnitude] {
                let probe = if offset < 0 {
                    match sum.checked_sub(&step) {
                        Some(probe) => probe,
                        None => continue,
                    }
                } else {
                    sum + &step
                };

                out.extend(
                    self.matching_witnesses(&probe, a, b)
                        .map(|w| NearMissSolution {
                            a,
                            x,
                            b,
                            y,
                            c: w.base,
                            z: w.exponent,
                            offset,
                        }),
                );
            }
        }
    }

    /// Fold per-base batches, in the order given, into a scan result.
    pub fn assemble(
        &self,
        batches: impl IntoIterator<Item = BaseScan>,
        mut statistics: ScanStatistics,
        completed: bool,
    ) -> ScanResult {
        let mut result = ScanResult::default();
        for batch in batches {
            statistics.combinations_evaluated += batch.combinations;
            statistics.bases_completed += 1;
            result.exact.extend(batch.exact);
            result.near_misses.extend(batch.near_misses);
        }
        statistics.exact_found = result.exact.len() as u64;
        statistics.near_misses_found = result.near_misses.len() as u64;
        result.statistics = statistics;
        result.completed = completed;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arith::admissible_bases;
    use crate::search::progress::NoProgress;

    fn scan_all(config: &SearchConfig) -> ScanResult {
        let bases = admissible_bases(config.min_base, config.max_base);
        let table = PowerTable::build(&bases, config.effective_z_limit());
        let scanner = Scanner::new(&bases, &table, config);
        let batches = (0..bases.len()).map(|i| scanner.scan_base(i, &NoProgress));
        scanner.assemble(batches, scanner.initial_statistics(), true)
    }

    #[test]
    fn test_finds_pythagorean_triple() {
        // 3^2 + 2^4 = 5^2, 2 and 3 and 5 are all admissible
        let config = SearchConfig::default()
            .with_base_range(2, 5)
            .with_max_exponent(4);
        let result = scan_all(&config);

        let expected = ExactSolution {
            a: 3,
            x: 2,
            b: 2,
            y: 4,
            c: 5,
            z: 2,
        };
        let swapped = ExactSolution {
            a: 2,
            x: 4,
            b: 3,
            y: 2,
            c: 5,
            z: 2,
        };
        assert!(result.exact.contains(&expected));
        assert!(result.exact.contains(&swapped));
    }

    #[test]
    fn test_every_exact_solution_holds() {
        let config = SearchConfig::default()
            .with_base_range(2, 40)
            .with_max_exponent(5);
        let result = scan_all(&config);

        assert!(!result.exact.is_empty());
        for solution in &result.exact {
            assert!(solution.holds(), "{} does not hold", solution);
            assert_ne!(solution.c, solution.a);
            assert_ne!(solution.c, solution.b);
            assert_ne!(solution.a, solution.b);
            assert!(solution.x >= 2 && solution.y >= 2 && solution.z >= 2);
        }
    }

    #[test]
    fn test_near_misses_hold_and_respect_delta() {
        let config = SearchConfig::default()
            .with_base_range(2, 30)
            .with_max_exponent(3)
            .with_delta(2);
        let result = scan_all(&config);

        assert!(!result.near_misses.is_empty());
        for near in &result.near_misses {
            assert!(near.holds(), "{} does not hold", near);
            assert_ne!(near.offset, 0);
            assert!(near.offset.unsigned_abs() <= 2);
            assert!(near.c != near.a && near.c != near.b);
        }
    }

    #[test]
    fn test_no_near_misses_without_delta() {
        let config = SearchConfig::default()
            .with_base_range(2, 30)
            .with_max_exponent(3);
        assert!(scan_all(&config).near_misses.is_empty());
    }

    #[test]
    fn test_fixed_z_filters_everything_else() {
        let config = SearchConfig::default()
            .with_base_range(2, 40)
            .with_max_exponent(4)
            .with_fixed_z(2)
            .with_delta(1);
        let result = scan_all(&config);

        assert!(!result.exact.is_empty());
        assert!(result.exact.iter().all(|s| s.z == 2));
        assert!(result.near_misses.iter().all(|s| s.z == 2));
    }

    #[test]
    fn test_ratio_window_gives_subset() {
        let open = SearchConfig::default()
            .with_base_range(2, 60)
            .with_max_exponent(4);
        let windowed = open.clone().with_ratio_window(0.5, 2.0);

        let all = scan_all(&open);
        let restricted = scan_all(&windowed);

        assert!(restricted.statistics.combinations_evaluated < all.statistics.combinations_evaluated);
        for solution in &restricted.exact {
            assert!(all.exact.contains(solution));
        }
    }

    #[test]
    fn test_combination_counts() {
        let config = SearchConfig::default()
            .with_base_range(2, 7)
            .with_max_exponent(3);
        let result = scan_all(&config);

        // bases {2, 3, 5, 6, 7}, exponents {2, 3}
        assert_eq!(result.nominal_combinations(), 5 * 5 * 2 * 2);
        assert_eq!(result.statistics.combinations_evaluated, 5 * 4 * 2 * 2);
        assert_eq!(result.statistics.bases_completed, 5);
    }

    #[test]
    fn test_degenerate_ranges_are_empty() {
        let inverted = SearchConfig::default()
            .with_base_range(50, 2)
            .with_max_exponent(3);
        let result = scan_all(&inverted);
        assert!(result.exact.is_empty());
        assert_eq!(result.statistics.combinations_evaluated, 0);

        let no_exponents = SearchConfig::default()
            .with_base_range(2, 50)
            .with_max_exponent(1);
        let result = scan_all(&no_exponents);
        assert!(result.exact.is_empty());
        assert_eq!(result.nominal_combinations(), 0);
        assert_eq!(result.statistics.combinations_evaluated, 0);
    }

    #[test]
    fn test_near_miss_probe_below_zero_is_skipped() {
        // smallest sum is 2^2 + 3^2 = 13, so a delta of 20 probes below zero
        let config = SearchConfig::default()
            .with_base_range(2, 3)
            .with_max_exponent(2)
            .with_z_limit(2)
            .with_delta(20);
        let result = scan_all(&config);
        for near in &result.near_misses {
            assert!(near.holds());
        }
    }
}
