//! Reverse lookup table from a power value to every `(base, exponent)` that produces it.

use num_bigint::BigUint;
use std::collections::HashMap;

/// A single `base^exponent` term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Witness {
    pub base: u64,
    pub exponent: u32,
}

impl Witness {
    pub fn new(base: u64, exponent: u32) -> Self {
        Self { base, exponent }
    }

    /// Exact value of `base^exponent`.
    pub fn value(&self) -> BigUint {
        BigUint::from(self.base).pow(self.exponent)
    }
}

impl std::fmt::Display for Witness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}^{}", self.base, self.exponent)
    }
}

/// Mapping from an exact power value to its witnesses.
///
/// Witnesses for one value keep the order in which they were inserted
/// (bases in input order, then exponents ascending), and coinciding values
/// from different bases are all retained.
#[derive(Debug, Clone, Default)]
pub struct PowerTable {
    entries: HashMap<BigUint, Vec<Witness>>,
    witness_count: usize,
}

impl PowerTable {
    /// Build the table for every base in `bases` and every exponent in `2..=z_limit`.
    ///
    /// A `z_limit` below 2 produces an empty table.
    pub fn build(bases: &[u64], z_limit: u32) -> Self {
        let mut table = Self::default();
        for &base in bases {
            for exponent in 2..=z_limit {
                table.insert(Witness::new(base, exponent));
            }
        }
        table
    }

    fn insert(&mut self, witness: Witness) {
        self.entries.entry(witness.value()).or_default().push(witness);
        self.witness_count += 1;
    }

    /// Witnesses for `value`, or an empty slice if it is not in the table.
    pub fn witnesses(&self, value: &BigUint) -> &[Witness] {
        self.entries.get(value).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, value: &BigUint) -> bool {
        self.entries.contains_key(value)
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of witnesses across all values.
    pub fn witness_count(&self) -> usize {
        self.witness_count
    }
}
