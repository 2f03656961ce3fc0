//! Grouping of exact solutions by their unordered base triple.
//!
//! A triple `{a, b, c}` realized by more than one distinct canonical
//! solution witnesses a counterexample to the conjecture.

use crate::analysis::canonical::CanonicalKey;
use crate::search::result::ExactSolution;
use std::collections::{BTreeMap, BTreeSet};

/// An unordered set of three bases, stored ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Triple([u64; 3]);

impl Triple {
    pub fn new(a: u64, b: u64, c: u64) -> Self {
        let mut bases = [a, b, c];
        bases.sort_unstable();
        Self(bases)
    }

    pub fn of(solution: &ExactSolution) -> Self {
        Self::new(solution.a, solution.b, solution.c)
    }

    /// The bases in ascending order.
    pub fn bases(&self) -> [u64; 3] {
        self.0
    }
}

impl std::fmt::Display for Triple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "[{}, {}, {}]", a, b, c)
    }
}

/// Triple to canonical solutions mapping.
pub type TripleMap = BTreeMap<Triple, BTreeSet<CanonicalKey>>;

/// Result of aggregating a scan's exact solutions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripleAnalysis {
    /// Every triple seen, with its distinct canonical solutions
    pub all: TripleMap,
    /// Only the triples with more than one distinct canonical solution
    pub multi: TripleMap,
}

impl TripleAnalysis {
    /// True when no triple has more than one distinct solution.
    pub fn conjecture_holds(&self) -> bool {
        self.multi.is_empty()
    }

    /// Total number of distinct canonical solutions.
    pub fn canonical_count(&self) -> usize {
        self.all.values().map(BTreeSet::len).sum()
    }
}

/// Builds the triple mapping from exact solutions.
#[derive(Debug, Default)]
pub struct TripleAggregator {
    triples: TripleMap,
}

impl TripleAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one solution; swapped duplicates collapse into the same key.
    pub fn insert(&mut self, solution: &ExactSolution) {
        self.triples
            .entry(Triple::of(solution))
            .or_default()
            .insert(CanonicalKey::of(solution));
    }

    pub fn finish(self) -> TripleAnalysis {
        let multi = self
            .triples
            .iter()
            .filter(|(_, keys)| keys.len() > 1)
            .map(|(triple, keys)| (*triple, keys.clone()))
            .collect();
        TripleAnalysis {
            all: self.triples,
            multi,
        }
    }

    /// Aggregate a full solution list in one call.
    pub fn aggregate<'s>(solutions: impl IntoIterator<Item = &'s ExactSolution>) -> TripleAnalysis {
        let mut aggregator = Self::new();
        for solution in solutions {
            aggregator.insert(solution);
        }
        aggregator.finish()
    }
}
