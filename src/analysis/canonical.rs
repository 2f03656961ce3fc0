//! Permutation-invariant identity for solutions.
//!
//! `a^x + b^y = c^z` and `b^y + a^x = c^z` are the same relation; both map
//! to one [`CanonicalKey`] whose summand terms are sorted by [`Term`]'s order.

use crate::search::result::ExactSolution;
use std::cmp::Ordering;

/// One `base^exponent` term of a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Term {
    pub base: u64,
    pub exponent: u32,
}

impl Term {
    pub fn new(base: u64, exponent: u32) -> Self {
        Self { base, exponent }
    }
}

// Base ascending, then exponent ascending.
impl Ord for Term {
    fn cmp(&self, other: &Self) -> Ordering {
        self.base
            .cmp(&other.base)
            .then_with(|| self.exponent.cmp(&other.exponent))
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}^{}", self.base, self.exponent)
    }
}

/// A solution with its summands in canonical order: `first <= second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalKey {
    pub first: Term,
    pub second: Term,
    pub result: Term,
}

impl CanonicalKey {
    /// Build the key for `a^x + b^y = c^z`.
    pub fn new(a: u64, x: u32, b: u64, y: u32, c: u64, z: u32) -> Self {
        let (first, second) = {
            let left = Term::new(a, x);
            let right = Term::new(b, y);
            if left <= right {
                (left, right)
            } else {
                (right, left)
            }
        };
        Self {
            first,
            second,
            result: Term::new(c, z),
        }
    }

    pub fn of(solution: &ExactSolution) -> Self {
        Self::new(
            solution.a, solution.x, solution.b, solution.y, solution.c, solution.z,
        )
    }
}

impl From<&ExactSolution> for CanonicalKey {
    fn from(solution: &ExactSolution) -> Self {
        Self::of(solution)
    }
}

impl std::fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} + {} = {}", self.first, self.second, self.result)
    }
}
