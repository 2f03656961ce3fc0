//! Perfect-power classification used to prune the base set.
//!
//! A perfect power is an integer n > 1 that can be written as r^k with
//! r > 1 and k >= 2. Roots are estimated in floating point and then
//! confirmed with exact, overflow-checked integer exponentiation.

/// Estimate the integer k-th root of `n` by rounding the floating-point root.
fn estimate_root(n: u64, k: u32) -> u64 {
    (n as f64).powf(1.0 / k as f64).round() as u64
}

/// Return `Some(r)` if `r^k == n` for one of the integers adjacent to the
/// floating-point estimate.
///
/// The estimate can land one off near exact boundaries for large `n`, so
/// `r - 1`, `r` and `r + 1` are all verified.
fn exact_root(n: u64, k: u32) -> Option<u64> {
    let r = estimate_root(n, k);
    [r.saturating_sub(1), r, r.saturating_add(1)]
        .into_iter()
        .filter(|&candidate| candidate > 1)
        .find(|&candidate| candidate.checked_pow(k) == Some(n))
}

/// Decompose `n` as `root^exponent` using the lowest exponent that works.
///
/// Returns `None` for `n <= 1` and for integers that are not perfect powers.
pub fn perfect_power_decomposition(n: u64) -> Option<(u64, u32)> {
    if n <= 1 {
        return None;
    }

    // floor(log2 n): no exponent above this can have a root greater than 1
    let k_max = u64::BITS - 1 - n.leading_zeros();
    (2..=k_max).find_map(|k| exact_root(n, k).map(|r| (r, k)))
}

/// Check whether `n` is a perfect power.
pub fn is_perfect_power(n: u64) -> bool {
    perfect_power_decomposition(n).is_some()
}

/// All integers in `[min_base, max_base]` that are not perfect powers, ascending.
///
/// An inverted range yields an empty set.
pub fn admissible_bases(min_base: u64, max_base: u64) -> Vec<u64> {
    if max_base < min_base {
        return Vec::new();
    }
    (min_base..=max_base)
        .filter(|&n| !is_perfect_power(n))
        .collect()
}
