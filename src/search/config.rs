//! Configuration types for the combinatorial scan

use serde::Serialize;
use thiserror::Error;

/// Inclusive bound on `log(B) / log(A)` for the summand bases.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatioWindow {
    pub lo: f64,
    pub hi: f64,
}

impl RatioWindow {
    pub fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// Whether the pair `(a, b)` falls inside the window.
    pub fn admits(&self, a: u64, b: u64) -> bool {
        let ratio = (b as f64).ln() / (a as f64).ln();
        self.lo <= ratio && ratio <= self.hi
    }
}

impl std::fmt::Display for RatioWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} … {}", self.lo, self.hi)
    }
}

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("min_base must be at least 2, got {0}")]
    MinBaseTooSmall(u64),
    #[error("fixed z must be at least 2, got {0}")]
    FixedZTooSmall(u32),
    #[error("delta {0} exceeds the largest representable offset")]
    DeltaTooLarge(u64),
    #[error("ratio window bounds must be finite, got {lo} … {hi}")]
    RatioWindowNotFinite { lo: f64, hi: f64 },
    #[error("ratio window is inverted: {lo} > {hi}")]
    RatioWindowInverted { lo: f64, hi: f64 },
}

/// Search configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchConfig {
    /// Smallest candidate base (inclusive)
    pub min_base: u64,
    /// Largest candidate base (inclusive)
    pub max_base: u64,
    /// Largest summand exponent x, y (inclusive)
    pub max_exponent: u32,
    /// Largest result exponent z (None = same as max_exponent)
    pub z_limit: Option<u32>,
    /// Only emit solutions with exactly this z
    pub fixed_z: Option<u32>,
    /// Maximum absolute near-miss offset (0 = exact matches only)
    pub delta: u64,
    /// Bound on log(B)/log(A)
    pub ratio_window: Option<RatioWindow>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_base: 12,
            max_base: 12,
            max_exponent: 2,
            z_limit: None,
            fixed_z: None,
            delta: 0,
            ratio_window: None,
        }
    }
}

impl SearchConfig {
    pub fn with_base_range(mut self, min_base: u64, max_base: u64) -> Self {
        self.min_base = min_base;
        self.max_base = max_base;
        self
    }

    pub fn with_max_exponent(mut self, max_exponent: u32) -> Self {
        self.max_exponent = max_exponent;
        self
    }

    pub fn with_z_limit(mut self, z_limit: u32) -> Self {
        self.z_limit = Some(z_limit);
        self
    }

    pub fn with_z_limit_option(mut self, z_limit: Option<u32>) -> Self {
        self.z_limit = z_limit;
        self
    }

    pub fn with_fixed_z(mut self, z: u32) -> Self {
        self.fixed_z = Some(z);
        self
    }

    pub fn with_fixed_z_option(mut self, z: Option<u32>) -> Self {
        self.fixed_z = z;
        self
    }

    pub fn with_delta(mut self, delta: u64) -> Self {
        self.delta = delta;
        self
    }

    pub fn with_ratio_window(mut self, lo: f64, hi: f64) -> Self {
        self.ratio_window = Some(RatioWindow::new(lo, hi));
        self
    }

    pub fn with_ratio_window_option(mut self, window: Option<RatioWindow>) -> Self {
        self.ratio_window = window;
        self
    }

    /// Effective upper bound for the result exponent z.
    pub fn effective_z_limit(&self) -> u32 {
        self.z_limit.unwrap_or(self.max_exponent)
    }

    /// Whether a witness exponent passes the fixed-z filter.
    pub fn accepts_z(&self, z: u32) -> bool {
        self.fixed_z.is_none_or(|fixed| fixed == z)
    }

    /// Number of exponents in `2..=max_exponent`.
    pub fn exponent_count(&self) -> u64 {
        u64::from(self.max_exponent.saturating_sub(1))
    }

    /// Reject values the scan cannot run with.
    ///
    /// Inverted base ranges and exponent limits below 2 are accepted and
    /// simply produce an empty search.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_base < 2 {
            return Err(ConfigError::MinBaseTooSmall(self.min_base));
        }
        if let Some(z) = self.fixed_z
            && z < 2
        {
            return Err(ConfigError::FixedZTooSmall(z));
        }
        if i64::try_from(self.delta).is_err() {
            return Err(ConfigError::DeltaTooLarge(self.delta));
        }
        if let Some(RatioWindow { lo, hi }) = self.ratio_window {
            if !lo.is_finite() || !hi.is_finite() {
                return Err(ConfigError::RatioWindowNotFinite { lo, hi });
            }
            if lo > hi {
                return Err(ConfigError::RatioWindowInverted { lo, hi });
            }
        }
        Ok(())
    }
}
