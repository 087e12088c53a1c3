// ============================================================================
// Decimal Configuration
// Precision and rounding settings for division and exponentiation
// ============================================================================

use super::errors::{DecimalError, DecimalResult};
use super::rounding::RoundingMode;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest accepted `decimal_places` value
pub const MAX_DECIMAL_PLACES: u32 = 1_000_000_000;

/// Settings that govern results which cannot be represented exactly.
///
/// Addition, subtraction and multiplication are always exact. Division
/// rounds its quotient to `decimal_places` with `rounding_mode`; integer
/// powers optionally truncate intermediates to `pow_precision` significant
/// digits.
///
/// There is no global instance: operations that need a config take one
/// explicitly (`divide_with`, `to_tokens_with`, ...) and the plain variants
/// use [`DecimalConfig::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecimalConfig {
    /// Fractional digits kept by division
    pub decimal_places: u32,

    /// Rounding applied when division discards digits
    pub rounding_mode: RoundingMode,

    /// Optional: significant digits kept by integer powers
    /// None means unlimited (exact) powers
    pub pow_precision: Option<u32>,
}

impl Default for DecimalConfig {
    fn default() -> Self {
        Self {
            decimal_places: 20,
            rounding_mode: RoundingMode::HalfUp,
            pow_precision: None,
        }
    }
}

impl DecimalConfig {
    /// Create a new configuration with required parameters
    pub fn new(decimal_places: u32, rounding_mode: RoundingMode) -> Self {
        Self {
            decimal_places,
            rounding_mode,
            pow_precision: None,
        }
    }

    /// Builder method: Set division decimal places
    pub fn with_decimal_places(mut self, decimal_places: u32) -> Self {
        self.decimal_places = decimal_places;
        self
    }

    /// Builder method: Set rounding mode
    pub fn with_rounding_mode(mut self, rounding_mode: RoundingMode) -> Self {
        self.rounding_mode = rounding_mode;
        self
    }

    /// Builder method: Limit integer powers to `digits` significant digits
    pub fn with_pow_precision(mut self, digits: u32) -> Self {
        self.pow_precision = Some(digits);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> DecimalResult<()> {
        if self.decimal_places > MAX_DECIMAL_PLACES {
            return Err(DecimalError::InvalidConfig(format!(
                "decimal places must not exceed {MAX_DECIMAL_PLACES}"
            )));
        }

        if self.pow_precision == Some(0) {
            return Err(DecimalError::InvalidConfig(
                "power precision must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// This configuration with out-of-range settings pulled back in range.
    ///
    /// Entry points that take a config use this instead of failing, so an
    /// oversized `decimal_places` computes at [`MAX_DECIMAL_PLACES`] and a
    /// zero `pow_precision` keeps one significant digit.
    pub(crate) fn clamped(&self) -> Self {
        if let Err(err) = self.validate() {
            tracing::warn!("Clamping decimal config: {}", err);
        }
        Self {
            decimal_places: self.decimal_places.min(MAX_DECIMAL_PLACES),
            rounding_mode: self.rounding_mode,
            pow_precision: self.pow_precision.map(|digits| digits.max(1)),
        }
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl DecimalConfig {
    /// On-chain style configuration
    /// - 18 decimal places (WAD resolution)
    /// - Truncating division, as integer EVM math does
    pub fn on_chain() -> Self {
        Self::new(18, RoundingMode::Down)
    }

    /// High precision configuration
    /// - 40 decimal places, enough to carry a full WAD² intermediate
    /// - Banker's rounding
    pub fn high_precision() -> Self {
        Self::new(40, RoundingMode::HalfEven)
    }
}
