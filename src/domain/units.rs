// ============================================================================
// Unit Scale Conversions
// Basic units (raw integers) <-> full decimals (human-readable amounts)
// ============================================================================

use crate::numeric::DecimalAmount;
use num_bigint::BigInt;
use num_traits::One;

impl DecimalAmount {
    /// Scale a human-readable amount up to basic units: `value × 10^decimals`.
    ///
    /// ```
    /// use defi_decimal::DecimalAmount;
    ///
    /// let wei = DecimalAmount::from("1.5").to_basic_units(18);
    /// assert_eq!(wei.to_string(), "1500000000000000000");
    /// ```
    pub fn to_basic_units(&self, decimals: impl Into<DecimalAmount>) -> Self {
        self.multiply(power_of_ten(&decimals.into(), false))
    }

    /// Scale basic units down to a human-readable amount: `value / 10^decimals`.
    pub fn to_full_decimals(&self, decimals: impl Into<DecimalAmount>) -> Self {
        self.multiply(power_of_ten(&decimals.into(), true))
    }
}

/// `10^exponent` (or `10^-exponent`), exact by construction.
///
/// Only whole exponents form a power of ten; anything else is NaN.
fn power_of_ten(exponent: &DecimalAmount, reciprocal: bool) -> DecimalAmount {
    let scale = exponent
        .to_i64_exact()
        .and_then(|n| if reciprocal { Some(n) } else { n.checked_neg() });

    match scale {
        Some(scale) => DecimalAmount::from_parts(BigInt::one(), scale),
        None => {
            tracing::debug!("No power of ten for decimals {}", exponent);
            DecimalAmount::NAN
        }
    }
}
