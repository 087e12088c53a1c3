// ============================================================================
// Output Formatting
// Canonical, fixed-point and safe renderings of decimal amounts
// ============================================================================

use super::amount::DecimalAmount;
use super::rounding::{self, RoundingMode};
use bigdecimal::{BigDecimal, ToPrimitive};
use std::fmt;

/// Decimal exponents at or below this render in exponential notation
const EXPONENTIAL_AT_NEGATIVE: i64 = -7;

/// Decimal exponents at or above this render in exponential notation
const EXPONENTIAL_AT_POSITIVE: i64 = 21;

/// `d.ddde±x` for a normalized value.
fn exponential_string(value: &BigDecimal) -> String {
    let scientific = value.to_scientific_notation();
    match scientific.split_once('e') {
        Some((coefficient, exponent)) if !exponent.starts_with('-') => {
            format!("{coefficient}e+{exponent}")
        }
        _ => scientific,
    }
}

impl fmt::Display for DecimalAmount {
    /// Canonical string: plain notation for decimal exponents between -6
    /// and 20, exponential notation (`1.5e+21`, `1e-7`) beyond.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(value) = self.as_finite() else {
            return f.write_str(if self.is_nan() {
                "NaN"
            } else if self.is_negative() {
                "-Infinity"
            } else {
                "Infinity"
            });
        };

        let value = value.normalized();
        let exponent = value.order_of_magnitude();
        if exponent <= EXPONENTIAL_AT_NEGATIVE || exponent >= EXPONENTIAL_AT_POSITIVE {
            f.write_str(&exponential_string(&value))
        } else {
            f.write_str(&value.to_plain_string())
        }
    }
}

impl DecimalAmount {
    /// Fixed-point string with exactly `decimal_places` fractional digits,
    /// rounded with `mode`. Never exponential.
    ///
    /// NaN and infinities render as in `Display`. A value that rounds to
    /// zero prints without a sign.
    pub fn to_fixed(&self, decimal_places: u32, mode: RoundingMode) -> String {
        self.fixed_string(i64::from(decimal_places), mode)
    }

    fn fixed_string(&self, decimal_places: i64, mode: RoundingMode) -> String {
        match self.as_finite() {
            Some(value) => rounding::round_to_scale(value, decimal_places, mode).to_plain_string(),
            None => self.to_string(),
        }
    }

    /// Plain-notation string with the value's own decimal places.
    ///
    /// ```
    /// use defi_decimal::DecimalAmount;
    ///
    /// let tiny: DecimalAmount = "1e-9".parse().unwrap();
    /// assert_eq!(tiny.to_string(), "1e-9");
    /// assert_eq!(tiny.remove_scientific_notation(), "0.000000001");
    /// ```
    pub fn remove_scientific_notation(&self) -> String {
        let places = self.decimal_places().unwrap_or(0);
        self.fixed_string(places as i64, RoundingMode::Down)
    }

    /// Round to `decimal_places` with `mode`, then drop the padding zeros.
    ///
    /// `1.5` to two places gives `"1.5"`, not `"1.50"`.
    pub fn to_safe_fixed(&self, decimal_places: u32, mode: RoundingMode) -> String {
        let rounded = self.to_fixed(decimal_places, mode);
        match rounded.parse::<DecimalAmount>() {
            Ok(reparsed) if reparsed.is_finite() => {
                let places = reparsed.decimal_places().unwrap_or(0);
                reparsed.fixed_string(places as i64, mode)
            }
            _ => rounded,
        }
    }

    /// Canonical string, or `"0"` for NaN and infinities.
    pub fn to_safe_string(&self) -> String {
        if self.is_finite() {
            self.to_string()
        } else {
            tracing::debug!("Replacing non-finite {} with \"0\"", self);
            "0".to_string()
        }
    }

    /// Lossy `f64`, or `0.0` for NaN, infinities and values beyond `f64` range.
    pub fn to_safe_number(&self) -> f64 {
        let number = self.to_f64_lossy();
        if number.is_finite() {
            number
        } else {
            tracing::debug!("Replacing non-finite {} with 0", self);
            0.0
        }
    }

    /// Nearest `f64`; NaN and infinities map to their float counterparts.
    pub(crate) fn to_f64_lossy(&self) -> f64 {
        match self.as_finite() {
            Some(value) => value.to_f64().unwrap_or(f64::NAN),
            None if self.is_nan() => f64::NAN,
            None if self.is_negative() => f64::NEG_INFINITY,
            None => f64::INFINITY,
        }
    }
}
