// ============================================================================
// Rounding
// Rounding modes and their mapping onto the bigdecimal rounding primitives
// ============================================================================

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use std::num::NonZeroU64;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a value is rounded when digits have to be discarded.
///
/// | Mode | 2.5 | -2.5 | 1.6 | -1.1 |
/// |------|-----|------|-----|------|
/// | `Up` | 3 | -3 | 2 | -2 |
/// | `Down` | 2 | -2 | 1 | -1 |
/// | `Ceiling` | 3 | -2 | 2 | -1 |
/// | `Floor` | 2 | -3 | 1 | -2 |
/// | `HalfUp` | 3 | -3 | 2 | -1 |
/// | `HalfDown` | 2 | -2 | 2 | -1 |
/// | `HalfEven` | 2 | -2 | 2 | -1 |
/// | `HalfCeiling` | 3 | -2 | 2 | -1 |
/// | `HalfFloor` | 2 | -3 | 2 | -1 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RoundingMode {
    /// Away from zero
    Up,
    /// Towards zero (truncation)
    Down,
    /// Towards positive infinity
    Ceiling,
    /// Towards negative infinity
    Floor,
    /// Nearest neighbour, ties away from zero
    #[default]
    HalfUp,
    /// Nearest neighbour, ties towards zero
    HalfDown,
    /// Nearest neighbour, ties to the even neighbour
    HalfEven,
    /// Nearest neighbour, ties towards positive infinity
    HalfCeiling,
    /// Nearest neighbour, ties towards negative infinity
    HalfFloor,
}

impl RoundingMode {
    /// Every supported mode.
    pub const ALL: [RoundingMode; 9] = [
        RoundingMode::Up,
        RoundingMode::Down,
        RoundingMode::Ceiling,
        RoundingMode::Floor,
        RoundingMode::HalfUp,
        RoundingMode::HalfDown,
        RoundingMode::HalfEven,
        RoundingMode::HalfCeiling,
        RoundingMode::HalfFloor,
    ];

    /// The bigdecimal mode that rounds a value of the given sign like `self`.
    ///
    /// bigdecimal has no sign-directed tie breaking, but a tie towards an
    /// infinity is a tie away from or towards zero once the sign is known.
    fn for_sign(self, negative: bool) -> bigdecimal::RoundingMode {
        use bigdecimal::RoundingMode as Engine;

        match self {
            RoundingMode::Up => Engine::Up,
            RoundingMode::Down => Engine::Down,
            RoundingMode::Ceiling => Engine::Ceiling,
            RoundingMode::Floor => Engine::Floor,
            RoundingMode::HalfUp => Engine::HalfUp,
            RoundingMode::HalfDown => Engine::HalfDown,
            RoundingMode::HalfEven => Engine::HalfEven,
            RoundingMode::HalfCeiling if negative => Engine::HalfDown,
            RoundingMode::HalfCeiling => Engine::HalfUp,
            RoundingMode::HalfFloor if negative => Engine::HalfUp,
            RoundingMode::HalfFloor => Engine::HalfDown,
        }
    }
}

// ============================================================================
// Rounding Helpers
// ============================================================================

/// 10^exp as a big integer.
pub(crate) fn pow10(exp: u64) -> BigInt {
    num_traits::pow(BigInt::from(10u8), exp as usize)
}

/// Re-express `value` with exactly `scale` fractional digits.
///
/// Widening the scale is exact; narrowing it rounds with `mode`.
pub(crate) fn round_to_scale(value: &BigDecimal, scale: i64, mode: RoundingMode) -> BigDecimal {
    let negative = value.sign() == num_bigint::Sign::Minus;
    value.with_scale_round(scale, mode.for_sign(negative))
}

/// Keep at most `digits` significant digits of `value`.
pub(crate) fn round_significant(value: BigDecimal, digits: u32, mode: RoundingMode) -> BigDecimal {
    let digits = NonZeroU64::new(u64::from(digits)).unwrap_or(NonZeroU64::MIN);
    if value.digits() <= digits.get() {
        return value;
    }
    let negative = value.sign() == num_bigint::Sign::Minus;
    value.with_precision_round(digits, mode.for_sign(negative))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn big(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn round_tenths(tenths: i64, mode: RoundingMode) -> i64 {
        let rounded = round_to_scale(&BigDecimal::new(BigInt::from(tenths), 1), 0, mode);
        let (mantissa, scale) = rounded.into_bigint_and_exponent();
        assert_eq!(scale, 0);
        i64::try_from(mantissa).unwrap()
    }

    #[test]
    fn test_rounding_table() {
        let inputs = [55, 25, 16, 11, 10, -10, -11, -16, -25, -55];
        let expected: [(RoundingMode, [i64; 10]); 9] = [
            (RoundingMode::Up, [6, 3, 2, 2, 1, -1, -2, -2, -3, -6]),
            (RoundingMode::Down, [5, 2, 1, 1, 1, -1, -1, -1, -2, -5]),
            (RoundingMode::Ceiling, [6, 3, 2, 2, 1, -1, -1, -1, -2, -5]),
            (RoundingMode::Floor, [5, 2, 1, 1, 1, -1, -2, -2, -3, -6]),
            (RoundingMode::HalfUp, [6, 3, 2, 1, 1, -1, -1, -2, -3, -6]),
            (RoundingMode::HalfDown, [5, 2, 2, 1, 1, -1, -1, -2, -2, -5]),
            (RoundingMode::HalfEven, [6, 2, 2, 1, 1, -1, -1, -2, -2, -6]),
            (RoundingMode::HalfCeiling, [6, 3, 2, 1, 1, -1, -1, -2, -2, -5]),
            (RoundingMode::HalfFloor, [5, 2, 2, 1, 1, -1, -1, -2, -3, -6]),
        ];

        for (mode, row) in expected {
            for (input, want) in inputs.iter().zip(row) {
                assert_eq!(round_tenths(*input, mode), want, "{mode:?} of {input}/10");
            }
        }
    }

    #[test]
    fn test_small_values_round_at_the_target_digit() {
        // -0.01 truncates to 0 but floors to -1
        let value = big("-0.01");
        assert_eq!(round_to_scale(&value, 0, RoundingMode::Floor), big("-1"));
        assert_eq!(round_to_scale(&value, 0, RoundingMode::Down), big("0"));
        assert_eq!(round_to_scale(&big("0.0001"), 2, RoundingMode::Up), big("0.01"));
        assert_eq!(round_to_scale(&big("0.004"), 2, RoundingMode::HalfUp), big("0"));
    }

    #[test]
    fn test_round_to_scale() {
        let rounded = round_to_scale(&big("1.23456"), 2, RoundingMode::Down);
        assert_eq!(rounded.into_bigint_and_exponent(), (BigInt::from(123), 2));

        let widened = round_to_scale(&big("1.5"), 3, RoundingMode::Down);
        assert_eq!(widened.into_bigint_and_exponent(), (BigInt::from(1500), 3));

        let carried = round_to_scale(&big("9.995"), 2, RoundingMode::HalfUp);
        assert_eq!(carried, big("10"));
    }

    #[test]
    fn test_round_significant() {
        let rounded = round_significant(big("123.456"), 3, RoundingMode::Down);
        assert_eq!(rounded, big("123"));

        let untouched = round_significant(big("4.2"), 10, RoundingMode::Down);
        assert_eq!(untouched.into_bigint_and_exponent(), (BigInt::from(42), 1));
    }

    #[test]
    fn test_default_mode() {
        assert_eq!(RoundingMode::default(), RoundingMode::HalfUp);
        assert_eq!(RoundingMode::ALL.len(), 9);
    }
}
