// ============================================================================
// Decimal Amount
// Immutable arbitrary-precision decimal with NaN and infinity states
// ============================================================================

use super::config::DecimalConfig;
use super::errors::{DecimalError, DecimalResult};
use super::rounding::{self, RoundingMode};
use bigdecimal::{BigDecimal, FromPrimitive, ToPrimitive};
use num_bigint::{BigInt, Sign};
use num_traits::{One, Signed, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

/// Largest integer exponent computed exactly by `raise_to_power` (2^53 - 1).
const MAX_EXACT_EXPONENT: i64 = 9_007_199_254_740_991;

/// Fractional digits carried by root iteration beyond the requested places
const ROOT_GUARD_DIGITS: i64 = 10;

/// Upper bound on Newton steps for a root
const ROOT_MAX_ITERATIONS: usize = 200;

/// Largest `n × digits` for which a rounded root is checked for exactness
const ROOT_EXACT_CHECK_DIGITS: u64 = 100_000;

#[derive(Clone)]
enum Value {
    Finite(BigDecimal),
    NaN,
    Infinite { negative: bool },
}

/// Arbitrary-precision decimal amount.
///
/// Finite values are exact decimals (big integer mantissa with a decimal
/// scale), so `0.1 + 0.2 == 0.3` holds. Results that have no finite
/// value are represented rather than raised: `1 / 0` is `Infinity`,
/// `0 / 0` is `NaN`, and unparsable input given to the lenient
/// constructors is `NaN`.
///
/// Every method takes `&self` and returns a new amount, so calls chain:
///
/// ```
/// use defi_decimal::DecimalAmount;
///
/// let raw = DecimalAmount::from("1.5").to_basic_units(18);
/// assert_eq!(raw.to_string(), "1500000000000000000");
/// assert_eq!(raw.to_full_decimals(18), DecimalAmount::from("1.5"));
/// ```
#[derive(Clone)]
pub struct DecimalAmount {
    value: Value,
}

impl DecimalAmount {
    /// Not-a-number
    pub const NAN: Self = Self { value: Value::NaN };

    /// Positive infinity
    pub const INFINITY: Self = Self {
        value: Value::Infinite { negative: false },
    };

    /// Negative infinity
    pub const NEG_INFINITY: Self = Self {
        value: Value::Infinite { negative: true },
    };

    /// Largest decimal exponent of a finite value; larger values become infinite.
    pub const MAX_EXPONENT: i64 = 1_000_000_000;

    /// Smallest decimal exponent of a non-zero finite value; smaller values
    /// become zero.
    pub const MIN_EXPONENT: i64 = -1_000_000_000;

    // ========================================================================
    // Construction
    // ========================================================================

    /// Zero
    pub fn zero() -> Self {
        Self::finite(BigDecimal::zero())
    }

    /// One
    pub fn one() -> Self {
        Self::finite(BigDecimal::one())
    }

    /// Create from `mantissa × 10^-scale`.
    ///
    /// Values outside the exponent range overflow to a signed infinity or
    /// underflow to zero.
    pub fn from_parts(mantissa: BigInt, scale: i64) -> Self {
        Self::finite(BigDecimal::new(mantissa, scale))
    }

    /// Wrap an exact value, applying the exponent range.
    pub(crate) fn finite(value: BigDecimal) -> Self {
        if value.is_zero() {
            return Self {
                value: Value::Finite(BigDecimal::zero()),
            };
        }

        match decimal_exponent(&value) {
            Some(exponent) if exponent < Self::MIN_EXPONENT => {
                tracing::debug!("Decimal exponent {} underflows to zero", exponent);
                Self::zero()
            }
            Some(exponent) if exponent <= Self::MAX_EXPONENT => Self {
                value: Value::Finite(value),
            },
            _ => {
                tracing::debug!("Decimal exponent overflows to infinity");
                Self::infinite(value.sign() == Sign::Minus)
            }
        }
    }

    fn infinite(negative: bool) -> Self {
        Self {
            value: Value::Infinite { negative },
        }
    }

    /// Parse a string, producing `NaN` when it is not a number.
    ///
    /// Use [`str::parse`] when invalid input should be an error instead.
    pub fn parse_lossy(input: &str) -> Self {
        match input.parse() {
            Ok(amount) => amount,
            Err(err) => {
                tracing::debug!("Treating unparsable decimal as NaN: {}", err);
                Self::NAN
            }
        }
    }

    /// Parse a string written in `radix` (2 to 36).
    ///
    /// Accepts an optional sign, digits and an optional radix point
    /// (`"ff"`, `"-1010.1"`). Fractions that do not terminate in base ten
    /// are rounded with the default [`DecimalConfig`].
    ///
    /// # Errors
    /// - `InvalidRadix` if `radix` is outside 2..=36
    /// - `InvalidInput` if `input` contains digits invalid for `radix`
    pub fn from_str_radix(input: &str, radix: u32) -> DecimalResult<Self> {
        if !(2..=36).contains(&radix) {
            return Err(DecimalError::InvalidRadix(radix));
        }
        if radix == 10 {
            return input.parse();
        }

        let invalid = || DecimalError::InvalidInput(input.to_string());
        let (negative, body) = split_sign(input.trim());
        if let Some(special) = parse_special(body, negative) {
            return Ok(special);
        }

        let (int_digits, frac_digits) = body.split_once('.').unwrap_or((body, ""));
        let digits = format!("{int_digits}{frac_digits}");
        let mantissa = parse_digits(&digits, radix).ok_or_else(invalid)?;
        let mantissa = if negative { -mantissa } else { mantissa };

        if frac_digits.is_empty() {
            return Ok(Self::from_parts(mantissa, 0));
        }
        let denominator = num_traits::pow(BigInt::from(radix), frac_digits.len());
        Ok(Self::from_parts(mantissa, 0).divide(Self::from_parts(denominator, 0)))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The finite value, or `None` for NaN and infinities.
    pub fn to_big_decimal(&self) -> Option<BigDecimal> {
        self.as_finite().cloned()
    }

    pub(crate) fn as_finite(&self) -> Option<&BigDecimal> {
        match &self.value {
            Value::Finite(value) => Some(value),
            _ => None,
        }
    }

    /// Mantissa and scale with trailing zeros removed.
    pub(crate) fn normalized_parts(&self) -> Option<(BigInt, i64)> {
        self.as_finite()
            .map(|value| value.normalized().into_bigint_and_exponent())
    }

    /// Check if value is NaN.
    pub fn is_nan(&self) -> bool {
        matches!(self.value, Value::NaN)
    }

    /// Check if value is neither NaN nor infinite.
    pub fn is_finite(&self) -> bool {
        matches!(self.value, Value::Finite(_))
    }

    /// Check if value is zero.
    pub fn is_zero(&self) -> bool {
        self.as_finite().is_some_and(Zero::is_zero)
    }

    /// Check if value is below zero (including negative infinity).
    pub fn is_negative(&self) -> bool {
        match &self.value {
            Value::Finite(value) => *value < BigDecimal::zero(),
            Value::Infinite { negative } => *negative,
            Value::NaN => false,
        }
    }

    /// Check if value is above zero (including positive infinity).
    pub fn is_positive(&self) -> bool {
        match &self.value {
            Value::Finite(value) => *value > BigDecimal::zero(),
            Value::Infinite { negative } => !*negative,
            Value::NaN => false,
        }
    }

    /// Check if value is a finite whole number.
    pub fn is_integer(&self) -> bool {
        self.as_finite().is_some_and(BigDecimal::is_integer)
    }

    /// Digits after the decimal point, ignoring trailing zeros.
    ///
    /// `None` for NaN and infinities.
    pub fn decimal_places(&self) -> Option<u64> {
        self.as_finite()
            .map(|value| value.normalized().fractional_digit_count().max(0).unsigned_abs())
    }

    /// Absolute value.
    pub fn abs(&self) -> Self {
        if self.is_negative() {
            self.negate()
        } else {
            self.clone()
        }
    }

    /// Additive inverse.
    pub fn negate(&self) -> Self {
        match &self.value {
            Value::Finite(value) => Self::finite(-(value.clone())),
            Value::Infinite { negative } => Self::infinite(!negative),
            Value::NaN => Self::NAN,
        }
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Exact addition.
    pub fn add(&self, other: impl Into<DecimalAmount>) -> Self {
        let other = other.into();
        match (&self.value, &other.value) {
            (Value::NaN, _) | (_, Value::NaN) => Self::NAN,
            (Value::Infinite { negative: a }, Value::Infinite { negative: b }) => {
                if a == b {
                    Self::infinite(*a)
                } else {
                    Self::NAN
                }
            }
            (Value::Infinite { negative }, _) | (_, Value::Infinite { negative }) => {
                Self::infinite(*negative)
            }
            (Value::Finite(a), Value::Finite(b)) => Self::finite(a + b),
        }
    }

    /// Exact subtraction.
    pub fn subtract(&self, other: impl Into<DecimalAmount>) -> Self {
        self.add(other.into().negate())
    }

    /// Exact multiplication.
    pub fn multiply(&self, other: impl Into<DecimalAmount>) -> Self {
        let other = other.into();
        match (&self.value, &other.value) {
            (Value::NaN, _) | (_, Value::NaN) => Self::NAN,
            (Value::Infinite { negative: a }, Value::Infinite { negative: b }) => {
                Self::infinite(a != b)
            }
            (Value::Infinite { negative }, Value::Finite(factor))
            | (Value::Finite(factor), Value::Infinite { negative }) => {
                if factor.is_zero() {
                    Self::NAN
                } else {
                    Self::infinite(*negative != (*factor < BigDecimal::zero()))
                }
            }
            (Value::Finite(a), Value::Finite(b)) => Self::finite(a * b),
        }
    }

    /// Division rounded with the default [`DecimalConfig`].
    pub fn divide(&self, other: impl Into<DecimalAmount>) -> Self {
        self.divide_with(other, &DecimalConfig::default())
    }

    /// Division rounded to `config.decimal_places` with `config.rounding_mode`.
    ///
    /// Dividing a non-zero value by zero yields a signed infinity and
    /// `0 / 0` yields NaN.
    pub fn divide_with(&self, other: impl Into<DecimalAmount>, config: &DecimalConfig) -> Self {
        let other = other.into();
        let config = config.clamped();
        match (&self.value, &other.value) {
            (Value::NaN, _) | (_, Value::NaN) => Self::NAN,
            (Value::Infinite { .. }, Value::Infinite { .. }) => Self::NAN,
            (Value::Infinite { negative }, Value::Finite(divisor)) => {
                Self::infinite(*negative != (*divisor < BigDecimal::zero()))
            }
            (Value::Finite(_), Value::Infinite { .. }) => Self::zero(),
            (Value::Finite(dividend), Value::Finite(divisor)) if divisor.is_zero() => {
                tracing::debug!("Division of {} by zero", dividend);
                if dividend.is_zero() {
                    Self::NAN
                } else {
                    Self::infinite(*dividend < BigDecimal::zero())
                }
            }
            (Value::Finite(dividend), Value::Finite(divisor)) => {
                let places = i64::from(config.decimal_places);
                match divide_finite(dividend, divisor, places, config.rounding_mode) {
                    Some(quotient) => Self::finite(quotient),
                    None => {
                        tracing::debug!("Scale of {} / {} out of range", dividend, divisor);
                        Self::NAN
                    }
                }
            }
        }
    }

    /// Exponentiation with the default [`DecimalConfig`].
    pub fn raise_to_power(&self, exponent: impl Into<DecimalAmount>) -> Self {
        self.raise_to_power_with(exponent, &DecimalConfig::default())
    }

    /// Exponentiation.
    ///
    /// Integer exponents up to 2^53 - 1 in magnitude are computed exactly
    /// (truncated to `config.pow_precision` significant digits when set);
    /// negative ones take the reciprocal with `config`. Exponents that are
    /// exactly `±1/n` (`0.5`, `0.25`, `-0.2`) take the `n`-th root with
    /// [`nth_root_with`](Self::nth_root_with). Any other exponent is
    /// evaluated in `f64`, so a negative base with a fractional exponent is
    /// NaN.
    ///
    /// Non-finite operands follow `f64::powf`: `x^0` is one even for NaN
    /// and infinite `x`, and `1^NaN` is one.
    pub fn raise_to_power_with(
        &self,
        exponent: impl Into<DecimalAmount>,
        config: &DecimalConfig,
    ) -> Self {
        let exponent = exponent.into();
        let config = config.clamped();
        match (&self.value, exponent.exact_exponent()) {
            (Value::Finite(base), Some(n)) => integer_power(base, n, &config),
            (Value::Finite(_), None) => match exponent.reciprocal_root_index() {
                Some((n, false)) => self.nth_root_with(n, &config),
                Some((n, true)) => Self::one().divide_with(self.nth_root_with(n, &config), &config),
                None => self.float_power(&exponent),
            },
            _ => self.float_power(&exponent),
        }
    }

    /// `n`-th root with the default [`DecimalConfig`].
    pub fn nth_root(&self, n: u32) -> Self {
        self.nth_root_with(n, &DecimalConfig::default())
    }

    /// Real `n`-th root rounded to `config.decimal_places` with
    /// `config.rounding_mode`.
    ///
    /// Computed by Newton iteration on exact decimals. Negative values and
    /// `n == 0` give NaN, as `raise_to_power` does for fractional exponents.
    ///
    /// ```
    /// use defi_decimal::DecimalAmount;
    ///
    /// assert_eq!(DecimalAmount::from(27).nth_root(3), DecimalAmount::from(3));
    /// assert_eq!(
    ///     DecimalAmount::from(2).nth_root(2).to_string(),
    ///     "1.4142135623730950488"
    /// );
    /// ```
    pub fn nth_root_with(&self, n: u32, config: &DecimalConfig) -> Self {
        let config = config.clamped();
        match &self.value {
            Value::NaN => Self::NAN,
            _ if n == 0 => Self::NAN,
            Value::Infinite { negative } => {
                if *negative {
                    Self::NAN
                } else {
                    Self::INFINITY
                }
            }
            Value::Finite(radicand) if radicand.is_zero() => Self::zero(),
            Value::Finite(radicand) if radicand.sign() == Sign::Minus => Self::NAN,
            Value::Finite(_) if n == 1 => self.clone(),
            Value::Finite(radicand) => {
                let places = i64::from(config.decimal_places);
                match nth_root_finite(radicand, n, places, config.rounding_mode) {
                    Some(root) => Self::finite(root),
                    None => {
                        tracing::debug!("Root {} of {} did not resolve", n, radicand);
                        Self::NAN
                    }
                }
            }
        }
    }

    fn exact_exponent(&self) -> Option<i64> {
        self.to_i64_exact()
            .filter(|n| n.abs() <= MAX_EXACT_EXPONENT)
    }

    /// The value as `i64` when it is a whole number in range.
    pub(crate) fn to_i64_exact(&self) -> Option<i64> {
        let value = self.as_finite()?.normalized();
        let scale = value.fractional_digit_count();
        // Non-zero values with scale below -18 are at least 10^19
        if scale > 0 || scale < -18 {
            return None;
        }
        value.to_i64()
    }

    /// `(n, negative)` when this value is exactly `1/n` or `-1/n` for `n >= 2`.
    fn reciprocal_root_index(&self) -> Option<(u32, bool)> {
        let (mantissa, scale) = self.normalized_parts()?;
        // 1/n needs n | 10^scale; past 10^13 every such n exceeds u32
        if scale <= 0 || scale > 13 {
            return None;
        }
        let power = rounding::pow10(scale.unsigned_abs());
        let magnitude = mantissa.abs();
        if !(&power % &magnitude).is_zero() {
            return None;
        }
        let n = u32::try_from(power / magnitude).ok()?;
        Some((n, mantissa.is_negative()))
    }

    /// IEEE `powf` on the nearest floats, NaN and infinity included.
    fn float_power(&self, exponent: &DecimalAmount) -> Self {
        let base = self.to_f64_lossy();
        let power = exponent.to_f64_lossy();
        tracing::trace!("Evaluating {}^{} in f64", base, power);
        Self::from(base.powf(power))
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    /// Compare two values; `None` when either is NaN.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (&self.value, &other.value) {
            (Value::NaN, _) | (_, Value::NaN) => None,
            (Value::Infinite { negative: a }, Value::Infinite { negative: b }) => Some(b.cmp(a)),
            (Value::Infinite { negative }, Value::Finite(_)) => Some(if *negative {
                Ordering::Less
            } else {
                Ordering::Greater
            }),
            (Value::Finite(_), Value::Infinite { negative }) => Some(if *negative {
                Ordering::Greater
            } else {
                Ordering::Less
            }),
            (Value::Finite(a), Value::Finite(b)) => Some(a.cmp(b)),
        }
    }

    /// Smallest of one or more values; NaN if any value is NaN.
    ///
    /// # Errors
    /// Returns `EmptyInput` when `values` is empty.
    pub fn min<I, T>(values: I) -> DecimalResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<DecimalAmount>,
    {
        Self::extremum(values, Ordering::Less)
    }

    /// Largest of one or more values; NaN if any value is NaN.
    ///
    /// # Errors
    /// Returns `EmptyInput` when `values` is empty.
    pub fn max<I, T>(values: I) -> DecimalResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<DecimalAmount>,
    {
        Self::extremum(values, Ordering::Greater)
    }

    fn extremum<I, T>(values: I, wanted: Ordering) -> DecimalResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<DecimalAmount>,
    {
        let mut values = values.into_iter().map(Into::into);
        let mut best: DecimalAmount = values.next().ok_or(DecimalError::EmptyInput)?;
        for candidate in values {
            match candidate.compare(&best) {
                None => return Ok(Self::NAN),
                Some(ordering) if ordering == wanted => best = candidate,
                Some(_) => {}
            }
        }
        Ok(best)
    }
}

// ============================================================================
// Arithmetic Kernels
// ============================================================================

/// Decimal exponent of a non-zero value (`⌊log10 |value|⌋`); `None` past `i64`.
fn decimal_exponent(value: &BigDecimal) -> Option<i64> {
    let digits = i64::try_from(value.digits()).ok()?;
    digits
        .checked_sub(value.fractional_digit_count())?
        .checked_sub(1)
}

/// `log10 |value|` as a float, for magnitude estimates.
fn log10_magnitude(value: &BigDecimal) -> f64 {
    let exponent = decimal_exponent(value).unwrap_or(0);
    let (mantissa, scale) = value.as_bigint_and_exponent();
    let leading = BigDecimal::new(mantissa.abs(), scale.saturating_add(exponent))
        .to_f64()
        .unwrap_or(1.0);
    exponent as f64 + leading.log10()
}

/// Fractional digits of `numerator / denominator` when the quotient terminates.
fn terminating_digits(numerator: &BigInt, denominator: &BigInt) -> Option<u64> {
    let twos = denominator.trailing_zeros().unwrap_or(0);
    let mut rest = denominator.abs() >> twos;
    let five = BigInt::from(5u8);
    let mut fives = 0u64;
    while (&rest % &five).is_zero() {
        rest /= &five;
        fives += 1;
    }
    (numerator % &rest).is_zero().then_some(twos.max(fives))
}

/// `dividend / divisor` rounded to `places` fractional digits; `divisor` is non-zero.
///
/// `None` when the scales involved leave the `i64` range.
fn divide_finite(
    dividend: &BigDecimal,
    divisor: &BigDecimal,
    places: i64,
    mode: RoundingMode,
) -> Option<BigDecimal> {
    if dividend.is_zero() {
        return Some(BigDecimal::zero());
    }
    let negative = (dividend.sign() == Sign::Minus) != (divisor.sign() == Sign::Minus);
    let unit = if negative { -BigInt::one() } else { BigInt::one() };

    // 10^(gap-1) <= |quotient| < 10^(gap+1)
    let gap = decimal_exponent(dividend)?.checked_sub(decimal_exponent(divisor)?)?;
    if gap.checked_add(2)? <= places.checked_neg()? {
        // Below a tenth of the last place only the rounding direction matters
        let tiny = BigDecimal::new(unit, places.checked_add(2)?);
        return Some(rounding::round_to_scale(&tiny, places, mode).normalized());
    }
    if gap.checked_sub(1)? > DecimalAmount::MAX_EXPONENT {
        return Some(BigDecimal::new(unit, gap.checked_neg()?));
    }

    let (numerator, numerator_scale) = dividend.as_bigint_and_exponent();
    let (denominator, denominator_scale) = divisor.normalized().into_bigint_and_exponent();

    // A terminating quotient needs no more digits than it has
    let places = match terminating_digits(&numerator, &denominator) {
        Some(digits) => i64::try_from(digits)
            .ok()
            .and_then(|digits| digits.checked_add(numerator_scale))
            .and_then(|digits| digits.checked_sub(denominator_scale))
            .map_or(places, |exact| exact.min(places)),
        None => places,
    };

    // n·10^-ns / d·10^-ds = (n/d)·10^(ds-ns); keep one digit beyond `places`
    let shift = denominator_scale
        .checked_sub(numerator_scale)?
        .checked_add(places)?
        .checked_add(1)?;
    let (numerator, denominator) = if shift >= 0 {
        (numerator * rounding::pow10(shift.unsigned_abs()), denominator)
    } else {
        (numerator, denominator * rounding::pow10(shift.unsigned_abs()))
    };

    let quotient = &numerator / &denominator;
    let remainder = &numerator % &denominator;
    // A trailing non-zero digit marks the quotient as inexact for rounding
    let ten = BigInt::from(10u8);
    let digits = if remainder.is_zero() {
        quotient * ten
    } else {
        quotient * ten + unit
    };

    let truncated = BigDecimal::new(digits, places.checked_add(2)?);
    Some(rounding::round_to_scale(&truncated, places, mode).normalized())
}

/// `base^exponent` by repeated squaring, truncating intermediates to
/// `precision` significant digits when given.
fn exact_power(base: &BigDecimal, exponent: u64, precision: Option<u32>) -> BigDecimal {
    let truncate = |value: BigDecimal| match precision {
        Some(digits) => rounding::round_significant(value, digits, RoundingMode::Down),
        None => value,
    };

    let mut result = BigDecimal::one();
    let mut square = base.clone();
    let mut remaining = exponent;
    while remaining > 0 {
        if remaining & 1 == 1 {
            result = truncate(&result * &square);
        }
        remaining >>= 1;
        if remaining > 0 {
            square = truncate(&square * &square);
        }
    }
    result
}

fn integer_power(base: &BigDecimal, exponent: i64, config: &DecimalConfig) -> DecimalAmount {
    let magnitude = exponent.unsigned_abs();

    // Results far outside the exponent range are known without computing them
    if !base.is_zero() {
        let estimate = log10_magnitude(base) * magnitude as f64;
        let overflow = estimate > DecimalAmount::MAX_EXPONENT as f64 + 1.0;
        let underflow = estimate < DecimalAmount::MIN_EXPONENT as f64 - 1.0;
        if overflow || underflow {
            tracing::debug!("{}^{} is beyond the exponent range", base, exponent);
            let odd_negative = base.sign() == Sign::Minus && magnitude % 2 == 1;
            return if overflow == (exponent > 0) {
                DecimalAmount::infinite(odd_negative)
            } else {
                DecimalAmount::zero()
            };
        }
    }

    let result = DecimalAmount::finite(exact_power(base, magnitude, config.pow_precision));
    if exponent < 0 {
        DecimalAmount::one().divide_with(result, config)
    } else {
        result
    }
}

/// Real `n`-th root (`n >= 2`) of a positive value, rounded to `places`.
fn nth_root_finite(
    radicand: &BigDecimal,
    n: u32,
    places: i64,
    mode: RoundingMode,
) -> Option<BigDecimal> {
    let (guess, root_exponent) = initial_root(radicand, n)?;

    // Enough fractional digits to keep `places` plus guard digits for roots below one
    let scale = places
        .checked_add(ROOT_GUARD_DIGITS)?
        .checked_add(root_exponent.checked_neg()?.max(0))?;
    let significant = scale
        .checked_add(root_exponent.max(0))?
        .checked_add(ROOT_GUARD_DIGITS)?;
    let significant = u32::try_from(significant).unwrap_or(u32::MAX);
    // Truncating steps settle within a few units of the last working digit
    let tolerance = BigDecimal::new(BigInt::from(10u8), scale);

    let order = BigDecimal::from(n);
    let order_minus_one = BigDecimal::from(n - 1);
    let mut root = guess;
    for _ in 0..ROOT_MAX_ITERATIONS {
        // y' = ((n - 1)·y + x / y^(n-1)) / n
        let power = exact_power(&root, u64::from(n - 1), Some(significant));
        if power.is_zero() {
            return None;
        }
        let correction = divide_finite(radicand, &power, scale, RoundingMode::Down)?;
        let next = divide_finite(
            &(&root * &order_minus_one + correction),
            &order,
            scale,
            RoundingMode::Down,
        )?;
        let converged = (&next - &root).abs() <= tolerance;
        root = next;
        if converged {
            break;
        }
    }

    // Exact roots must not lose their last digit to the working truncation
    let nearest = rounding::round_to_scale(&root, places, RoundingMode::HalfUp);
    let check_digits = u64::from(n).saturating_mul(nearest.digits());
    if check_digits <= ROOT_EXACT_CHECK_DIGITS
        && exact_power(&nearest, u64::from(n), None) == *radicand
    {
        return Some(nearest.normalized());
    }

    Some(rounding::round_to_scale(&root, places, mode).normalized())
}

/// Float estimate of the `n`-th root of a positive value, with its
/// decimal exponent.
fn initial_root(radicand: &BigDecimal, n: u32) -> Option<(BigDecimal, i64)> {
    let exponent = decimal_exponent(radicand)?;
    let log10 = log10_magnitude(radicand);
    let order = i64::from(n);

    // x = lead·10^(q·n + r) with 0 <= r < n, so x^(1/n) = (lead·10^r)^(1/n)·10^q
    let q = exponent.div_euclid(order);
    let lead_log10 = log10 - (q * order) as f64;
    let estimate = 10f64.powf(lead_log10 / f64::from(n));
    let estimate = BigDecimal::from_f64(estimate).filter(|value| value.is_positive())?;
    Some((estimate * BigDecimal::new(BigInt::one(), -q), q))
}

// ============================================================================
// String Parsing
// ============================================================================

fn split_sign(input: &str) -> (bool, &str) {
    if let Some(rest) = input.strip_prefix('-') {
        (true, rest)
    } else {
        (false, input.strip_prefix('+').unwrap_or(input))
    }
}

fn parse_special(body: &str, negative: bool) -> Option<DecimalAmount> {
    match body {
        "NaN" => Some(DecimalAmount::NAN),
        "Infinity" => Some(DecimalAmount::infinite(negative)),
        _ => None,
    }
}

/// Parse a signed decimal exponent, saturating at the `i64` bounds.
fn parse_exponent(input: &str) -> Option<i64> {
    let (negative, digits) = split_sign(input);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(match digits.parse::<i64>() {
        Ok(exponent) if negative => -exponent,
        Ok(exponent) => exponent,
        Err(_) if negative => i64::MIN,
        Err(_) => i64::MAX,
    })
}

/// Parse a non-empty run of digits valid in `radix`.
fn parse_digits(digits: &str, radix: u32) -> Option<BigInt> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    BigInt::parse_bytes(digits.as_bytes(), radix)
}

fn radix_prefix(body: &str) -> Option<(u32, &str)> {
    let prefix = body.get(..2)?.to_ascii_lowercase();
    let radix = match prefix.as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };
    Some((radix, &body[2..]))
}

impl FromStr for DecimalAmount {
    type Err = DecimalError;

    /// Parse a decimal string.
    ///
    /// # Examples
    /// - "123.456", "-0.001", ".5", "1.5e18", "2E-3"
    /// - "0xff", "0b1010", "0o17" (prefixed integers)
    /// - "NaN", "Infinity", "-Infinity"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DecimalError::InvalidInput(s.to_string());
        let (negative, body) = split_sign(s.trim());
        if let Some(special) = parse_special(body, negative) {
            return Ok(special);
        }

        if let Some((radix, digits)) = radix_prefix(body) {
            let mantissa = parse_digits(digits, radix).ok_or_else(invalid)?;
            return Ok(Self::from_parts(
                if negative { -mantissa } else { mantissa },
                0,
            ));
        }

        // Split off exponent
        let (coefficient, exponent) = match body.find(['e', 'E']) {
            Some(pos) => {
                let exponent = parse_exponent(&body[pos + 1..]).ok_or_else(invalid)?;
                (&body[..pos], exponent)
            }
            None => (body, 0),
        };

        // Split on decimal point
        let (int_digits, frac_digits) = coefficient.split_once('.').unwrap_or((coefficient, ""));
        let all_digits = format!("{int_digits}{frac_digits}");
        let mantissa = parse_digits(&all_digits, 10).ok_or_else(invalid)?;

        // Out-of-range exponents saturate; construction maps them to infinity or zero
        let frac_len = i64::try_from(frac_digits.len()).map_err(|_| invalid())?;
        let scale = frac_len.saturating_sub(exponent);

        Ok(Self::from_parts(
            if negative { -mantissa } else { mantissa },
            scale,
        ))
    }
}

// ============================================================================
// Conversions
// ============================================================================

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for DecimalAmount {
                fn from(value: $t) -> Self {
                    Self::from_parts(BigInt::from(value), 0)
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl From<f64> for DecimalAmount {
    /// Finite floats convert through their shortest round-trip rendering,
    /// so `0.1` becomes exactly `0.1`.
    fn from(value: f64) -> Self {
        if value.is_nan() {
            Self::NAN
        } else if value.is_infinite() {
            Self::infinite(value < 0.0)
        } else {
            // f64 Display is always plain notation
            Self::parse_lossy(&value.to_string())
        }
    }
}

impl From<BigDecimal> for DecimalAmount {
    fn from(value: BigDecimal) -> Self {
        Self::finite(value)
    }
}

impl From<&DecimalAmount> for DecimalAmount {
    fn from(value: &DecimalAmount) -> Self {
        value.clone()
    }
}

impl From<&str> for DecimalAmount {
    /// Lenient: unparsable input becomes NaN.
    fn from(value: &str) -> Self {
        Self::parse_lossy(value)
    }
}

impl From<String> for DecimalAmount {
    /// Lenient: unparsable input becomes NaN.
    fn from(value: String) -> Self {
        Self::parse_lossy(&value)
    }
}

impl Default for DecimalAmount {
    fn default() -> Self {
        Self::zero()
    }
}

// ============================================================================
// Conversion from rust_decimal (for API boundaries)
// ============================================================================

impl From<rust_decimal::Decimal> for DecimalAmount {
    fn from(value: rust_decimal::Decimal) -> Self {
        Self::from_parts(BigInt::from(value.mantissa()), i64::from(value.scale()))
    }
}

impl DecimalAmount {
    /// Convert to rust_decimal::Decimal.
    ///
    /// Digits beyond rust_decimal's 28 fractional places are rounded.
    ///
    /// # Errors
    /// - `NotFinite` for NaN and infinities
    /// - `Overflow` if the value is too large
    pub fn to_decimal(&self) -> DecimalResult<rust_decimal::Decimal> {
        let value = self.as_finite().ok_or(DecimalError::NotFinite)?;
        if decimal_exponent(value).is_some_and(|exponent| exponent > 28) {
            return Err(DecimalError::Overflow);
        }
        let value = if value.fractional_digit_count() > 28 {
            rounding::round_to_scale(value, 28, RoundingMode::HalfEven)
        } else {
            value.clone()
        };
        rust_decimal::Decimal::from_str(&value.normalized().to_plain_string())
            .map_err(|_| DecimalError::Overflow)
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl PartialEq for DecimalAmount {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for DecimalAmount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other)
    }
}

impl fmt::Debug for DecimalAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DecimalAmount({})", self)
    }
}

/// Operators are implemented for references so that `a.add(b)` keeps
/// resolving to the non-consuming inherent methods.
macro_rules! forward_binary_op {
    ($op:ident, $method:ident, $inherent:ident) => {
        impl<T: Into<DecimalAmount>> $op<T> for &DecimalAmount {
            type Output = DecimalAmount;

            fn $method(self, rhs: T) -> DecimalAmount {
                DecimalAmount::$inherent(self, rhs)
            }
        }
    };
}

forward_binary_op!(Add, add, add);
forward_binary_op!(Sub, sub, subtract);
forward_binary_op!(Mul, mul, multiply);
forward_binary_op!(Div, div, divide);

impl Neg for DecimalAmount {
    type Output = DecimalAmount;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl Neg for &DecimalAmount {
    type Output = DecimalAmount;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

// ============================================================================
// Serialization
// ============================================================================

#[cfg(feature = "serde")]
mod serde_impl {
    use super::DecimalAmount;
    use serde::de::{self, Visitor};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::fmt;

    impl Serialize for DecimalAmount {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    struct AmountVisitor;

    impl Visitor<'_> for AmountVisitor {
        type Value = DecimalAmount;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a decimal string or number")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            v.parse().map_err(E::custom)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(DecimalAmount::from(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(DecimalAmount::from(v))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(DecimalAmount::from(v))
        }
    }

    impl<'de> Deserialize<'de> for DecimalAmount {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_any(AmountVisitor)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
