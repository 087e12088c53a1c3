//! Property-based tests using `proptest` for conversion invariants.
//!
//! 1. **Unit round trip** — `to_full_decimals(to_basic_units(x, d), d) == x`.
//! 2. **Token round trip** — `to_tokens(to_underlying(t, r), r) ≈ t`.
//! 3. **USD round trip** — `from_usd(to_usd(v, p), p) == v`.
//! 4. **Rate round trip** — `to_apr(to_apy(r)) ≈ r`.
//! 5. **Plain output idempotence** and **sentinel safety**.

use defi_decimal::prelude::*;
use num_bigint::BigInt;
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn finite_amount() -> impl Strategy<Value = DecimalAmount> {
    (any::<i64>(), -10i64..20).prop_map(|(mantissa, scale)| {
        DecimalAmount::from_parts(BigInt::from(mantissa), scale)
    })
}

/// Signed token balances from whole units down to 24 fractional digits
fn token_amount() -> impl Strategy<Value = DecimalAmount> {
    const BOUND: i128 = 1_000_000_000_000_000_000_000_000;
    (-BOUND..BOUND, 0i64..=24).prop_map(|(mantissa, scale)| {
        DecimalAmount::from_parts(BigInt::from(mantissa), scale)
    })
}

/// WAD-scaled exchange rates between 0.001 and 1000
fn exchange_rate() -> impl Strategy<Value = DecimalAmount> {
    (1_000_000_000_000_000u128..1_000_000_000_000_000_000_000u128).prop_map(DecimalAmount::from)
}

/// Prices with up to 18 fractional digits, covering sub-cent meme tokens
fn nonzero_price() -> impl Strategy<Value = DecimalAmount> {
    (1i64..1_000_000_000_000_000_000, 0i64..=18, any::<bool>()).prop_map(
        |(mantissa, scale, negative)| {
            let mantissa = if negative { -mantissa } else { mantissa };
            DecimalAmount::from_parts(BigInt::from(mantissa), scale)
        },
    )
}

/// Annual rates from -90% to +500% with six decimal places
fn annual_rate() -> impl Strategy<Value = DecimalAmount> {
    (-900_000i64..5_000_000).prop_map(|micros| DecimalAmount::from_parts(BigInt::from(micros), 6))
}

fn non_finite() -> impl Strategy<Value = DecimalAmount> {
    prop_oneof![
        Just(DecimalAmount::NAN),
        Just(DecimalAmount::INFINITY),
        Just(DecimalAmount::NEG_INFINITY),
    ]
}

fn within(actual: &DecimalAmount, expected: &DecimalAmount, tolerance: &str) -> bool {
    actual.subtract(expected).abs() <= DecimalAmount::from(tolerance)
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn unit_round_trip_is_exact(x in finite_amount(), decimals in 0u32..=30) {
        prop_assert_eq!(x.to_basic_units(decimals).to_full_decimals(decimals), x);
    }

    #[test]
    fn token_round_trip(tokens in token_amount(), rate in exchange_rate()) {
        let back = tokens.to_underlying(&rate).to_tokens(&rate);
        prop_assert!(within(&back, &tokens, "1e-15"), "{} vs {}", back, tokens);
    }

    #[test]
    fn wei_scale_tokens_survive_exchange(wei in any::<i64>(), rate in exchange_rate()) {
        let tokens = DecimalAmount::from_parts(BigInt::from(wei), 18);
        let back = tokens.to_underlying(&rate).to_tokens(&rate);
        prop_assert!(within(&back, &tokens, "1e-15"), "{} vs {}", back, tokens);
    }

    #[test]
    fn usd_round_trip(value in finite_amount(), price in nonzero_price()) {
        prop_assert_eq!(value.to_usd(&price).from_usd(&price), value);
    }

    #[test]
    fn rate_round_trip(apr in annual_rate()) {
        let back = apr.to_apy().to_apr();
        prop_assert!(within(&back, &apr, "1e-15"), "{} vs {}", back, apr);
    }

    #[test]
    fn remove_scientific_notation_is_idempotent(x in finite_amount()) {
        let plain = x.remove_scientific_notation();
        prop_assert!(!plain.contains('e'));
        let reparsed: DecimalAmount = plain.parse().unwrap();
        prop_assert_eq!(reparsed.remove_scientific_notation(), plain);
    }

    #[test]
    fn safe_fixed_never_exceeds_requested_places(x in finite_amount(), places in 0u32..25) {
        let fixed = x.to_safe_fixed(places, RoundingMode::HalfUp);
        prop_assert!(!fixed.contains('e'));
        let reparsed: DecimalAmount = fixed.parse().unwrap();
        prop_assert!(reparsed.decimal_places().unwrap() <= u64::from(places));
    }

    #[test]
    fn safe_output_hides_sentinels(x in non_finite()) {
        prop_assert_eq!(x.to_safe_string(), "0");
        prop_assert_eq!(x.to_safe_number(), 0.0);
    }

    #[test]
    fn division_by_zero_is_never_zero(x in finite_amount()) {
        let result = x.divide(0);
        prop_assert!(!result.is_finite());
        prop_assert_eq!(result.is_nan(), x.is_zero());
    }
}
