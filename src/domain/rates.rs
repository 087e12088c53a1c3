// ============================================================================
// Interest Rate Conversions
// APR (simple annual rate) <-> APY (daily-compounded effective yield)
// ============================================================================

use super::constants::COMPOUNDING_PERIODS_PER_YEAR;
use crate::numeric::{DecimalAmount, DecimalConfig};

impl DecimalAmount {
    /// Effective yield of this APR compounded daily: `(1 + apr/365)^365 - 1`.
    ///
    /// The power is integral, so it is exact; only `apr/365` is rounded.
    pub fn to_apy(&self) -> Self {
        self.to_apy_with(&DecimalConfig::default())
    }

    /// [`to_apy`](Self::to_apy) with an explicit config.
    pub fn to_apy_with(&self, config: &DecimalConfig) -> Self {
        let periods = DecimalAmount::from(COMPOUNDING_PERIODS_PER_YEAR);
        DecimalAmount::one()
            .add(self.divide_with(&periods, config))
            .raise_to_power_with(&periods, config)
            .subtract(1)
    }

    /// APR that compounds daily to this APY: `((1 + apy)^(1/365) - 1) × 365`.
    ///
    /// The 365th root is taken on exact decimals to the config's decimal
    /// places, so `to_apr(to_apy(r))` recovers `r` to that precision. An APY
    /// at or below -1 leaves a non-positive base: `-1` gives `-365`,
    /// anything lower gives NaN.
    pub fn to_apr(&self) -> Self {
        self.to_apr_with(&DecimalConfig::default())
    }

    /// [`to_apr`](Self::to_apr) with an explicit config.
    pub fn to_apr_with(&self, config: &DecimalConfig) -> Self {
        DecimalAmount::one()
            .add(self)
            .nth_root_with(COMPOUNDING_PERIODS_PER_YEAR, config)
            .subtract(1)
            .multiply(COMPOUNDING_PERIODS_PER_YEAR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> DecimalAmount {
        s.parse().unwrap()
    }

    fn assert_close(actual: &DecimalAmount, expected: &str, tolerance: &str) {
        let diff = actual.subtract(dec(expected)).abs();
        assert!(diff < dec(tolerance), "{actual} is not within {tolerance} of {expected}");
    }

    #[test]
    fn test_to_apy() {
        let apy = dec("0.05").to_apy();
        assert_close(&apy, "0.0512674964674", "1e-12");
        assert!(DecimalAmount::zero().to_apy().is_zero());
    }

    #[test]
    fn test_to_apr() {
        let apr = dec("0.0512674964674").to_apr();
        assert_close(&apr, "0.05", "1e-9");
        assert!(DecimalAmount::zero().to_apr().is_zero());
    }

    #[test]
    fn test_round_trip() {
        for rate in ["0.01", "0.05", "0.2", "1.5", "-0.1"] {
            let back = dec(rate).to_apy().to_apr();
            assert_close(&back, rate, "1e-9");
        }
    }

    #[test]
    fn test_round_trip_at_high_precision() {
        let config = DecimalConfig::high_precision();
        for rate in ["0.05", "0.0001", "0.35", "-0.2"] {
            let back = dec(rate).to_apy_with(&config).to_apr_with(&config);
            assert_close(&back, rate, "1e-30");
        }
    }

    #[test]
    fn test_round_trip_at_default_precision() {
        let back = dec("0.05").to_apy().to_apr();
        assert_close(&back, "0.05", "1e-16");
    }

    #[test]
    fn test_pow_precision_keeps_apy_compact() {
        let config = DecimalConfig::default().with_pow_precision(40);
        let apy = dec("0.05").to_apy_with(&config);
        assert!(apy.decimal_places().unwrap() <= 40);
        assert_close(&apy, "0.0512674964674", "1e-12");
    }

    #[test]
    fn test_out_of_domain() {
        assert!(dec("-2").to_apr().is_nan());
        assert!(DecimalAmount::NAN.to_apy().is_nan());
        // A base of exactly zero is still real-valued
        assert_eq!(DecimalAmount::from(-1).to_apr(), DecimalAmount::from(-365));
    }
}
