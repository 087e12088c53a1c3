// ============================================================================
// Exchange Rate Conversions
// Yield-bearing token amounts <-> underlying asset amounts
// ============================================================================

use super::constants::WAD;
use crate::numeric::{DecimalAmount, DecimalConfig};

impl DecimalAmount {
    /// Underlying amount for this token amount: `rate × tokens / WAD`.
    ///
    /// `exchange_rate` is WAD-scaled (1.02 is `1020000000000000000`).
    pub fn to_underlying(&self, exchange_rate: impl Into<DecimalAmount>) -> Self {
        self.to_underlying_with(exchange_rate, &DecimalConfig::default())
    }

    /// [`to_underlying`](Self::to_underlying) with an explicit division config.
    pub fn to_underlying_with(
        &self,
        exchange_rate: impl Into<DecimalAmount>,
        config: &DecimalConfig,
    ) -> Self {
        exchange_rate
            .into()
            .multiply(self)
            .divide_with(&*WAD, config)
    }

    /// Token amount for this underlying amount: `underlying × WAD × WAD / rate / WAD`.
    ///
    /// The numerator is raised to WAD² before dividing by the rate so the
    /// first rounded division keeps 36 extra digits.
    pub fn to_tokens(&self, exchange_rate: impl Into<DecimalAmount>) -> Self {
        self.to_tokens_with(exchange_rate, &DecimalConfig::default())
    }

    /// [`to_tokens`](Self::to_tokens) with an explicit division config.
    pub fn to_tokens_with(
        &self,
        exchange_rate: impl Into<DecimalAmount>,
        config: &DecimalConfig,
    ) -> Self {
        self.multiply(&*WAD)
            .multiply(&*WAD)
            .divide_with(exchange_rate, config)
            .divide_with(&*WAD, config)
    }
}
