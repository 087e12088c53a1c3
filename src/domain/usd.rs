// ============================================================================
// USD Conversions
// ============================================================================

use crate::numeric::{DecimalAmount, DecimalConfig};

impl DecimalAmount {
    /// USD value of this amount: `value × price_usd`.
    pub fn to_usd(&self, price_usd: impl Into<DecimalAmount>) -> Self {
        self.multiply(price_usd)
    }

    /// Amount worth this many USD: `value_usd / price_usd`.
    #[allow(clippy::wrong_self_convention)]
    pub fn from_usd(&self, price_usd: impl Into<DecimalAmount>) -> Self {
        self.from_usd_with(price_usd, &DecimalConfig::default())
    }

    /// [`from_usd`](Self::from_usd) with an explicit division config.
    #[allow(clippy::wrong_self_convention)]
    pub fn from_usd_with(&self, price_usd: impl Into<DecimalAmount>, config: &DecimalConfig) -> Self {
        self.divide_with(price_usd, config)
    }
}
