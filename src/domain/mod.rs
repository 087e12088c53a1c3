// ============================================================================
// Domain Conversions Module
// DeFi conversions layered on DecimalAmount as inherent methods
// ============================================================================
//
// - units: basic units <-> full decimals
// - exchange: token <-> underlying through a WAD-scaled exchange rate
// - usd: value <-> USD
// - rates: APR <-> APY (daily compounding)

pub mod constants;
mod exchange;
mod rates;
mod units;
mod usd;

pub use constants::{
    COMPOUNDING_PERIODS_PER_YEAR, SECONDS_PER_DAY, WAD, WAD_DECIMALS, WAD_WAD,
};
