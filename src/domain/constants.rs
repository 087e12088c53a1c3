// ============================================================================
// Domain Constants
// Fixed-point scales and time constants shared by the conversions
// ============================================================================

use crate::numeric::DecimalAmount;
use std::sync::LazyLock;

/// Decimal places of an 18-decimal token (the WAD scale)
pub const WAD_DECIMALS: u32 = 18;

/// 10^18, the basic-unit scale of 18-decimal tokens
pub static WAD: LazyLock<DecimalAmount> =
    LazyLock::new(|| DecimalAmount::from(1_000_000_000_000_000_000u64));

/// 10^36 (WAD²), the intermediate scale of token conversions
pub static WAD_WAD: LazyLock<DecimalAmount> = LazyLock::new(|| WAD.multiply(&*WAD));

/// Seconds in a day, for callers annualizing per-second or per-day rates
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Daily compounding periods used by the APR/APY conversions
pub const COMPOUNDING_PERIODS_PER_YEAR: u32 = 365;
