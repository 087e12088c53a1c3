// ============================================================================
// DeFi Decimal Library
// Arbitrary-precision decimal amounts with DeFi unit, rate and USD conversions
// ============================================================================

//! # DeFi Decimal
//!
//! An exact decimal amount type for on-chain financial computations.
//!
//! ## Features
//!
//! - **Exact arithmetic** on arbitrary-precision decimals (no binary floats)
//! - **Unit scaling** between basic units and full decimals
//! - **Exchange rates** in WAD (10^18) fixed point for token ↔ underlying
//! - **USD conversion** and **APR ↔ APY** with daily compounding
//! - **Safe output** that never leaks exponents, NaN or infinity
//!
//! ## Example
//!
//! ```rust
//! use defi_decimal::prelude::*;
//!
//! // 1.5 tokens with 18 decimals
//! let raw = DecimalAmount::from("1.5").to_basic_units(18);
//! assert_eq!(raw.to_string(), "1500000000000000000");
//!
//! // 100 cTokens at an exchange rate of 1.02
//! let underlying = DecimalAmount::from(100).to_underlying("1020000000000000000");
//! assert_eq!(underlying, DecimalAmount::from(102));
//!
//! // Display-safe output
//! let ratio = DecimalAmount::from(1).divide(0);
//! assert_eq!(ratio.to_safe_string(), "0");
//! assert_eq!(
//!     DecimalAmount::from("1.23456").to_safe_fixed(2, RoundingMode::Down),
//!     "1.23"
//! );
//! ```

pub mod domain;
pub mod numeric;

pub use numeric::DecimalAmount;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        COMPOUNDING_PERIODS_PER_YEAR, SECONDS_PER_DAY, WAD, WAD_DECIMALS, WAD_WAD,
    };
    pub use crate::numeric::{
        DecimalAmount, DecimalConfig, DecimalError, DecimalResult, RoundingMode,
    };
}
