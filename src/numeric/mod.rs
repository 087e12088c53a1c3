// ============================================================================
// Numeric Module
// Arbitrary-precision decimal arithmetic for financial calculations
// ============================================================================
//
// This module provides:
// - DecimalAmount: immutable exact decimal with NaN/Infinity states
// - DecimalConfig: division and power precision settings
// - RoundingMode: the nine supported rounding modes
// - DecimalError: Error types for parsing and conversion
//
// Design principles:
// - No floating-point operations except the documented f64 power fallback
// - Arithmetic never panics; undefined results are NaN or Infinity
// - Every operation returns a new value
// - No global mutable state; precision is passed per call

mod amount;
mod config;
mod errors;
mod format;
mod rounding;

pub use amount::DecimalAmount;
pub use config::{DecimalConfig, MAX_DECIMAL_PLACES};
pub use errors::{DecimalError, DecimalResult};
pub use rounding::RoundingMode;
