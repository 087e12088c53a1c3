// ============================================================================
// Numeric Errors
// Error types for decimal construction and conversion
// ============================================================================

use thiserror::Error;

/// Errors that can occur while constructing or converting decimal amounts.
///
/// Arithmetic never produces these: division by zero and out-of-domain
/// powers surface as `NaN`/`Infinity` values instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum DecimalError {
    /// Input string could not be parsed
    #[error("invalid input: could not parse {0:?} as a decimal")]
    InvalidInput(String),
    /// Radix outside 2..=36
    #[error("invalid radix {0}: expected a base between 2 and 36")]
    InvalidRadix(u32),
    /// Extremum requested over no values
    #[error("empty input: at least one value is required")]
    EmptyInput,
    /// NaN or infinity where a finite value is required
    #[error("value is not finite")]
    NotFinite,
    /// Value does not fit the target type
    #[error("arithmetic overflow: value exceeds the target type's range")]
    Overflow,
    /// Configuration failed validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for decimal operations
pub type DecimalResult<T> = Result<T, DecimalError>;
