//! Error types for structured error handling.
//!
//! Both failure modes of the market data layer are local and synchronous:
//! - `InvalidArgument`: malformed generator parameters or snapshot fields
//! - `EmptyInput`: statistics requested over no snapshots

use thiserror::Error;

/// Categorised market data errors.
///
/// # Examples
/// ```
/// use market_core::MarketError;
///
/// let err = MarketError::invalid("seed price must be positive");
/// assert_eq!(format!("{}", err), "Invalid argument: seed price must be positive");
/// assert_eq!(MarketError::EmptyInput.to_string(), "Empty input: no snapshots supplied");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarketError {
    /// Malformed parameter or field value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Aggregation over an empty snapshot collection
    #[error("Empty input: no snapshots supplied")]
    EmptyInput,
}

impl MarketError {
    /// Create an invalid argument error
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Check whether this error is an invalid argument
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

/// Result alias used throughout the market crates.
pub type Result<T> = std::result::Result<T, MarketError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = MarketError::invalid("volatility is NaN");
        assert!(err.to_string().contains("volatility is NaN"));
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_empty_input_is_not_invalid_argument() {
        assert!(!MarketError::EmptyInput.is_invalid_argument());
    }

    #[test]
    fn test_error_is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}
        assert_error(&MarketError::EmptyInput);
    }
}
