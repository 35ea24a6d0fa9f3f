//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use rust_decimal::Decimal;
use thiserror::Error;

/// Domain-specific errors
///
/// These errors represent rejected values at the edges of the domain
/// (identifiers, money, payout policy). The aggregation itself never
/// produces them: malformed records are skipped, not reported.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid amount (negative or unparseable)
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Payout ratio outside [0, 1]
    #[error("Invalid payout ratio {ratio}: must be between 0 and 1")]
    InvalidRatio { ratio: Decimal },

    /// Identifier that is neither a non-empty string nor a number
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),
}

impl DomainError {
    /// Create an invalid ratio error
    pub fn invalid_ratio(ratio: Decimal) -> Self {
        Self::InvalidRatio { ratio }
    }

    /// Check if this is a client error (caller supplied a bad value)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount(_) | Self::InvalidIdentifier(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_ratio_error() {
        let err = DomainError::invalid_ratio(Decimal::new(15, 1));

        assert!(!err.is_client_error());
        assert!(err.to_string().contains("1.5"));
    }

    #[test]
    fn test_invalid_amount_error() {
        let err = DomainError::InvalidAmount("-3".to_string());

        assert!(err.is_client_error());
        assert!(err.to_string().contains("-3"));
    }
}
