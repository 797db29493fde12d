//! Error taxonomy for distribution operations.
//!
//! All variants are caller errors: they describe a business-state problem
//! detected before any write, never a transient fault, and must not be
//! retried automatically.

use propshare_shared::AppError;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised by the distribution engine and its persistence wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistributionError {
    /// The revenue period does not exist.
    #[error("Revenue record not found: {0}")]
    RevenueNotFound(Uuid),

    /// The revenue period's property does not exist.
    #[error("Property not found: {0}")]
    PropertyNotFound(Uuid),

    /// The distribution record does not exist.
    #[error("Distribution not found: {0}")]
    DistributionNotFound(Uuid),

    /// Idempotency guard: a period can never be distributed twice.
    #[error("Revenue already distributed")]
    AlreadyDistributed,

    /// Only fractional properties can be distributed against.
    #[error("Property does not use fractional ownership")]
    NotFractional,

    /// No investments exist for the property.
    #[error("No investments found for this property")]
    NoRecipients,

    /// Net income must be strictly positive to distribute.
    #[error("Net income must be positive to distribute")]
    NonPositiveIncome,
}

impl From<DistributionError> for AppError {
    fn from(err: DistributionError) -> Self {
        match err {
            DistributionError::RevenueNotFound(_)
            | DistributionError::PropertyNotFound(_)
            | DistributionError::DistributionNotFound(_) => Self::NotFound(err.to_string()),
            DistributionError::AlreadyDistributed => Self::Conflict(err.to_string()),
            DistributionError::NotFractional
            | DistributionError::NoRecipients
            | DistributionError::NonPositiveIncome => Self::BusinessRule(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_classification() {
        let id = Uuid::new_v4();
        assert_eq!(
            AppError::from(DistributionError::RevenueNotFound(id)).error_code(),
            "NOT_FOUND"
        );
        assert_eq!(
            AppError::from(DistributionError::AlreadyDistributed).error_code(),
            "CONFLICT"
        );
        assert_eq!(
            AppError::from(DistributionError::NotFractional).error_code(),
            "BUSINESS_RULE_VIOLATION"
        );
        assert_eq!(
            AppError::from(DistributionError::NonPositiveIncome).error_code(),
            "BUSINESS_RULE_VIOLATION"
        );
    }

    #[test]
    fn test_reason_strings() {
        assert_eq!(
            DistributionError::AlreadyDistributed.to_string(),
            "Revenue already distributed"
        );
        assert_eq!(
            DistributionError::NotFractional.to_string(),
            "Property does not use fractional ownership"
        );
        assert_eq!(
            DistributionError::NoRecipients.to_string(),
            "No investments found for this property"
        );
        assert_eq!(
            DistributionError::NonPositiveIncome.to_string(),
            "Net income must be positive to distribute"
        );
    }
}
