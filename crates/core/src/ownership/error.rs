//! Error types for ownership operations.

use propshare_shared::AppError;
use thiserror::Error;

/// Errors raised by ownership validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OwnershipError {
    /// A fraction supply must be positive when present.
    #[error("Total fractions must be positive, got {0}")]
    InvalidFractionSupply(i32),

    /// Fractional properties require a fraction count on each stake.
    #[error("A stake in a fractional property must specify fractions owned")]
    FractionsRequired,

    /// A fraction count must be positive when present.
    #[error("Fractions owned must be positive, got {0}")]
    InvalidFractionCount(i32),

    /// Flat stakes cannot carry fractions.
    #[error("Property does not use fractional ownership, fractions cannot be assigned")]
    NotFractional,

    /// Not enough unsold fractions to cover the assignment.
    #[error("Not enough fractions available: requested {requested}, available {available}")]
    NotEnoughFractions {
        /// Fractions requested by the assignment.
        requested: i32,
        /// Fractions still unassigned.
        available: i32,
    },
}

impl From<OwnershipError> for AppError {
    fn from(err: OwnershipError) -> Self {
        match err {
            OwnershipError::InvalidFractionSupply(_) | OwnershipError::InvalidFractionCount(_) => {
                Self::Validation(err.to_string())
            }
            OwnershipError::FractionsRequired
            | OwnershipError::NotFractional
            | OwnershipError::NotEnoughFractions { .. } => Self::BusinessRule(err.to_string()),
        }
    }
}
