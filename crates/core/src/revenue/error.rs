//! Error types for revenue and occupancy recording.

use propshare_shared::AppError;
use thiserror::Error;

/// Errors raised by revenue/occupancy validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RevenueError {
    /// Month must be between 1 and 12.
    #[error("Month must be between 1 and 12, got {0}")]
    InvalidMonth(i32),

    /// Gross revenue must not be negative.
    #[error("Gross revenue must not be negative")]
    NegativeGrossRevenue,

    /// Expenses must not be negative.
    #[error("Expenses must not be negative")]
    NegativeExpenses,

    /// Night counts must not be negative.
    #[error("Night counts must not be negative")]
    NegativeNights,

    /// More nights booked than available.
    #[error("Nights booked ({booked}) cannot exceed nights available ({available})")]
    OverbookedNights {
        /// Nights booked.
        booked: i32,
        /// Nights available.
        available: i32,
    },

    /// Financial fields are frozen once the period has been distributed.
    #[error("Cannot update revenue that has already been distributed")]
    PeriodLocked,
}

impl From<RevenueError> for AppError {
    fn from(err: RevenueError) -> Self {
        match err {
            RevenueError::PeriodLocked => Self::BusinessRule(err.to_string()),
            _ => Self::Validation(err.to_string()),
        }
    }
}
