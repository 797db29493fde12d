//! Validation rules for revenue and occupancy records.

use rust_decimal::Decimal;

use super::error::RevenueError;

/// Validates that a period month is within 1-12.
///
/// # Errors
///
/// Returns `RevenueError::InvalidMonth` otherwise.
pub fn validate_period_month(month: i32) -> Result<(), RevenueError> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(RevenueError::InvalidMonth(month))
    }
}

/// Validates that revenue figures are non-negative.
///
/// # Errors
///
/// Returns a `RevenueError` naming the negative figure.
pub fn validate_period_amounts(
    gross_revenue: Decimal,
    expenses: Decimal,
) -> Result<(), RevenueError> {
    if gross_revenue < Decimal::ZERO {
        return Err(RevenueError::NegativeGrossRevenue);
    }
    if expenses < Decimal::ZERO {
        return Err(RevenueError::NegativeExpenses);
    }
    Ok(())
}

/// Validates occupancy night counts.
///
/// # Errors
///
/// Returns a `RevenueError` for negative counts or a booked count above the
/// available count.
pub fn validate_nights(nights_booked: i32, nights_available: i32) -> Result<(), RevenueError> {
    if nights_booked < 0 || nights_available < 0 {
        return Err(RevenueError::NegativeNights);
    }
    if nights_booked > nights_available {
        return Err(RevenueError::OverbookedNights {
            booked: nights_booked,
            available: nights_available,
        });
    }
    Ok(())
}

/// Validates that a revenue record may still be edited.
///
/// Financial fields are immutable once the period has been distributed.
///
/// # Errors
///
/// Returns `RevenueError::PeriodLocked` for a distributed period.
pub fn validate_can_edit(distributed: bool) -> Result<(), RevenueError> {
    if distributed {
        Err(RevenueError::PeriodLocked)
    } else {
        Ok(())
    }
}
