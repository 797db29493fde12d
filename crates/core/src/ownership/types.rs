//! Ownership domain types.
//!
//! Derived values (`ownership_percentage`, growth figures, available
//! fractions) are computed on read from the stored fields, never stored.
//! The only exception in the whole system is the distribution snapshot,
//! which intentionally freezes them at distribution time.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A property's fractional-ownership configuration.
///
/// A property is fractional iff `total_fractions` is present and positive.
/// Non-fractional properties carry flat stakes only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FractionalConfig {
    /// Total issued supply of fractions, or None for non-fractional properties.
    pub total_fractions: Option<i32>,
    /// Fractions already assigned to investments.
    pub fractions_sold: i32,
}

impl FractionalConfig {
    /// Returns true if the property uses fractional ownership.
    #[must_use]
    pub fn is_fractional(&self) -> bool {
        self.total_fractions.is_some_and(|t| t > 0)
    }

    /// Returns the number of fractions still available for assignment.
    ///
    /// Zero for non-fractional properties.
    #[must_use]
    pub fn fractions_available(&self) -> i32 {
        match self.total_fractions {
            Some(total) if total > 0 => total - self.fractions_sold,
            _ => 0,
        }
    }
}

/// An investment's valuation pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Valuation {
    /// Value at assignment time.
    pub initial_value: Decimal,
    /// Operator-maintained current value.
    pub current_value: Decimal,
}

impl Valuation {
    /// Absolute growth since assignment.
    #[must_use]
    pub fn growth_amount(&self) -> Decimal {
        self.current_value - self.initial_value
    }

    /// Growth as a percentage of the initial value.
    ///
    /// Zero when the initial value is zero.
    #[must_use]
    pub fn growth_percentage(&self) -> Decimal {
        if self.initial_value.is_zero() {
            return Decimal::ZERO;
        }
        self.growth_amount() / self.initial_value * Decimal::ONE_HUNDRED
    }
}

/// A read-only view of one investment used for portfolio aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakeSnapshot {
    /// The property this stake belongs to.
    pub property_id: Uuid,
    /// Fractions owned, or None for a flat stake.
    pub fractions_owned: Option<i32>,
    /// Valuation pair.
    pub valuation: Valuation,
}

/// Aggregated portfolio figures for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PortfolioTotals {
    /// Sum of initial values across all stakes.
    pub total_initial_value: Decimal,
    /// Sum of current values across all stakes.
    pub total_current_value: Decimal,
    /// Overall growth percentage (zero when nothing invested).
    pub total_growth_percentage: Decimal,
    /// Sum of fractions owned (flat stakes count zero).
    pub total_fractions: i64,
    /// Number of distinct properties invested in.
    pub properties_count: u64,
    /// Number of stakes held.
    pub active_investments: u64,
}
