//! Earnings distribution engine.
//!
//! This module implements the one piece of real computed business logic in
//! the system: given a revenue period for a fractionally-owned property,
//! compute each investor's proportional share of net income exactly once.
//!
//! - Precondition checks and share computation (`engine`)
//! - Domain types and the payment status lifecycle (`types`)
//! - Error taxonomy for distribution operations (`error`)
//! - Pure aggregation for investor and operator summaries (`summary`)

pub mod engine;
pub mod error;
pub mod summary;
pub mod types;

#[cfg(test)]
mod engine_props;

pub use engine::DistributionEngine;
pub use error::DistributionError;
pub use summary::{earnings_totals, summarize_investor};
pub use types::{
    DistributionStatus, EarningsRecord, EarningsTotals, InvestorEarningsSummary, PlannedShare,
    RevenuePeriodSnapshot, StakeInput, StatusUpdate, resolve_paid_date,
};
