//! Distribution domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payment status of one earnings distribution.
///
/// Transitions are intentionally unrestricted: an operator may move any
/// status to any other (including PAID back to PENDING) to correct mistakes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DistributionStatus {
    /// Created by a distribution run, awaiting payout.
    Pending,
    /// Paid out to the investor.
    Paid,
    /// Cancelled by an operator.
    Cancelled,
}

/// The fields of a revenue period the engine needs for planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevenuePeriodSnapshot {
    /// Whether the period has already been distributed.
    pub distributed: bool,
    /// Gross revenue for the period.
    pub gross_revenue: Decimal,
    /// Expenses for the period.
    pub expenses: Decimal,
}

impl RevenuePeriodSnapshot {
    /// Net distributable income.
    #[must_use]
    pub fn net_income(&self) -> Decimal {
        self.gross_revenue - self.expenses
    }
}

/// One investment's stake as input to a distribution run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakeInput {
    /// The investment being credited.
    pub investment_id: Uuid,
    /// Fractions owned, or None for a flat (non-participating) stake.
    pub fractions_owned: Option<i32>,
}

/// One investor's computed share of a distribution run.
///
/// `fractions_owned` and `ownership_percentage` are snapshots: they freeze
/// the stake as it stood at distribution time and never track later changes
/// to the investment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedShare {
    /// The investment being credited.
    pub investment_id: Uuid,
    /// Snapshot of fractions owned at distribution time.
    pub fractions_owned: i32,
    /// Snapshot of ownership percentage at distribution time.
    pub ownership_percentage: Decimal,
    /// The investor's share of net income.
    pub earnings_amount: Decimal,
}

/// Operator input for a payment status update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    /// The new status.
    pub status: DistributionStatus,
    /// Payment reference, kept unchanged when None.
    pub payment_reference: Option<String>,
    /// Operator notes, kept unchanged when None.
    pub notes: Option<String>,
}

/// Resolves the paid date for a status update.
///
/// Moving to PAID stamps the commit time unless a paid date already exists;
/// other transitions keep whatever is recorded.
#[must_use]
pub fn resolve_paid_date(
    new_status: DistributionStatus,
    existing: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    match new_status {
        DistributionStatus::Paid => existing.or(Some(now)),
        _ => existing,
    }
}

/// A distribution row reduced to the fields summaries need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EarningsRecord {
    /// The property the credited investment belongs to.
    pub property_id: Uuid,
    /// The investor's share of that run.
    pub earnings_amount: Decimal,
    /// Current payment status.
    pub status: DistributionStatus,
}

/// Earnings totals bucketed by payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EarningsTotals {
    /// Sum of all earnings amounts.
    pub total_earnings: Decimal,
    /// Sum of PAID earnings amounts.
    pub total_paid: Decimal,
    /// Sum of PENDING earnings amounts.
    pub total_pending: Decimal,
}

/// Aggregate earnings summary for one investor.
///
/// Empty aggregates default to zero; an investor with no distributions gets
/// a zero summary, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InvestorEarningsSummary {
    /// Sum of all earnings amounts.
    pub total_earnings: Decimal,
    /// Sum of PAID earnings amounts.
    pub total_paid: Decimal,
    /// Sum of PENDING earnings amounts.
    pub total_pending: Decimal,
    /// Number of distribution rows.
    pub distributions_count: u64,
    /// Number of distinct properties the rows span.
    pub properties_count: u64,
}
