//! Pure aggregation over distribution rows.

use std::collections::HashSet;

use rust_decimal::Decimal;

use super::types::{DistributionStatus, EarningsRecord, EarningsTotals, InvestorEarningsSummary};

/// Buckets earnings totals by payment status.
#[must_use]
pub fn earnings_totals(records: &[EarningsRecord]) -> EarningsTotals {
    let mut totals = EarningsTotals::default();
    for record in records {
        totals.total_earnings += record.earnings_amount;
        match record.status {
            DistributionStatus::Paid => totals.total_paid += record.earnings_amount,
            DistributionStatus::Pending => totals.total_pending += record.earnings_amount,
            DistributionStatus::Cancelled => {}
        }
    }
    totals
}

/// Aggregates one investor's distribution rows into a summary.
///
/// An empty slice yields an all-zero summary.
#[must_use]
pub fn summarize_investor(records: &[EarningsRecord]) -> InvestorEarningsSummary {
    let totals = earnings_totals(records);
    let properties: HashSet<_> = records.iter().map(|r| r.property_id).collect();

    InvestorEarningsSummary {
        total_earnings: totals.total_earnings,
        total_paid: totals.total_paid,
        total_pending: totals.total_pending,
        distributions_count: records.len() as u64,
        properties_count: properties.len() as u64,
    }
}
