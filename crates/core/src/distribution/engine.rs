//! Distribution engine for computing per-investor earnings shares.
//!
//! This service contains pure business logic with no database dependencies.
//! The repository layer fetches the revenue period, property configuration,
//! and investment stakes inside one transaction, calls [`DistributionEngine::plan`],
//! and persists the returned shares atomically with the distributed flag.

use rust_decimal::Decimal;

use super::error::DistributionError;
use super::types::{PlannedShare, RevenuePeriodSnapshot, StakeInput};

/// Distribution engine for share computation.
pub struct DistributionEngine;

impl DistributionEngine {
    /// Plans a distribution run for one revenue period.
    ///
    /// Precondition checks, in order, all before any share is computed:
    /// 1. The period must not already be distributed
    /// 2. The property must be fractional (positive total supply)
    /// 3. At least one investment must exist for the property
    /// 4. Net income must be strictly positive
    ///
    /// Stakes with absent or zero fractions do not participate; their slice
    /// of net income, like any unsold fractions, stays undistributed.
    ///
    /// # Errors
    ///
    /// Returns a `DistributionError` naming the violated precondition.
    pub fn plan(
        revenue: &RevenuePeriodSnapshot,
        total_fractions: Option<i32>,
        stakes: &[StakeInput],
    ) -> Result<Vec<PlannedShare>, DistributionError> {
        if revenue.distributed {
            return Err(DistributionError::AlreadyDistributed);
        }

        let Some(total) = total_fractions.filter(|t| *t > 0) else {
            return Err(DistributionError::NotFractional);
        };

        if stakes.is_empty() {
            return Err(DistributionError::NoRecipients);
        }

        let net_income = revenue.net_income();
        if net_income <= Decimal::ZERO {
            return Err(DistributionError::NonPositiveIncome);
        }

        let total = Decimal::from(total);
        let shares = stakes
            .iter()
            .filter_map(|stake| {
                let fractions = stake.fractions_owned.filter(|f| *f > 0)?;
                let ratio = Decimal::from(fractions) / total;
                Some(PlannedShare {
                    investment_id: stake.investment_id,
                    fractions_owned: fractions,
                    ownership_percentage: ratio * Decimal::ONE_HUNDRED,
                    earnings_amount: ratio * net_income,
                })
            })
            .collect();

        Ok(shares)
    }
}
