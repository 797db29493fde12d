//! Distribution repository wrapping the earnings distribution engine.
//!
//! A distribution run locks the revenue period row, plans shares through
//! `propshare-core`, inserts all distribution rows, and flips the period's
//! `distributed` flag in one transaction. The unique constraint on
//! `(revenue_period_id, investment_id)` backs up the row lock: even if two
//! runs raced past the precondition check, the second insert would fail and
//! roll back.

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use propshare_core::distribution::{
    DistributionEngine, DistributionError as DomainError, EarningsRecord, EarningsTotals,
    InvestorEarningsSummary, RevenuePeriodSnapshot, StakeInput, StatusUpdate, earnings_totals,
    resolve_paid_date, summarize_investor,
};
use propshare_core::revenue::period_label;

use crate::entities::{
    earnings_distributions, investments, properties, revenue_periods,
    sea_orm_active_enums::DistributionStatus,
};

/// Error types for distribution operations.
#[derive(Debug, thiserror::Error)]
pub enum DistributionError {
    /// Distribution business rule violation.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Filter options for listing distributions.
#[derive(Debug, Clone, Default)]
pub struct DistributionFilter {
    /// Filter by the revenue period's property.
    pub property_id: Option<Uuid>,
    /// Filter by payment status.
    pub status: Option<DistributionStatus>,
}

/// The outcome of one distribution run.
#[derive(Debug, Clone)]
pub struct DistributionRunResult {
    /// The revenue period after the run, with `distributed` set.
    pub revenue_period: revenue_periods::Model,
    /// The distribution rows created by the run.
    pub distributions: Vec<earnings_distributions::Model>,
    /// Sum of earnings across the created rows.
    pub total_distributed: Decimal,
}

/// A page of distributions with status-bucketed totals.
#[derive(Debug, Clone)]
pub struct DistributionListing {
    /// Matching rows, newest first.
    pub distributions: Vec<earnings_distributions::Model>,
    /// Totals across the matching rows.
    pub totals: EarningsTotals,
}

/// One distribution row enriched for the investor's earnings view.
#[derive(Debug, Clone)]
pub struct InvestorDistribution {
    /// The distribution row.
    pub distribution: earnings_distributions::Model,
    /// The property the credited investment belongs to.
    pub property_id: Uuid,
    /// The property's listing title.
    pub property_title: String,
    /// Human-readable period label, e.g. "Mar 2026".
    pub period: String,
}

/// Distribution repository wrapping the distribution engine.
#[derive(Debug, Clone)]
pub struct DistributionRepository {
    db: DatabaseConnection,
}

impl DistributionRepository {
    /// Creates a new distribution repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Distributes a revenue period's net income to the property's investors.
    ///
    /// Each qualifying investment gets a PENDING distribution row carrying a
    /// snapshot of its stake. The period is marked distributed in the same
    /// transaction, so a period can never be distributed twice.
    ///
    /// # Errors
    ///
    /// Returns a domain error if the period or property does not exist, the
    /// period is already distributed, the property is not fractional, the
    /// property has no investments, or net income is not positive.
    pub async fn distribute(
        &self,
        revenue_period_id: Uuid,
    ) -> Result<DistributionRunResult, DistributionError> {
        let txn = self.db.begin().await?;

        // Lock the period row; a concurrent run blocks here and then fails
        // the distributed check.
        let revenue = revenue_periods::Entity::find_by_id(revenue_period_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(DomainError::RevenueNotFound(revenue_period_id))?;

        let property = properties::Entity::find_by_id(revenue.property_id)
            .one(&txn)
            .await?
            .ok_or(DomainError::PropertyNotFound(revenue.property_id))?;

        let stakes: Vec<StakeInput> = investments::Entity::find()
            .filter(investments::Column::PropertyId.eq(property.id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|inv| StakeInput {
                investment_id: inv.id,
                fractions_owned: inv.fractions_owned,
            })
            .collect();

        let snapshot = RevenuePeriodSnapshot {
            distributed: revenue.distributed,
            gross_revenue: revenue.gross_revenue,
            expenses: revenue.expenses,
        };
        let shares = DistributionEngine::plan(&snapshot, property.total_fractions, &stakes)?;

        let now = Utc::now();
        let mut distributions = Vec::with_capacity(shares.len());
        let mut total_distributed = Decimal::ZERO;
        for share in shares {
            let row = earnings_distributions::ActiveModel {
                id: Set(Uuid::new_v4()),
                revenue_period_id: Set(revenue.id),
                investment_id: Set(share.investment_id),
                fractions_owned: Set(share.fractions_owned),
                ownership_percentage: Set(share.ownership_percentage),
                earnings_amount: Set(share.earnings_amount),
                status: Set(DistributionStatus::Pending),
                paid_date: Set(None),
                payment_reference: Set(None),
                notes: Set(None),
                created_at: Set(now.into()),
                updated_at: Set(now.into()),
            };
            total_distributed += share.earnings_amount;
            distributions.push(row.insert(&txn).await?);
        }

        let mut active = revenue.into_active_model();
        active.distributed = Set(true);
        active.distribution_date = Set(Some(now.into()));
        let revenue_period = active.update(&txn).await?;

        txn.commit().await?;

        tracing::info!(
            revenue_period_id = %revenue_period.id,
            rows = distributions.len(),
            %total_distributed,
            "revenue period distributed"
        );

        Ok(DistributionRunResult {
            revenue_period,
            distributions,
            total_distributed,
        })
    }

    /// Finds a distribution by ID.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DistributionNotFound` if the row does not exist.
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<earnings_distributions::Model, DistributionError> {
        Ok(earnings_distributions::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::DistributionNotFound(id))?)
    }

    /// Updates a distribution's payment status.
    ///
    /// Transitions are unrestricted. Moving to PAID stamps the paid date
    /// unless one is already recorded; reference and notes are only
    /// overwritten when provided.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DistributionNotFound` if the row does not exist.
    pub async fn update_status(
        &self,
        id: Uuid,
        update: StatusUpdate,
    ) -> Result<earnings_distributions::Model, DistributionError> {
        let distribution = self.find_by_id(id).await?;

        let paid_date = resolve_paid_date(
            update.status,
            distribution.paid_date.map(|d| d.with_timezone(&Utc)),
            Utc::now(),
        );

        let mut active = distribution.into_active_model();
        active.status = Set(update.status.into());
        active.paid_date = Set(paid_date.map(Into::into));
        if let Some(reference) = update.payment_reference {
            active.payment_reference = Set(Some(reference));
        }
        if let Some(notes) = update.notes {
            active.notes = Set(Some(notes));
        }

        Ok(active.update(&self.db).await?)
    }

    /// Lists distributions with status-bucketed totals, newest first.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn list(
        &self,
        filter: DistributionFilter,
    ) -> Result<DistributionListing, DistributionError> {
        let mut query = earnings_distributions::Entity::find();
        if let Some(property_id) = filter.property_id {
            query = query
                .inner_join(revenue_periods::Entity)
                .filter(revenue_periods::Column::PropertyId.eq(property_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(earnings_distributions::Column::Status.eq(status));
        }
        let distributions = query
            .order_by_desc(earnings_distributions::Column::CreatedAt)
            .all(&self.db)
            .await?;

        let records = self.earnings_records(&distributions).await?;
        let totals = earnings_totals(&records);

        Ok(DistributionListing {
            distributions,
            totals,
        })
    }

    /// Lists an investor's distributions enriched with property and period
    /// labels, newest first.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn list_for_investor(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<InvestorDistribution>, DistributionError> {
        let investment_map = self.investments_for_user(user_id).await?;
        if investment_map.is_empty() {
            return Ok(Vec::new());
        }
        let investment_ids: Vec<Uuid> = investment_map.keys().copied().collect();

        let distributions = earnings_distributions::Entity::find()
            .filter(earnings_distributions::Column::InvestmentId.is_in(investment_ids))
            .order_by_desc(earnings_distributions::Column::CreatedAt)
            .all(&self.db)
            .await?;

        let period_ids: Vec<Uuid> = distributions.iter().map(|d| d.revenue_period_id).collect();
        let periods: HashMap<Uuid, revenue_periods::Model> = revenue_periods::Entity::find()
            .filter(revenue_periods::Column::Id.is_in(period_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let property_ids: Vec<Uuid> = periods.values().map(|p| p.property_id).collect();
        let titles: HashMap<Uuid, String> = properties::Entity::find()
            .filter(properties::Column::Id.is_in(property_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|p| (p.id, p.title))
            .collect();

        let mut enriched = Vec::with_capacity(distributions.len());
        for distribution in distributions {
            let Some(period) = periods.get(&distribution.revenue_period_id) else {
                continue;
            };
            let property_title = titles.get(&period.property_id).cloned().unwrap_or_default();
            enriched.push(InvestorDistribution {
                period: period_label(period.month, period.year),
                property_id: period.property_id,
                property_title,
                distribution,
            });
        }

        Ok(enriched)
    }

    /// Aggregates an investor's earnings across all their distributions.
    ///
    /// An investor with no distributions gets an all-zero summary.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn investor_summary(
        &self,
        user_id: Uuid,
    ) -> Result<InvestorEarningsSummary, DistributionError> {
        let investment_map = self.investments_for_user(user_id).await?;
        if investment_map.is_empty() {
            return Ok(InvestorEarningsSummary::default());
        }
        let investment_ids: Vec<Uuid> = investment_map.keys().copied().collect();

        let distributions = earnings_distributions::Entity::find()
            .filter(earnings_distributions::Column::InvestmentId.is_in(investment_ids))
            .all(&self.db)
            .await?;

        let records: Vec<EarningsRecord> = distributions
            .iter()
            .filter_map(|d| {
                investment_map
                    .get(&d.investment_id)
                    .map(|property_id| EarningsRecord {
                        property_id: *property_id,
                        earnings_amount: d.earnings_amount,
                        status: d.status.clone().into(),
                    })
            })
            .collect();

        Ok(summarize_investor(&records))
    }

    /// Maps a user's investment IDs to their property IDs.
    async fn investments_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<HashMap<Uuid, Uuid>, DistributionError> {
        Ok(investments::Entity::find()
            .filter(investments::Column::UserId.eq(user_id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|inv| (inv.id, inv.property_id))
            .collect())
    }

    /// Maps distribution rows to summary records by resolving each row's
    /// property through its revenue period.
    async fn earnings_records(
        &self,
        distributions: &[earnings_distributions::Model],
    ) -> Result<Vec<EarningsRecord>, DistributionError> {
        let period_ids: Vec<Uuid> = distributions.iter().map(|d| d.revenue_period_id).collect();
        let period_properties: HashMap<Uuid, Uuid> = revenue_periods::Entity::find()
            .filter(revenue_periods::Column::Id.is_in(period_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|p| (p.id, p.property_id))
            .collect();

        Ok(distributions
            .iter()
            .filter_map(|d| {
                period_properties
                    .get(&d.revenue_period_id)
                    .map(|property_id| EarningsRecord {
                        property_id: *property_id,
                        earnings_amount: d.earnings_amount,
                        status: d.status.clone().into(),
                    })
            })
            .collect())
    }
}
