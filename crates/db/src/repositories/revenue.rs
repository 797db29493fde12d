//! Revenue repository for monthly revenue record operations.
//!
//! Financial fields are frozen once a period has been distributed; edits
//! after that point are rejected here before any write.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use propshare_core::revenue::{
    RevenueError as ValidationError, RevenueFigures, validate_can_edit, validate_period_amounts,
    validate_period_month,
};

use crate::entities::{properties, revenue_periods};

/// Error types for revenue record operations.
#[derive(Debug, thiserror::Error)]
pub enum RevenueRecordError {
    /// Revenue record not found.
    #[error("Revenue record not found: {0}")]
    NotFound(Uuid),

    /// Property not found.
    #[error("Property not found: {0}")]
    PropertyNotFound(Uuid),

    /// A record already exists for this property-month.
    #[error("Revenue record already exists for {month}/{year}")]
    DuplicatePeriod {
        /// Period month.
        month: i32,
        /// Period year.
        year: i32,
    },

    /// Validation rule violation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a revenue record.
#[derive(Debug, Clone)]
pub struct CreateRevenueInput {
    /// The property the record belongs to.
    pub property_id: Uuid,
    /// Period month, 1-12.
    pub month: i32,
    /// Period year.
    pub year: i32,
    /// Gross revenue for the period.
    pub gross_revenue: Decimal,
    /// Expenses for the period.
    pub expenses: Decimal,
    /// Admin who recorded the period.
    pub created_by: Uuid,
    /// Optional notes.
    pub notes: Option<String>,
}

/// Input for updating a revenue record. None leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateRevenueInput {
    /// New gross revenue.
    pub gross_revenue: Option<Decimal>,
    /// New expenses.
    pub expenses: Option<Decimal>,
    /// New notes.
    pub notes: Option<String>,
}

/// A property's revenue history with running totals.
#[derive(Debug, Clone)]
pub struct RevenueLedger {
    /// Periods, newest first.
    pub periods: Vec<revenue_periods::Model>,
    /// Sum of gross revenue across all periods.
    pub total_gross_revenue: Decimal,
    /// Sum of expenses across all periods.
    pub total_expenses: Decimal,
    /// Sum of net income across all periods.
    pub total_net_income: Decimal,
}

/// Revenue repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct RevenueRepository {
    db: DatabaseConnection,
}

impl RevenueRepository {
    /// Creates a new revenue repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a revenue record for a property-month.
    ///
    /// # Errors
    ///
    /// Returns an error if the property does not exist, the month or
    /// amounts are invalid, or a record already exists for the period.
    pub async fn create(
        &self,
        input: CreateRevenueInput,
    ) -> Result<revenue_periods::Model, RevenueRecordError> {
        validate_period_month(input.month)?;
        validate_period_amounts(input.gross_revenue, input.expenses)?;

        properties::Entity::find_by_id(input.property_id)
            .one(&self.db)
            .await?
            .ok_or(RevenueRecordError::PropertyNotFound(input.property_id))?;

        let existing = revenue_periods::Entity::find()
            .filter(revenue_periods::Column::PropertyId.eq(input.property_id))
            .filter(revenue_periods::Column::Month.eq(input.month))
            .filter(revenue_periods::Column::Year.eq(input.year))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(RevenueRecordError::DuplicatePeriod {
                month: input.month,
                year: input.year,
            });
        }

        let now = Utc::now().into();
        let period = revenue_periods::ActiveModel {
            id: Set(Uuid::new_v4()),
            property_id: Set(input.property_id),
            month: Set(input.month),
            year: Set(input.year),
            gross_revenue: Set(input.gross_revenue),
            expenses: Set(input.expenses),
            distributed: Set(false),
            distribution_date: Set(None),
            created_by: Set(input.created_by),
            notes: Set(input.notes),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(period.insert(&self.db).await?)
    }

    /// Finds a revenue record by ID.
    ///
    /// # Errors
    ///
    /// Returns `RevenueRecordError::NotFound` if the record does not exist.
    pub async fn find_by_id(&self, id: Uuid) -> Result<revenue_periods::Model, RevenueRecordError> {
        revenue_periods::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RevenueRecordError::NotFound(id))
    }

    /// Updates a revenue record.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::PeriodLocked` if the period has already
    /// been distributed, or a validation error for negative amounts.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateRevenueInput,
    ) -> Result<revenue_periods::Model, RevenueRecordError> {
        let period = self.find_by_id(id).await?;
        validate_can_edit(period.distributed)?;

        let gross_revenue = input.gross_revenue.unwrap_or(period.gross_revenue);
        let expenses = input.expenses.unwrap_or(period.expenses);
        validate_period_amounts(gross_revenue, expenses)?;

        let mut active = period.into_active_model();
        active.gross_revenue = Set(gross_revenue);
        active.expenses = Set(expenses);
        if let Some(notes) = input.notes {
            active.notes = Set(Some(notes));
        }

        Ok(active.update(&self.db).await?)
    }

    /// Lists a property's revenue history with running totals, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RevenueRecordError::PropertyNotFound` if the property does
    /// not exist.
    pub async fn list_for_property(
        &self,
        property_id: Uuid,
    ) -> Result<RevenueLedger, RevenueRecordError> {
        properties::Entity::find_by_id(property_id)
            .one(&self.db)
            .await?
            .ok_or(RevenueRecordError::PropertyNotFound(property_id))?;

        let periods = revenue_periods::Entity::find()
            .filter(revenue_periods::Column::PropertyId.eq(property_id))
            .order_by_desc(revenue_periods::Column::Year)
            .order_by_desc(revenue_periods::Column::Month)
            .all(&self.db)
            .await?;

        let mut total_gross_revenue = Decimal::ZERO;
        let mut total_expenses = Decimal::ZERO;
        let mut total_net_income = Decimal::ZERO;
        for period in &periods {
            let figures = RevenueFigures {
                gross_revenue: period.gross_revenue,
                expenses: period.expenses,
            };
            total_gross_revenue += figures.gross_revenue;
            total_expenses += figures.expenses;
            total_net_income += figures.net_income();
        }

        Ok(RevenueLedger {
            periods,
            total_gross_revenue,
            total_expenses,
            total_net_income,
        })
    }
}
