//! Investment repository for stake database operations.
//!
//! Assignment runs inside a transaction with the property row locked, so
//! two concurrent assignments cannot both pass the supply check and
//! oversell the fraction pool.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use propshare_core::ownership::{
    FractionalConfig, OwnershipError, OwnershipService, PortfolioTotals, StakeSnapshot, Valuation,
};

use crate::entities::{investments, properties, sea_orm_active_enums::UserRole, users};

/// Error types for investment operations.
#[derive(Debug, thiserror::Error)]
pub enum InvestmentError {
    /// Investment not found.
    #[error("Investment not found: {0}")]
    NotFound(Uuid),

    /// User not found.
    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    /// Property not found.
    #[error("Property not found: {0}")]
    PropertyNotFound(Uuid),

    /// Only investors and admins can hold investments.
    #[error("User is not an investor: {0}")]
    NotInvestor(Uuid),

    /// Ownership rule violation.
    #[error(transparent)]
    Ownership(#[from] OwnershipError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for assigning an investment to a user.
#[derive(Debug, Clone)]
pub struct AssignInvestmentInput {
    /// The user receiving the stake.
    pub user_id: Uuid,
    /// The property being invested in.
    pub property_id: Uuid,
    /// Fractions to assign; None for a flat stake in a non-fractional property.
    pub fractions_owned: Option<i32>,
    /// Value of the stake at assignment time.
    pub initial_value: Decimal,
}

/// Investment repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct InvestmentRepository {
    db: DatabaseConnection,
}

impl InvestmentRepository {
    /// Creates a new investment repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Assigns an investment to a user.
    ///
    /// The stake is validated against the property's fraction supply and, on
    /// success, the property's sold count is advanced in the same
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the user or property does not exist, the user is
    /// not an investor or admin, or the stake violates an ownership rule.
    pub async fn assign(
        &self,
        input: AssignInvestmentInput,
    ) -> Result<investments::Model, InvestmentError> {
        let user = users::Entity::find_by_id(input.user_id)
            .one(&self.db)
            .await?
            .ok_or(InvestmentError::UserNotFound(input.user_id))?;
        if !matches!(user.role, UserRole::Investor | UserRole::Admin) {
            return Err(InvestmentError::NotInvestor(input.user_id));
        }

        let txn = self.db.begin().await?;

        // Lock the property row so concurrent assignments serialize on the
        // supply check.
        let property = properties::Entity::find_by_id(input.property_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(InvestmentError::PropertyNotFound(input.property_id))?;

        let config = FractionalConfig {
            total_fractions: property.total_fractions,
            fractions_sold: property.fractions_sold,
        };
        OwnershipService::validate_assignment(&config, input.fractions_owned)?;

        let now = Utc::now().into();
        let investment = investments::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(input.user_id),
            property_id: Set(input.property_id),
            fractions_owned: Set(input.fractions_owned),
            initial_value: Set(input.initial_value),
            current_value: Set(input.initial_value),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let investment = investment.insert(&txn).await?;

        if let Some(fractions) = input.fractions_owned {
            let sold = property.fractions_sold + fractions;
            let mut active = property.into_active_model();
            active.fractions_sold = Set(sold);
            active.update(&txn).await?;
        }

        txn.commit().await?;

        Ok(investment)
    }

    /// Finds an investment by ID.
    ///
    /// # Errors
    ///
    /// Returns `InvestmentError::NotFound` if the investment does not exist.
    pub async fn find_by_id(&self, id: Uuid) -> Result<investments::Model, InvestmentError> {
        investments::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(InvestmentError::NotFound(id))
    }

    /// Updates an investment's operator-maintained current value.
    ///
    /// # Errors
    ///
    /// Returns `InvestmentError::NotFound` if the investment does not exist.
    pub async fn update_valuation(
        &self,
        id: Uuid,
        current_value: Decimal,
    ) -> Result<investments::Model, InvestmentError> {
        let investment = self.find_by_id(id).await?;
        let mut active = investment.into_active_model();
        active.current_value = Set(current_value);
        Ok(active.update(&self.db).await?)
    }

    /// Lists a user's investments, newest first.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<investments::Model>, InvestmentError> {
        Ok(investments::Entity::find()
            .filter(investments::Column::UserId.eq(user_id))
            .order_by_desc(investments::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// Lists all investments in a property.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn list_for_property(
        &self,
        property_id: Uuid,
    ) -> Result<Vec<investments::Model>, InvestmentError> {
        Ok(investments::Entity::find()
            .filter(investments::Column::PropertyId.eq(property_id))
            .all(&self.db)
            .await?)
    }

    /// Aggregates a user's portfolio totals across all their stakes.
    ///
    /// A user with no investments gets an all-zero summary.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn portfolio_summary(
        &self,
        user_id: Uuid,
    ) -> Result<PortfolioTotals, InvestmentError> {
        let stakes: Vec<StakeSnapshot> = self
            .list_for_user(user_id)
            .await?
            .into_iter()
            .map(|inv| StakeSnapshot {
                property_id: inv.property_id,
                fractions_owned: inv.fractions_owned,
                valuation: Valuation {
                    initial_value: inv.initial_value,
                    current_value: inv.current_value,
                },
            })
            .collect();

        Ok(OwnershipService::portfolio_totals(&stakes))
    }
}
