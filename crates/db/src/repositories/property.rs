//! Property repository for listing database operations.
//!
//! Fraction supply validation is delegated to `propshare-core`; this layer
//! adds the one rule that needs stored state, namely that the supply can
//! never shrink below what has already been sold.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use propshare_core::ownership::{OwnershipError, OwnershipService};

use crate::entities::{properties, sea_orm_active_enums::PropertyStatus};

/// Error types for property operations.
#[derive(Debug, thiserror::Error)]
pub enum PropertyError {
    /// Property not found.
    #[error("Property not found: {0}")]
    NotFound(Uuid),

    /// Supply cannot shrink below the fractions already sold.
    #[error("Fraction supply {total} is below fractions already sold {sold}")]
    SupplyBelowSold {
        /// Requested total supply.
        total: i32,
        /// Fractions already sold.
        sold: i32,
    },

    /// Ownership rule violation.
    #[error(transparent)]
    Ownership(#[from] OwnershipError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a property.
#[derive(Debug, Clone)]
pub struct CreatePropertyInput {
    /// Listing title.
    pub title: String,
    /// Location description.
    pub location: String,
    /// Optional long description.
    pub description: Option<String>,
    /// Total fraction supply; None for a non-fractional property.
    pub total_fractions: Option<i32>,
    /// Price per fraction.
    pub fraction_price: Option<Decimal>,
    /// Total project value.
    pub project_value: Option<Decimal>,
}

/// Input for updating a property. None leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdatePropertyInput {
    /// New title.
    pub title: Option<String>,
    /// New location.
    pub location: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New listing status.
    pub status: Option<PropertyStatus>,
    /// New total fraction supply.
    pub total_fractions: Option<i32>,
    /// New price per fraction.
    pub fraction_price: Option<Decimal>,
    /// New project value.
    pub project_value: Option<Decimal>,
}

/// Property repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct PropertyRepository {
    db: DatabaseConnection,
}

impl PropertyRepository {
    /// Creates a new property repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new property listing.
    ///
    /// # Errors
    ///
    /// Returns an ownership error for a non-positive fraction supply, or a
    /// database error.
    pub async fn create(
        &self,
        input: CreatePropertyInput,
    ) -> Result<properties::Model, PropertyError> {
        OwnershipService::validate_fraction_supply(input.total_fractions)?;

        let now = Utc::now().into();
        let property = properties::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(input.title),
            location: Set(input.location),
            description: Set(input.description),
            status: Set(PropertyStatus::Available),
            total_fractions: Set(input.total_fractions),
            fraction_price: Set(input.fraction_price),
            project_value: Set(input.project_value),
            fractions_sold: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(property.insert(&self.db).await?)
    }

    /// Finds a property by ID.
    ///
    /// # Errors
    ///
    /// Returns `PropertyError::NotFound` if the property does not exist.
    pub async fn find_by_id(&self, id: Uuid) -> Result<properties::Model, PropertyError> {
        properties::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(PropertyError::NotFound(id))
    }

    /// Lists properties, optionally filtered by status, newest first.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn list(
        &self,
        status: Option<PropertyStatus>,
    ) -> Result<Vec<properties::Model>, PropertyError> {
        let mut query = properties::Entity::find();
        if let Some(status) = status {
            query = query.filter(properties::Column::Status.eq(status));
        }
        Ok(query
            .order_by_desc(properties::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// Updates a property listing.
    ///
    /// # Errors
    ///
    /// Returns `PropertyError::NotFound` if the property does not exist, an
    /// ownership error for an invalid supply, or `SupplyBelowSold` if the
    /// new supply is below what has already been sold.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdatePropertyInput,
    ) -> Result<properties::Model, PropertyError> {
        let property = self.find_by_id(id).await?;

        if let Some(total) = input.total_fractions {
            OwnershipService::validate_fraction_supply(Some(total))?;
            if total < property.fractions_sold {
                return Err(PropertyError::SupplyBelowSold {
                    total,
                    sold: property.fractions_sold,
                });
            }
        }

        let mut active = property.into_active_model();
        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(location) = input.location {
            active.location = Set(location);
        }
        if let Some(description) = input.description {
            active.description = Set(Some(description));
        }
        if let Some(status) = input.status {
            active.status = Set(status);
        }
        if let Some(total) = input.total_fractions {
            active.total_fractions = Set(Some(total));
        }
        if let Some(price) = input.fraction_price {
            active.fraction_price = Set(Some(price));
        }
        if let Some(value) = input.project_value {
            active.project_value = Set(Some(value));
        }

        Ok(active.update(&self.db).await?)
    }

    /// Deletes a property listing.
    ///
    /// Investments, revenue periods, and occupancy records for the property
    /// are removed by cascade.
    ///
    /// # Errors
    ///
    /// Returns `PropertyError::NotFound` if the property does not exist.
    pub async fn delete(&self, id: Uuid) -> Result<(), PropertyError> {
        let result = properties::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(PropertyError::NotFound(id));
        }
        Ok(())
    }
}
