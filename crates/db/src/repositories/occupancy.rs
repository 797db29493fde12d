//! Occupancy repository for nightly booking record operations.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use propshare_core::revenue::{
    RevenueError as ValidationError, validate_nights, validate_period_month,
};

use crate::entities::{occupancy_records, properties};

/// Error types for occupancy record operations.
#[derive(Debug, thiserror::Error)]
pub enum OccupancyError {
    /// Occupancy record not found.
    #[error("Occupancy record not found: {0}")]
    NotFound(Uuid),

    /// Property not found.
    #[error("Property not found: {0}")]
    PropertyNotFound(Uuid),

    /// A record already exists for this property-month.
    #[error("Occupancy record already exists for {month}/{year}")]
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

/// Input for creating an occupancy record.
#[derive(Debug, Clone)]
pub struct CreateOccupancyInput {
    /// The property the record belongs to.
    pub property_id: Uuid,
    /// Period month, 1-12.
    pub month: i32,
    /// Period year.
    pub year: i32,
    /// Nights booked in the period.
    pub nights_booked: i32,
    /// Nights the unit was available in the period.
    pub nights_available: i32,
    /// Admin who recorded the period.
    pub created_by: Uuid,
    /// Optional notes.
    pub notes: Option<String>,
}

/// Input for updating an occupancy record. None leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateOccupancyInput {
    /// New booked night count.
    pub nights_booked: Option<i32>,
    /// New available night count.
    pub nights_available: Option<i32>,
    /// New notes.
    pub notes: Option<String>,
}

/// A property's occupancy history with the overall rate.
#[derive(Debug, Clone)]
pub struct OccupancyLedger {
    /// Records, newest first.
    pub records: Vec<occupancy_records::Model>,
    /// Total nights booked / total nights available, as a percentage.
    pub average_occupancy_rate: Decimal,
}

/// Occupancy repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct OccupancyRepository {
    db: DatabaseConnection,
}

impl OccupancyRepository {
    /// Creates a new occupancy repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an occupancy record for a property-month.
    ///
    /// # Errors
    ///
    /// Returns an error if the property does not exist, the month or night
    /// counts are invalid, or a record already exists for the period.
    pub async fn create(
        &self,
        input: CreateOccupancyInput,
    ) -> Result<occupancy_records::Model, OccupancyError> {
        validate_period_month(input.month)?;
        validate_nights(input.nights_booked, input.nights_available)?;

        properties::Entity::find_by_id(input.property_id)
            .one(&self.db)
            .await?
            .ok_or(OccupancyError::PropertyNotFound(input.property_id))?;

        let existing = occupancy_records::Entity::find()
            .filter(occupancy_records::Column::PropertyId.eq(input.property_id))
            .filter(occupancy_records::Column::Month.eq(input.month))
            .filter(occupancy_records::Column::Year.eq(input.year))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(OccupancyError::DuplicatePeriod {
                month: input.month,
                year: input.year,
            });
        }

        let now = Utc::now().into();
        let record = occupancy_records::ActiveModel {
            id: Set(Uuid::new_v4()),
            property_id: Set(input.property_id),
            month: Set(input.month),
            year: Set(input.year),
            nights_booked: Set(input.nights_booked),
            nights_available: Set(input.nights_available),
            created_by: Set(input.created_by),
            notes: Set(input.notes),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(record.insert(&self.db).await?)
    }

    /// Finds an occupancy record by ID.
    ///
    /// # Errors
    ///
    /// Returns `OccupancyError::NotFound` if the record does not exist.
    pub async fn find_by_id(&self, id: Uuid) -> Result<occupancy_records::Model, OccupancyError> {
        occupancy_records::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(OccupancyError::NotFound(id))
    }

    /// Updates an occupancy record.
    ///
    /// # Errors
    ///
    /// Returns `OccupancyError::NotFound` if the record does not exist, or a
    /// validation error for invalid night counts.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateOccupancyInput,
    ) -> Result<occupancy_records::Model, OccupancyError> {
        let record = self.find_by_id(id).await?;

        let nights_booked = input.nights_booked.unwrap_or(record.nights_booked);
        let nights_available = input.nights_available.unwrap_or(record.nights_available);
        validate_nights(nights_booked, nights_available)?;

        let mut active = record.into_active_model();
        active.nights_booked = Set(nights_booked);
        active.nights_available = Set(nights_available);
        if let Some(notes) = input.notes {
            active.notes = Set(Some(notes));
        }

        Ok(active.update(&self.db).await?)
    }

    /// Lists a property's occupancy history with the overall rate.
    ///
    /// The rate is total booked nights over total available nights, so a
    /// short month cannot skew it the way averaging monthly rates would.
    ///
    /// # Errors
    ///
    /// Returns `OccupancyError::PropertyNotFound` if the property does not
    /// exist.
    pub async fn list_for_property(
        &self,
        property_id: Uuid,
    ) -> Result<OccupancyLedger, OccupancyError> {
        properties::Entity::find_by_id(property_id)
            .one(&self.db)
            .await?
            .ok_or(OccupancyError::PropertyNotFound(property_id))?;

        let records = occupancy_records::Entity::find()
            .filter(occupancy_records::Column::PropertyId.eq(property_id))
            .order_by_desc(occupancy_records::Column::Year)
            .order_by_desc(occupancy_records::Column::Month)
            .all(&self.db)
            .await?;

        let total_booked: i64 = records.iter().map(|r| i64::from(r.nights_booked)).sum();
        let total_available: i64 = records.iter().map(|r| i64::from(r.nights_available)).sum();
        let average_occupancy_rate = if total_available == 0 {
            Decimal::ZERO
        } else {
            Decimal::from(total_booked) / Decimal::from(total_available) * Decimal::ONE_HUNDRED
        };

        Ok(OccupancyLedger {
            records,
            average_occupancy_rate,
        })
    }
}
