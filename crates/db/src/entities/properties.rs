//! `SeaORM` Entity for the properties table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::PropertyStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "properties")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub location: String,
    pub description: Option<String>,
    pub status: PropertyStatus,
    /// Total fraction supply; NULL means the property is not fractionally owned.
    pub total_fractions: Option<i32>,
    pub fraction_price: Option<Decimal>,
    pub project_value: Option<Decimal>,
    pub fractions_sold: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::investments::Entity")]
    Investments,
    #[sea_orm(has_many = "super::revenue_periods::Entity")]
    RevenuePeriods,
    #[sea_orm(has_many = "super::occupancy_records::Entity")]
    OccupancyRecords,
}

impl Related<super::investments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Investments.def()
    }
}

impl Related<super::revenue_periods::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RevenuePeriods.def()
    }
}

impl Related<super::occupancy_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OccupancyRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
