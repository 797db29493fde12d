//! `SeaORM` Entity for the revenue_periods table.
//!
//! One row per (property, month, year). Financial fields are frozen once
//! `distributed` is set; the flag flips exactly once, inside the
//! distribution run's transaction.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "revenue_periods")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub property_id: Uuid,
    pub month: i32,
    pub year: i32,
    pub gross_revenue: Decimal,
    pub expenses: Decimal,
    pub distributed: bool,
    pub distribution_date: Option<DateTimeWithTimeZone>,
    pub created_by: Uuid,
    pub notes: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::properties::Entity",
        from = "Column::PropertyId",
        to = "super::properties::Column::Id"
    )]
    Properties,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id"
    )]
    Users,
    #[sea_orm(has_many = "super::earnings_distributions::Entity")]
    EarningsDistributions,
}

impl Related<super::properties::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Properties.def()
    }
}

impl Related<super::earnings_distributions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EarningsDistributions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
