//! `SeaORM` Entity for the earnings_distributions table.
//!
//! `fractions_owned` and `ownership_percentage` are snapshots taken at
//! distribution time; they never track later changes to the investment.
//! Only the payment fields mutate after creation.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::DistributionStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "earnings_distributions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub revenue_period_id: Uuid,
    pub investment_id: Uuid,
    pub fractions_owned: i32,
    pub ownership_percentage: Decimal,
    pub earnings_amount: Decimal,
    pub status: DistributionStatus,
    pub paid_date: Option<DateTimeWithTimeZone>,
    pub payment_reference: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::revenue_periods::Entity",
        from = "Column::RevenuePeriodId",
        to = "super::revenue_periods::Column::Id"
    )]
    RevenuePeriods,
    #[sea_orm(
        belongs_to = "super::investments::Entity",
        from = "Column::InvestmentId",
        to = "super::investments::Column::Id"
    )]
    Investments,
}

impl Related<super::revenue_periods::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RevenuePeriods.def()
    }
}

impl Related<super::investments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Investments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
