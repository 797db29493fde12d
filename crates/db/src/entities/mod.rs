//! `SeaORM` entity definitions.

pub mod earnings_distributions;
pub mod investments;
pub mod occupancy_records;
pub mod properties;
pub mod revenue_periods;
pub mod sea_orm_active_enums;
pub mod users;
