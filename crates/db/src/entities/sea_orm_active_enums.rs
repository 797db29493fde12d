//! Active enums mapped to Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User role controlling what a user may do.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
pub enum UserRole {
    /// Registered end user.
    #[sea_orm(string_value = "USER")]
    User,
    /// User approved to hold investments.
    #[sea_orm(string_value = "INVESTOR")]
    Investor,
    /// Platform operator.
    #[sea_orm(string_value = "ADMIN")]
    Admin,
}

/// Property listing status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "property_status")]
pub enum PropertyStatus {
    /// Listed and open.
    #[sea_orm(string_value = "AVAILABLE")]
    Available,
    /// Sold outright.
    #[sea_orm(string_value = "SOLD")]
    Sold,
    /// Held by investors.
    #[sea_orm(string_value = "INVESTED")]
    Invested,
}

/// Payment status of an earnings distribution.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "distribution_status")]
pub enum DistributionStatus {
    /// Awaiting payout.
    #[sea_orm(string_value = "PENDING")]
    Pending,
    /// Paid out.
    #[sea_orm(string_value = "PAID")]
    Paid,
    /// Cancelled by an operator.
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

impl From<propshare_core::distribution::DistributionStatus> for DistributionStatus {
    fn from(status: propshare_core::distribution::DistributionStatus) -> Self {
        match status {
            propshare_core::distribution::DistributionStatus::Pending => Self::Pending,
            propshare_core::distribution::DistributionStatus::Paid => Self::Paid,
            propshare_core::distribution::DistributionStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<DistributionStatus> for propshare_core::distribution::DistributionStatus {
    fn from(status: DistributionStatus) -> Self {
        match status {
            DistributionStatus::Pending => Self::Pending,
            DistributionStatus::Paid => Self::Paid,
            DistributionStatus::Cancelled => Self::Cancelled,
        }
    }
}
