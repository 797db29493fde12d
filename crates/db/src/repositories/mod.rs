//! Repository abstractions for data access.
//!
//! Each repository owns a `DatabaseConnection` and exposes async CRUD
//! operations for one aggregate. Business rules stay in `propshare-core`;
//! repositories load state, call into core, and persist the outcome.

pub mod distribution;
pub mod investment;
pub mod occupancy;
pub mod property;
pub mod revenue;
pub mod user;

pub use distribution::{
    DistributionError, DistributionFilter, DistributionListing, DistributionRepository,
    DistributionRunResult, InvestorDistribution,
};
pub use investment::{AssignInvestmentInput, InvestmentError, InvestmentRepository};
pub use occupancy::{
    CreateOccupancyInput, OccupancyError, OccupancyLedger, OccupancyRepository,
    UpdateOccupancyInput,
};
pub use property::{
    CreatePropertyInput, PropertyError, PropertyRepository, UpdatePropertyInput,
};
pub use revenue::{
    CreateRevenueInput, RevenueLedger, RevenueRecordError, RevenueRepository, UpdateRevenueInput,
};
pub use user::{CreateUserInput, UserError, UserRepository};
