//! Fractional ownership invariants and portfolio math.
//!
//! This module implements the ownership ledger's pure logic:
//! - Fractional supply checks (`is_fractional`, available fractions)
//! - Ownership percentage and valuation growth derivations
//! - Issuance validation for assigning stakes to investors
//! - Portfolio aggregation across a user's stakes

pub mod error;
pub mod service;
pub mod types;

pub use error::OwnershipError;
pub use service::OwnershipService;
pub use types::{FractionalConfig, PortfolioTotals, StakeSnapshot, Valuation};
