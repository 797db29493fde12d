//! Core business logic for PropShare.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `ownership` - Fractional ownership invariants and portfolio math
//! - `revenue` - Revenue and occupancy period derivations
//! - `distribution` - Earnings distribution engine and summaries

pub mod distribution;
pub mod ownership;
pub mod revenue;
