//! Revenue and occupancy period derivations.
//!
//! One record per (property, month, year). Derived figures, net income,
//! profit margin, occupancy rate, period labels, are computed on read from
//! the stored fields.

pub mod error;
pub mod types;
pub mod validation;

pub use error::RevenueError;
pub use types::{OccupancyFigures, RevenueFigures, period_label};
pub use validation::{validate_can_edit, validate_nights, validate_period_amounts, validate_period_month};
