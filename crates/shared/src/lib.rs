//! Shared configuration and error types for PropShare.
//!
//! This crate provides types used across all other crates:
//! - Application-wide error classification
//! - Configuration management

pub mod config;
pub mod error;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
