//! # Salesdesk Domain
//!
//! Business domain types and models for Salesdesk.
//!
//! This crate contains:
//! - Domain data types (Opportunity, Client, SessionUser, etc.)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Static option catalogs (countries, technologies)
//!
//! ## Architecture
//! - No dependencies on other Salesdesk crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod catalogs;
pub mod config;
pub mod documents;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::ApiConfig;
pub use errors::{CrmError, Result};
pub use types::*;
