//! # Salesdesk Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The derived-state calculator (TOV, end date, expense totals, approval routing)
//! - The field permission gate
//! - Per-tab draft controllers and the creation flow
//! - Port/adapter interfaces (traits) for the REST gateway
//! - The searchable-select widget model
//!
//! ## Architecture Principles
//! - Only depends on `salesdesk-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod creation;
pub mod drafts;
pub mod finance;
pub mod permissions;
pub mod select;

// Re-export specific items to avoid ambiguity
pub use creation::{CreateOpportunityRequest, CreationForm};
pub use drafts::controller::{EditPhase, FieldChange, OpportunityDraft, Tab, TabController};
pub use drafts::ports::{ClientDirectory, OpportunityGateway};
pub use drafts::sanitize::SavePayload;
pub use permissions::{can_edit, can_edit_expense_field, Section};
pub use select::{Point, Rect, SearchableSelect, SelectOption};
