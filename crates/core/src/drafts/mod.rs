//! Opportunity draft editing
//!
//! Each tab owns a draft controller: a copy-on-edit working copy of the
//! record, a small state machine around save/cancel, and the permission and
//! validation rules that gate every field commit.

pub mod controller;
pub mod ports;
pub mod sanitize;
pub mod validate;

pub use controller::{EditPhase, FieldChange, OpportunityDraft, Tab, TabController};
pub use ports::{ClientDirectory, OpportunityGateway};
pub use sanitize::SavePayload;
