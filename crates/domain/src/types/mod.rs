//! Domain types and models

pub mod client;
pub mod details;
pub mod opportunity;
pub mod user;

pub use client::{Client, ContactPerson};
pub use details::{
    ContentDevelopmentDetails, LabSupportDetails, ModeOfTraining, ProductSupportDetails,
    ResourceSupportDetails, TrainingDetails, TypeDetails, VoucherDetails,
};
pub use opportunity::{
    ApprovalStatus, ClientRef, CommonDetails, ExpenseField, Expenses, Financials, Opportunity,
    OpportunityStatus, OpportunityType, SalesOwnerRef, StagedFile, TovUnit,
};
pub use user::{Role, SessionUser};
