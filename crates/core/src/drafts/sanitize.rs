//! Save payload assembly
//!
//! The payload sent on save carries only the editable sub-documents. Server
//! identity fields (`_id`, version counters) are unrepresentable here, and
//! populated references flatten to their ids through the domain types'
//! serialisation, so sanitisation holds at the boundary by construction
//! rather than by ad hoc stripping.

use salesdesk_domain::{CommonDetails, Expenses, TypeDetails};
use serde::Serialize;

use super::controller::OpportunityDraft;

/// Body of `PUT /api/opportunities/:id`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePayload {
    pub common_details: CommonDetails,
    pub expenses: Expenses,
    pub type_specific_details: TypeDetails,
    pub participants: u32,
    pub days: u32,
    pub requirement_summary: Option<String>,
}

impl SavePayload {
    /// Build the payload from a draft's current state
    pub fn from_draft(draft: &OpportunityDraft) -> Self {
        Self {
            common_details: draft.common.clone(),
            expenses: draft.expenses.clone(),
            type_specific_details: draft.details.clone(),
            participants: draft.participants,
            days: draft.days,
            requirement_summary: draft.requirement_summary.clone(),
        }
    }
}
