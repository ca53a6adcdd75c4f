//! Port interfaces for opportunity persistence
//!
//! These traits define the boundaries between core business logic
//! and the REST infrastructure.

use async_trait::async_trait;
use salesdesk_domain::{Client, Opportunity, Result, StagedFile};

use super::sanitize::SavePayload;
use crate::creation::CreateOpportunityRequest;

/// Trait for persisting opportunities against the backend
#[async_trait]
pub trait OpportunityGateway: Send + Sync {
    /// Replace the editable sub-documents of an existing opportunity.
    ///
    /// Returns the updated record including server-recomputed financials.
    async fn update(&self, id: &str, payload: &SavePayload) -> Result<Opportunity>;

    /// Upload a staged requirement document.
    ///
    /// Independent of the save transaction; returns the new server path.
    async fn upload_requirement_document(&self, id: &str, file: StagedFile) -> Result<String>;

    /// Create a new opportunity in a single atomic request.
    async fn create(&self, request: &CreateOpportunityRequest) -> Result<Opportunity>;
}

/// Trait for listing client companies
#[async_trait]
pub trait ClientDirectory: Send + Sync {
    /// Fetch all client records
    async fn list_clients(&self) -> Result<Vec<Client>>;
}
