//! Opportunity creation flow
//!
//! A single form drives the create dialog: pick a client and contact,
//! choose the opportunity type (which swaps in a fresh typed detail
//! payload), fill in scope, optionally attach a requirement document, and
//! submit everything as one atomic request.

use salesdesk_domain::{CrmError, Opportunity, OpportunityType, Result, StagedFile, TypeDetails};
use tracing::{debug, warn};

use crate::drafts::ports::OpportunityGateway;

/// Everything the backend needs to create an opportunity in one request
#[derive(Debug, Clone, PartialEq)]
pub struct CreateOpportunityRequest {
    pub opportunity_type: OpportunityType,
    pub client_id: String,
    pub selected_contact_person: Option<String>,
    pub requirement_summary: Option<String>,
    pub participants: u32,
    pub days: u32,
    pub details: TypeDetails,
    pub requirement_document: Option<StagedFile>,
}

/// Working state of the create dialog
#[derive(Debug, Clone, PartialEq)]
pub struct CreationForm {
    pub client_id: Option<String>,
    pub selected_contact_person: Option<String>,
    pub requirement_summary: Option<String>,
    pub participants: u32,
    pub days: u32,
    pub details: TypeDetails,
    pub staged_document: Option<StagedFile>,
    pub error: Option<String>,
}

impl Default for CreationForm {
    fn default() -> Self {
        Self {
            client_id: None,
            selected_contact_person: None,
            requirement_summary: None,
            participants: 0,
            days: 1,
            details: TypeDetails::empty_for(OpportunityType::Training),
            staged_document: None,
            error: None,
        }
    }
}

impl CreationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opportunity_type(&self) -> OpportunityType {
        self.details.opportunity_type()
    }

    /// Switch the opportunity type.
    ///
    /// Selecting a different type discards the current detail payload and
    /// starts from an empty one, so values from the previous type can never
    /// leak into the request. Re-selecting the current type is a no-op.
    pub fn set_type(&mut self, ty: OpportunityType) {
        if ty != self.details.opportunity_type() {
            self.details = TypeDetails::empty_for(ty);
        }
    }

    /// Attach a requirement document; replaces any previously staged file
    pub fn stage_document(&mut self, file: StagedFile) {
        self.staged_document = Some(file);
    }

    /// Validate the form and assemble the request
    pub fn build(&self) -> Result<CreateOpportunityRequest> {
        let client_id = self
            .client_id
            .clone()
            .ok_or_else(|| CrmError::Validation("a client must be selected".to_string()))?;
        if self.days == 0 {
            return Err(CrmError::Validation("days must be at least 1".to_string()));
        }
        self.validate_details()?;

        Ok(CreateOpportunityRequest {
            opportunity_type: self.details.opportunity_type(),
            client_id,
            selected_contact_person: self.selected_contact_person.clone(),
            requirement_summary: self.requirement_summary.clone(),
            participants: self.participants,
            days: self.days,
            details: self.details.clone(),
            requirement_document: self.staged_document.clone(),
        })
    }

    fn validate_details(&self) -> Result<()> {
        fn required(value: &Option<String>, label: &str) -> Result<()> {
            match value {
                Some(v) if !v.trim().is_empty() => Ok(()),
                _ => Err(CrmError::Validation(format!("{label} is required"))),
            }
        }

        match &self.details {
            TypeDetails::Training(d) => {
                required(&d.technology, "technology")?;
                required(&d.training_name, "training name")
            }
            TypeDetails::Vouchers(d) => {
                if d.number_of_vouchers == 0 {
                    return Err(CrmError::Validation(
                        "at least one voucher is required".to_string(),
                    ));
                }
                required(&d.exam_location, "exam location")
            }
            TypeDetails::LabSupport(d) => {
                required(&d.technology, "technology")?;
                if d.number_of_labs == 0 {
                    return Err(CrmError::Validation("at least one lab is required".to_string()));
                }
                Ok(())
            }
            TypeDetails::ResourceSupport(d) => {
                required(&d.resource_role, "resource role")?;
                if d.number_of_resources == 0 {
                    return Err(CrmError::Validation(
                        "at least one resource is required".to_string(),
                    ));
                }
                Ok(())
            }
            TypeDetails::ContentDevelopment(d) => {
                required(&d.content_type, "content type")?;
                if d.number_of_modules == 0 {
                    return Err(CrmError::Validation(
                        "at least one module is required".to_string(),
                    ));
                }
                Ok(())
            }
            TypeDetails::ProductSupport(d) => required(&d.product_name, "product name"),
        }
    }

    /// Submit the form.
    ///
    /// On success the form resets for the next entry and the created record
    /// is returned; on failure every entered value survives and the error
    /// message is kept for the dialog to display.
    pub async fn submit(&mut self, gateway: &dyn OpportunityGateway) -> Result<Opportunity> {
        let request = match self.build() {
            Ok(request) => request,
            Err(err) => {
                self.error = Some(err.to_string());
                return Err(err);
            }
        };

        debug!(client = %request.client_id, ty = %request.opportunity_type, "creating opportunity");
        match gateway.create(&request).await {
            Ok(record) => {
                *self = Self::default();
                Ok(record)
            }
            Err(err) => {
                warn!(error = %err, "opportunity creation failed");
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Clear the form back to its initial state
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use salesdesk_domain::{TrainingDetails, VoucherDetails};
    use serde_json::json;

    use super::*;
    use crate::drafts::sanitize::SavePayload;

    struct RecordingGateway {
        fail: bool,
        last_request: Mutex<Option<CreateOpportunityRequest>>,
    }

    impl RecordingGateway {
        fn new(fail: bool) -> Self {
            Self { fail, last_request: Mutex::new(None) }
        }
    }

    #[async_trait]
    impl OpportunityGateway for RecordingGateway {
        async fn update(&self, _id: &str, _payload: &SavePayload) -> Result<Opportunity> {
            unimplemented!("not exercised by creation tests")
        }

        async fn upload_requirement_document(
            &self,
            _id: &str,
            _file: StagedFile,
        ) -> Result<String> {
            unimplemented!("not exercised by creation tests")
        }

        async fn create(&self, request: &CreateOpportunityRequest) -> Result<Opportunity> {
            *self.last_request.lock().unwrap() = Some(request.clone());
            if self.fail {
                return Err(CrmError::Network("backend down".to_string()));
            }
            Ok(serde_json::from_value(json!({
                "_id": "opp-new",
                "type": request.opportunity_type,
                "participants": request.participants,
                "days": request.days
            }))
            .unwrap())
        }
    }

    fn filled_training_form() -> CreationForm {
        let mut form = CreationForm::new();
        form.client_id = Some("client-1".to_string());
        form.participants = 15;
        form.days = 4;
        form.details = TypeDetails::Training(TrainingDetails {
            technology: Some("AWS".into()),
            training_name: Some("Architecting on AWS".into()),
            ..TrainingDetails::default()
        });
        form
    }

    #[test]
    fn switching_type_discards_previous_details() {
        let mut form = filled_training_form();
        form.set_type(OpportunityType::Vouchers);
        assert_eq!(form.details, TypeDetails::Vouchers(VoucherDetails::default()));

        // Re-selecting the current type keeps entered values
        form.details = TypeDetails::Vouchers(VoucherDetails {
            number_of_vouchers: 10,
            ..VoucherDetails::default()
        });
        form.set_type(OpportunityType::Vouchers);
        assert_eq!(
            form.details,
            TypeDetails::Vouchers(VoucherDetails {
                number_of_vouchers: 10,
                ..VoucherDetails::default()
            })
        );
    }

    #[test]
    fn build_requires_a_client() {
        let mut form = filled_training_form();
        form.client_id = None;
        let err = form.build().unwrap_err();
        assert!(matches!(err, CrmError::Validation(_)));
    }

    #[test]
    fn build_enforces_per_type_required_fields() {
        let mut form = filled_training_form();
        form.details = TypeDetails::Training(TrainingDetails {
            technology: Some("AWS".into()),
            ..TrainingDetails::default()
        });
        assert!(form.build().is_err());

        form.set_type(OpportunityType::Vouchers);
        form.details = TypeDetails::Vouchers(VoucherDetails {
            number_of_vouchers: 0,
            exam_location: Some("Bengaluru".into()),
            ..VoucherDetails::default()
        });
        assert!(form.build().is_err());

        form.details = TypeDetails::Vouchers(VoucherDetails {
            number_of_vouchers: 25,
            exam_location: Some("Bengaluru".into()),
            ..VoucherDetails::default()
        });
        assert!(form.build().is_ok());
    }

    #[tokio::test]
    async fn successful_submit_resets_the_form() {
        let gateway = RecordingGateway::new(false);
        let mut form = filled_training_form();
        form.stage_document(StagedFile::new("req.pdf", "application/pdf", vec![1, 2]));

        let record = form.submit(&gateway).await.unwrap();
        assert_eq!(record.id, "opp-new");
        assert_eq!(form, CreationForm::default());

        let sent = gateway.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(sent.opportunity_type, OpportunityType::Training);
        assert!(sent.requirement_document.is_some());
    }

    #[tokio::test]
    async fn failed_submit_retains_entries_and_surfaces_error() {
        let gateway = RecordingGateway::new(true);
        let mut form = filled_training_form();

        let err = form.submit(&gateway).await.unwrap_err();
        assert!(matches!(err, CrmError::Network(_)));
        assert_eq!(form.client_id.as_deref(), Some("client-1"));
        assert_eq!(form.error.as_deref(), Some("Network error: backend down"));
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_gateway() {
        let gateway = RecordingGateway::new(false);
        let mut form = CreationForm::new();

        assert!(form.submit(&gateway).await.is_err());
        assert!(gateway.last_request.lock().unwrap().is_none());
        assert!(form.error.is_some());
    }
}
