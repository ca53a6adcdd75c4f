//! HTTP implementation of the opportunity persistence ports
//!
//! Maps the core layer's gateway traits onto the CRM backend's REST
//! endpoints. Record updates go as JSON; creation and document upload go as
//! multipart because they may carry a file.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use salesdesk_core::{ClientDirectory, CreateOpportunityRequest, OpportunityGateway, SavePayload};
use salesdesk_domain::documents::resolve_document_url;
use salesdesk_domain::{Client, CrmError, Opportunity, Result, StagedFile};
use serde::Deserialize;
use tracing::info;

use crate::api::ApiClient;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    requirement_document: String,
}

/// Gateway backed by the CRM REST API
pub struct HttpOpportunityGateway {
    api: Arc<ApiClient>,
}

impl HttpOpportunityGateway {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Absolute URL for a server-relative document path
    pub fn document_link(&self, path: &str) -> Result<String> {
        resolve_document_url(self.api.base_url(), path)
    }

    fn file_part(file: &StagedFile) -> Result<Part> {
        Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)
            .map_err(|e| CrmError::InvalidInput(format!("invalid content type: {e}")))
    }

    fn creation_form(request: &CreateOpportunityRequest) -> Result<Form> {
        let details_json = serde_json::to_string(&request.details)?;

        let mut form = Form::new()
            .text("type", request.opportunity_type.as_str())
            .text("clientId", request.client_id.clone())
            .text("participants", request.participants.to_string())
            .text("days", request.days.to_string())
            .text("typeSpecificDetails", details_json);

        if let Some(contact) = &request.selected_contact_person {
            form = form.text("selectedContactPerson", contact.clone());
        }
        if let Some(summary) = &request.requirement_summary {
            form = form.text("requirementSummary", summary.clone());
        }
        if let Some(file) = &request.requirement_document {
            form = form.part("requirementDocument", Self::file_part(file)?);
        }
        Ok(form)
    }
}

#[async_trait]
impl OpportunityGateway for HttpOpportunityGateway {
    async fn update(&self, id: &str, payload: &SavePayload) -> Result<Opportunity> {
        let path = format!("/api/opportunities/{id}");
        let record: Opportunity = self.api.put(&path, payload).await.map_err(CrmError::from)?;
        info!(opportunity = %id, "opportunity updated");
        Ok(record)
    }

    async fn upload_requirement_document(&self, id: &str, file: StagedFile) -> Result<String> {
        let path = format!("/api/opportunities/{id}/upload-requirement-document");
        let form = Form::new().part("requirementDocument", Self::file_part(&file)?);

        let response: UploadResponse =
            self.api.post_multipart(&path, form).await.map_err(CrmError::from)?;
        info!(opportunity = %id, path = %response.requirement_document, "document uploaded");
        Ok(response.requirement_document)
    }

    async fn create(&self, request: &CreateOpportunityRequest) -> Result<Opportunity> {
        let form = Self::creation_form(request)?;
        let record: Opportunity =
            self.api.post_multipart("/api/opportunities", form).await.map_err(CrmError::from)?;
        info!(opportunity = %record.id, ty = %record.opportunity_type, "opportunity created");
        Ok(record)
    }
}

#[async_trait]
impl ClientDirectory for HttpOpportunityGateway {
    async fn list_clients(&self) -> Result<Vec<Client>> {
        self.api.get("/api/clients").await.map_err(CrmError::from)
    }
}

#[cfg(test)]
mod tests {
    use salesdesk_core::{CreationForm, OpportunityDraft};
    use salesdesk_domain::{OpportunityType, TrainingDetails, TypeDetails};
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::{ApiClientConfig, StaticTokenProvider};

    fn gateway_for(server: &MockServer) -> HttpOpportunityGateway {
        let config = ApiClientConfig { base_url: server.uri(), ..Default::default() };
        let auth = Arc::new(StaticTokenProvider::new("session-token"));
        HttpOpportunityGateway::new(Arc::new(ApiClient::new(config, auth).unwrap()))
    }

    fn record_json() -> serde_json::Value {
        json!({
            "_id": "opp-1",
            "type": "Training",
            "commonDetails": { "tovRate": 1000.0, "tovUnit": "Per Day" },
            "typeSpecificDetails": { "technology": "AWS", "trainingName": "Architecting" },
            "participants": 10,
            "days": 5
        })
    }

    #[tokio::test]
    async fn update_puts_sanitised_payload() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/opportunities/opp-1"))
            .and(header("Authorization", "Bearer session-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(record_json()))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = gateway_for(&server);
        let record: Opportunity = serde_json::from_value(record_json()).unwrap();
        let payload = SavePayload::from_draft(&OpportunityDraft::from_record(&record));

        let updated = gateway.update("opp-1", &payload).await.unwrap();
        assert_eq!(updated.id, "opp-1");

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert!(body.get("_id").is_none());
        assert_eq!(body["commonDetails"]["tovRate"], 1000.0);
    }

    #[tokio::test]
    async fn update_surfaces_missing_record() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/opportunities/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let gateway = gateway_for(&server);
        let record: Opportunity = serde_json::from_value(record_json()).unwrap();
        let payload = SavePayload::from_draft(&OpportunityDraft::from_record(&record));

        let err = gateway.update("gone", &payload).await.unwrap_err();
        assert!(matches!(err, CrmError::NotFound(_)));
    }

    #[tokio::test]
    async fn create_posts_multipart_with_details_json() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/opportunities"))
            .and(body_string_contains("client-7"))
            .and(body_string_contains("trainingName"))
            .respond_with(ResponseTemplate::new(200).set_body_json(record_json()))
            .expect(1)
            .mount(&server)
            .await;

        let mut form = CreationForm::new();
        form.client_id = Some("client-7".to_string());
        form.participants = 10;
        form.days = 5;
        form.details = TypeDetails::Training(TrainingDetails {
            technology: Some("AWS".into()),
            training_name: Some("Architecting".into()),
            ..TrainingDetails::default()
        });
        form.stage_document(StagedFile::new("req.pdf", "application/pdf", vec![1, 2, 3]));

        let gateway = gateway_for(&server);
        let record = gateway.create(&form.build().unwrap()).await.unwrap();
        assert_eq!(record.opportunity_type, OpportunityType::Training);

        let requests = server.received_requests().await.unwrap();
        let content_type = requests[0].headers.get("content-type").unwrap().to_str().unwrap();
        assert!(content_type.starts_with("multipart/form-data"));
    }

    #[tokio::test]
    async fn upload_returns_server_path() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/opportunities/opp-1/upload-requirement-document"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "requirementDocument": "uploads/req.pdf" })),
            )
            .mount(&server)
            .await;

        let gateway = gateway_for(&server);
        let file = StagedFile::new("req.pdf", "application/pdf", vec![1]);
        let result = gateway.upload_requirement_document("opp-1", file).await.unwrap();
        assert_eq!(result, "uploads/req.pdf");
    }

    #[tokio::test]
    async fn list_clients_parses_directory() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/clients"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "_id": "client-1",
                    "companyName": "Acme Corp",
                    "contactPersons": [
                        { "name": "Asha", "designation": "CTO", "isPrimary": true }
                    ]
                }
            ])))
            .mount(&server)
            .await;

        let gateway = gateway_for(&server);
        let clients = gateway.list_clients().await.unwrap();
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].company_name, "Acme Corp");
        assert_eq!(clients[0].primary_contact().unwrap().name, "Asha");
    }

    #[test]
    fn document_links_resolve_against_base_url() {
        let config = ApiClientConfig {
            base_url: "https://crm.example.com".to_string(),
            ..Default::default()
        };
        let auth = Arc::new(StaticTokenProvider::new("t"));
        let gateway = HttpOpportunityGateway::new(Arc::new(ApiClient::new(config, auth).unwrap()));

        let link = gateway.document_link("uploads\\2024\\req.pdf").unwrap();
        assert_eq!(link, "https://crm.example.com/uploads/2024/req.pdf");
    }
}
