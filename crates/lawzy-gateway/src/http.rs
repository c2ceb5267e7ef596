//! HTTP client for the legal-analysis backend's JSON endpoints.

use std::time::Duration;

use async_trait::async_trait;
use lawzy_core::{CaseAnalysis, Endpoint, PracticeCard, Suggestion};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{ConfigError, GatewayConfig};
use crate::error::{ServiceCause, ServiceError};
use crate::LegalService;

/// HTTP gateway to the backend's analyze, documents, and questions endpoints.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: url::Url,
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    query: &'a str,
}

#[derive(Serialize)]
struct CaseRequest<'a> {
    case_data: &'a CaseAnalysis,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    case_data: &'a CaseAnalysis,
    selected_doc: &'a str,
}

#[derive(Deserialize)]
struct SuggestResponse {
    suggestions: Vec<Suggestion>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    document_text: String,
}

#[derive(Deserialize)]
struct CardsResponse {
    cards: Vec<PracticeCard>,
}

/// Payload of the backend's liveness probe.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub service: String,
}

/// Some backend routes answer 200 with `{"error": "..."}` instead of a status code.
#[derive(Deserialize)]
struct BackendError {
    error: String,
}

impl HttpGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &url::Url {
        &self.base_url
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    /// Probe `GET /health`.
    pub async fn health(&self) -> Result<Health, ServiceError> {
        let endpoint = Endpoint::Health;
        let url = self.url(endpoint);
        info!(url = %url, "probing backend health");
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ServiceError::new(endpoint, e))?;
        decode(endpoint, resp).await
    }

    async fn post<B, T>(&self, endpoint: Endpoint, body: &B) -> Result<T, ServiceError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(endpoint);
        info!(url = %url, %endpoint, "calling backend");
        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ServiceError::new(endpoint, e))?;
        decode(endpoint, resp).await
    }
}

async fn decode<T: DeserializeOwned>(
    endpoint: Endpoint,
    resp: reqwest::Response,
) -> Result<T, ServiceError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ServiceError::new(
            endpoint,
            ServiceCause::Server {
                status: status.as_u16(),
                body,
            },
        ));
    }

    let text = resp
        .text()
        .await
        .map_err(|e| ServiceError::new(endpoint, e))?;
    parse_body(endpoint, &text)
}

fn parse_body<T: DeserializeOwned>(endpoint: Endpoint, text: &str) -> Result<T, ServiceError> {
    match serde_json::from_str::<T>(text) {
        Ok(value) => Ok(value),
        Err(err) => match serde_json::from_str::<BackendError>(text) {
            Ok(reported) => Err(ServiceError::new(endpoint, ServiceCause::Backend(reported.error))),
            Err(_) => Err(ServiceError::new(endpoint, err)),
        },
    }
}

#[async_trait]
impl LegalService for HttpGateway {
    async fn analyze(&self, query: &str) -> Result<CaseAnalysis, ServiceError> {
        let analysis: CaseAnalysis = self
            .post(Endpoint::Analyze, &AnalyzeRequest { query })
            .await?;
        info!(
            ipc = analysis.ipc_sections.len(),
            bns = analysis.bns_sections.len(),
            "analysis received"
        );
        Ok(analysis)
    }

    async fn suggest_documents(
        &self,
        analysis: &CaseAnalysis,
    ) -> Result<Vec<Suggestion>, ServiceError> {
        let resp: SuggestResponse = self
            .post(Endpoint::SuggestDocuments, &CaseRequest { case_data: analysis })
            .await?;
        info!(count = resp.suggestions.len(), "suggestions received");
        Ok(resp.suggestions)
    }

    async fn generate_document(
        &self,
        analysis: &CaseAnalysis,
        title: &str,
    ) -> Result<String, ServiceError> {
        let resp: GenerateResponse = self
            .post(
                Endpoint::GenerateDocument,
                &GenerateRequest {
                    case_data: analysis,
                    selected_doc: title,
                },
            )
            .await?;
        debug!(title, chars = resp.document_text.len(), "draft received");
        Ok(resp.document_text)
    }

    async fn generate_practice_cards(
        &self,
        analysis: &CaseAnalysis,
    ) -> Result<Vec<PracticeCard>, ServiceError> {
        let resp: CardsResponse = self
            .post(Endpoint::PracticeCards, &CaseRequest { case_data: analysis })
            .await?;
        info!(count = resp.cards.len(), "practice cards received");
        Ok(resp.cards)
    }
}
