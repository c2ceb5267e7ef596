//! Remote service gateway: typed calls to the legal-analysis backend.
//!
//! One round trip per call, no retries, no caching. Callers validate input.

pub mod config;
pub mod error;
pub mod http;

pub use config::{ConfigError, GatewayConfig};
pub use error::{ServiceCause, ServiceError};
pub use http::{Health, HttpGateway};

use async_trait::async_trait;
use lawzy_core::{CaseAnalysis, PracticeCard, Suggestion};

/// The four backend operations the session orchestrates.
#[async_trait]
pub trait LegalService: Send + Sync {
    async fn analyze(&self, query: &str) -> Result<CaseAnalysis, ServiceError>;

    async fn suggest_documents(
        &self,
        analysis: &CaseAnalysis,
    ) -> Result<Vec<Suggestion>, ServiceError>;

    /// Returns the draft body text for `title`.
    async fn generate_document(
        &self,
        analysis: &CaseAnalysis,
        title: &str,
    ) -> Result<String, ServiceError>;

    async fn generate_practice_cards(
        &self,
        analysis: &CaseAnalysis,
    ) -> Result<Vec<PracticeCard>, ServiceError>;
}
