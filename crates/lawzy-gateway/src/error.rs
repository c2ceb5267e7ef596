use lawzy_core::Endpoint;
use thiserror::Error;

/// A failed backend call, tagged with the endpoint that failed.
#[derive(Error, Debug)]
#[error("{endpoint} failed: {cause}")]
pub struct ServiceError {
    pub endpoint: Endpoint,
    #[source]
    pub cause: ServiceCause,
}

#[derive(Error, Debug)]
pub enum ServiceCause {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("backend reported: {0}")]
    Backend(String),
}

impl ServiceError {
    pub fn new(endpoint: Endpoint, cause: impl Into<ServiceCause>) -> Self {
        Self {
            endpoint,
            cause: cause.into(),
        }
    }
}
