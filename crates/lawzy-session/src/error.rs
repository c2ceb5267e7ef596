use lawzy_core::Endpoint;
use lawzy_gateway::ServiceError;
use thiserror::Error;

/// Input rejected locally before any network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("query must not be blank")]
    BlankQuery,
    #[error("document title must not be blank")]
    BlankTitle,
    #[error("no case analysis loaded")]
    NoAnalysis,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    /// A reply for state that has since been superseded; never shown to the user.
    #[error("stale response from {endpoint} discarded")]
    StaleResponse { endpoint: Endpoint },

    #[error("export failed: {0}")]
    Export(#[from] std::io::Error),
}

impl SessionError {
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::StaleResponse { .. })
    }
}
