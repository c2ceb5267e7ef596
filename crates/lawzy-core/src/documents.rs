//! Document suggestions and generated drafts.

use serde::{Deserialize, Serialize};

/// A document the backend recommends for the current case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Generated body text for one selected document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentDraft {
    pub title: String,
    pub content: String,
}
