use std::fmt;

/// Backend operations the gateway can call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Analyze,
    SuggestDocuments,
    GenerateDocument,
    PracticeCards,
    Health,
}

impl Endpoint {
    /// Path relative to the backend base URL, without a leading slash.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Analyze => "analyze",
            Self::SuggestDocuments => "documents/suggest",
            Self::GenerateDocument => "documents/generate",
            Self::PracticeCards => "questions/generate",
            Self::Health => "health",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Analyze => "POST /analyze",
            Self::SuggestDocuments => "POST /documents/suggest",
            Self::GenerateDocument => "POST /documents/generate",
            Self::PracticeCards => "POST /questions/generate",
            Self::Health => "GET /health",
        };
        f.write_str(s)
    }
}
