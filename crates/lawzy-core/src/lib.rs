pub mod analysis;
pub mod documents;
pub mod endpoint;
pub mod practice;

pub use analysis::{
    CaseAnalysis, NormalizedQuery, PathsExplained, ProceduralGuidance, StatuteSection, signal_label,
};
pub use documents::{DocumentDraft, Suggestion};
pub use endpoint::Endpoint;
pub use practice::{Difficulty, PracticeCard};
