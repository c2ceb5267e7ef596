//! Structured legal analysis returned by the backend for a free-text query.
//!
//! Field names follow the backend's snake_case JSON. A `CaseAnalysis` is
//! never mutated after decoding; a new query produces a new value.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// The statutory breakdown of one user query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseAnalysis {
    /// Backend-assigned identifier, informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_id: Option<String>,
    pub normalized_query: NormalizedQuery,
    pub plain_language_summary: String,
    #[serde(default)]
    pub ipc_sections: Vec<StatuteSection>,
    #[serde(default)]
    pub bns_sections: Vec<StatuteSection>,
    #[serde(default)]
    pub legal_signal_checklist: BTreeMap<String, bool>,
    #[serde(default)]
    pub missing_information: Vec<String>,
    pub procedural_guidance: ProceduralGuidance,
    /// The backend has sent this both as a string and as a list of strings.
    #[serde(default, deserialize_with = "string_or_lines")]
    pub limitations: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedQuery {
    pub english_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// One IPC or BNS section the analysis maps the situation onto.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatuteSection {
    pub section_number: String,
    pub title: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProceduralGuidance {
    pub paths_explained: PathsExplained,
    #[serde(default)]
    pub possible_actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsExplained {
    pub police_route: String,
    pub court_route: String,
    pub non_legal_resolution: String,
}

impl CaseAnalysis {
    /// IPC sections followed by BNS sections, in backend order.
    pub fn all_sections(&self) -> impl Iterator<Item = &StatuteSection> {
        self.ipc_sections.iter().chain(self.bns_sections.iter())
    }

    /// Signals marked true, with underscores rendered as spaces.
    pub fn raised_signals(&self) -> Vec<String> {
        self.legal_signal_checklist
            .iter()
            .filter(|(_, raised)| **raised)
            .map(|(name, _)| signal_label(name))
            .collect()
    }
}

/// Human-readable form of a checklist key, e.g. `threat_to_life` -> `threat to life`.
pub fn signal_label(key: &str) -> String {
    key.replace('_', " ")
}

fn string_or_lines<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        One(String),
        Many(Vec<String>),
        Nothing(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::One(s) => s,
        Raw::Many(lines) => lines.join("\n"),
        Raw::Nothing(()) => String::new(),
    })
}
