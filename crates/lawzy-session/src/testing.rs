//! Scripted in-memory backend and fixtures for session tests.

use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use lawzy_core::{
    CaseAnalysis, Difficulty, Endpoint, NormalizedQuery, PathsExplained, PracticeCard,
    ProceduralGuidance, StatuteSection, Suggestion,
};
use lawzy_gateway::{LegalService, ServiceCause, ServiceError};

pub fn failure(endpoint: Endpoint) -> ServiceError {
    ServiceError::new(
        endpoint,
        ServiceCause::Server {
            status: 500,
            body: "backend unavailable".into(),
        },
    )
}

pub fn sample_analysis(query: &str) -> CaseAnalysis {
    CaseAnalysis {
        case_id: None,
        normalized_query: NormalizedQuery {
            english_version: query.to_string(),
            original_text: Some(query.to_string()),
            language: Some("English".into()),
        },
        plain_language_summary: format!("Summary of: {query}"),
        ipc_sections: vec![StatuteSection {
            section_number: "506".into(),
            title: "Criminal intimidation".into(),
            explanation: "Threatening another with injury.".into(),
        }],
        bns_sections: vec![StatuteSection {
            section_number: "351".into(),
            title: "Criminal intimidation".into(),
            explanation: "Threatening another with injury.".into(),
        }],
        legal_signal_checklist: BTreeMap::from([("threat_present".to_string(), true)]),
        missing_information: vec!["Dates of each threat".into()],
        procedural_guidance: ProceduralGuidance {
            paths_explained: PathsExplained {
                police_route: "File an FIR at the local station.".into(),
                court_route: "Seek a protective injunction.".into(),
                non_legal_resolution: "Community mediation.".into(),
            },
            possible_actions: vec!["Keep records of every threat".into()],
        },
        limitations: "General information, not legal advice.".into(),
    }
}

pub fn sample_suggestions(n: usize) -> Vec<Suggestion> {
    ["Police Complaint", "Legal Notice", "Affidavit", "RTI Application"]
        .iter()
        .cycle()
        .take(n)
        .map(|title| Suggestion {
            title: title.to_string(),
            description: format!("Draft a {title}"),
        })
        .collect()
}

pub fn sample_cards(n: usize) -> Vec<PracticeCard> {
    (0..n)
        .map(|i| PracticeCard {
            category: "Basic Fact".into(),
            question: format!("Question {}?", i + 1),
            difficulty: Difficulty::new((i % 5 + 1) as u8),
            purpose: format!("Purpose {}", i + 1),
        })
        .collect()
}

/// Backend double: answers from per-endpoint queues, falling back to fixtures
/// when a queue is empty, and counts calls.
#[derive(Default)]
pub struct ScriptedService {
    analyses: Mutex<VecDeque<Result<CaseAnalysis, ServiceError>>>,
    suggestions: Mutex<VecDeque<Result<Vec<Suggestion>, ServiceError>>>,
    drafts: Mutex<VecDeque<Result<String, ServiceError>>>,
    cards: Mutex<VecDeque<Result<Vec<PracticeCard>, ServiceError>>>,
    pub analyze_calls: AtomicUsize,
    pub suggest_calls: AtomicUsize,
    pub generate_calls: AtomicUsize,
    pub card_calls: AtomicUsize,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_analysis(&self, r: Result<CaseAnalysis, ServiceError>) {
        self.analyses.lock().unwrap().push_back(r);
    }

    pub fn push_suggestions(&self, r: Result<Vec<Suggestion>, ServiceError>) {
        self.suggestions.lock().unwrap().push_back(r);
    }

    pub fn push_draft(&self, r: Result<String, ServiceError>) {
        self.drafts.lock().unwrap().push_back(r);
    }

    pub fn push_cards(&self, r: Result<Vec<PracticeCard>, ServiceError>) {
        self.cards.lock().unwrap().push_back(r);
    }
}

#[async_trait]
impl LegalService for ScriptedService {
    async fn analyze(&self, query: &str) -> Result<CaseAnalysis, ServiceError> {
        self.analyze_calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self.analyses.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| Ok(sample_analysis(query)))
    }

    async fn suggest_documents(
        &self,
        _analysis: &CaseAnalysis,
    ) -> Result<Vec<Suggestion>, ServiceError> {
        self.suggest_calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self.suggestions.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| Ok(sample_suggestions(3)))
    }

    async fn generate_document(
        &self,
        _analysis: &CaseAnalysis,
        title: &str,
    ) -> Result<String, ServiceError> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self.drafts.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| Ok(format!("Draft body for {title}")))
    }

    async fn generate_practice_cards(
        &self,
        _analysis: &CaseAnalysis,
    ) -> Result<Vec<PracticeCard>, ServiceError> {
        self.card_calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self.cards.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| Ok(sample_cards(3)))
    }
}
