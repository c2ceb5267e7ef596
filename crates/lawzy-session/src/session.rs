//! The session event loop.
//!
//! `Session` owns the analysis store and every controller derived from it.
//! Gateway calls are queued as boxed futures and their replies are applied one
//! at a time through `&mut self`, so each piece of state has exactly one
//! writer and no locks are needed. Replies for superseded state are dropped.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use lawzy_core::{CaseAnalysis, DocumentDraft, PracticeCard, Suggestion};
use lawzy_gateway::{LegalService, ServiceError};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::documents::{DocumentController, DraftState, DraftTicket};
use crate::error::{SessionError, ValidationError};
use crate::export;
use crate::prefetch::{PrefetchTicket, SuggestionCache};
use crate::practice::{Advance, PracticeController, PracticeState, PracticeTicket};
use crate::store::{AnalysisStore, AnalyzeTicket, SharedAnalysis};

enum Completion {
    Analyzed(AnalyzeTicket, Result<CaseAnalysis, ServiceError>),
    Suggested(PrefetchTicket, Result<Vec<Suggestion>, ServiceError>),
    Drafted(DraftTicket, Result<String, ServiceError>),
    Carded(PracticeTicket, Result<Vec<PracticeCard>, ServiceError>),
}

/// Something the user-facing layer should react to.
#[derive(Debug)]
pub enum SessionEvent {
    /// A new analysis is stored; navigate to the dashboard.
    AnalysisReady(Arc<CaseAnalysis>),
    /// Analyze failed; the previous analysis (if any) is still current.
    AnalysisFailed(ServiceError),
    /// Prefetch finished. Zero means "no suggestions", including after a failure.
    SuggestionsSettled { count: usize },
    DraftReady(DocumentDraft),
    DraftFailed { title: String, error: ServiceError },
    PracticeReady { cards: usize },
    PracticeEmpty,
}

pub struct Session {
    gateway: Arc<dyn LegalService>,
    store: AnalysisStore,
    suggestions: SuggestionCache,
    documents: DocumentController,
    practice: PracticeController,
    pending: FuturesUnordered<BoxFuture<'static, Completion>>,
}

impl Session {
    pub fn new(gateway: Arc<dyn LegalService>) -> Self {
        Self {
            gateway,
            store: AnalysisStore::new(),
            suggestions: SuggestionCache::new(),
            documents: DocumentController::new(),
            practice: PracticeController::new(),
            pending: FuturesUnordered::new(),
        }
    }

    // ── Reads ──

    pub fn analysis(&self) -> SharedAnalysis {
        self.store.current()
    }

    /// Observe analysis replacements.
    pub fn subscribe(&self) -> watch::Receiver<SharedAnalysis> {
        self.store.subscribe()
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        self.suggestions.suggestions()
    }

    pub fn suggestions_loading(&self) -> bool {
        self.suggestions.is_loading()
    }

    pub fn draft_state(&self) -> &DraftState {
        self.documents.state()
    }

    pub fn selection_history(&self) -> &[String] {
        self.documents.history()
    }

    pub fn practice_state(&self) -> &PracticeState {
        self.practice.state()
    }

    /// Number of gateway calls still outstanding.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    // ── Commands ──

    /// Start analysing `query`. Blank queries are rejected with no call made.
    pub fn submit(&mut self, query: &str) -> Result<(), ValidationError> {
        let ticket = self.store.begin(query)?;
        let gateway = Arc::clone(&self.gateway);
        self.pending.push(Box::pin(async move {
            let result = gateway.analyze(ticket.query()).await;
            Completion::Analyzed(ticket, result)
        }));
        Ok(())
    }

    /// Evaluate the prefetch trigger. Safe to call any number of times;
    /// returns whether a fetch was started.
    pub fn ensure_suggestions(&mut self) -> bool {
        let current = self.store.current();
        match self.suggestions.evaluate(current.as_ref()) {
            Some(ticket) => {
                let gateway = Arc::clone(&self.gateway);
                self.pending.push(Box::pin(async move {
                    let result = gateway.suggest_documents(ticket.analysis()).await;
                    Completion::Suggested(ticket, result)
                }));
                true
            }
            None => false,
        }
    }

    /// Select a document to draft. Returns whether a generate call started.
    pub fn select_document(&mut self, title: &str) -> Result<bool, ValidationError> {
        let current = self.store.current();
        match self.documents.select(current.as_ref(), title)? {
            Some(ticket) => {
                let gateway = Arc::clone(&self.gateway);
                self.pending.push(Box::pin(async move {
                    let result = gateway
                        .generate_document(ticket.analysis(), ticket.title())
                        .await;
                    Completion::Drafted(ticket, result)
                }));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn reset_document(&mut self) {
        self.documents.reset();
    }

    pub fn reveal_card(&mut self) -> bool {
        self.practice.reveal()
    }

    pub fn advance_card(&mut self) -> Option<Advance> {
        self.practice.advance()
    }

    /// The card under the cursor, if practice is ready.
    pub fn current_card(&self) -> Option<&PracticeCard> {
        self.practice.session().map(|s| s.current())
    }

    /// Export the ready draft into `dir`. `None` when no draft is ready.
    pub fn export_draft(&self, dir: &Path) -> Result<Option<PathBuf>, SessionError> {
        match self.documents.state().draft() {
            Some(draft) => Ok(Some(export::export_draft(draft, dir)?)),
            None => Ok(None),
        }
    }

    // ── Event loop ──

    /// Wait for the next outstanding call to finish and apply it. Stale
    /// replies are skipped. `None` once nothing is pending.
    ///
    /// Cancel-safe: dropping the future loses no replies.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        while let Some(completion) = self.pending.next().await {
            if let Some(event) = self.apply(completion) {
                return Some(event);
            }
        }
        None
    }

    /// Drive every outstanding call, including ones queued along the way.
    pub async fn settle(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.next_event().await {
            events.push(event);
        }
        events
    }

    fn apply(&mut self, completion: Completion) -> Option<SessionEvent> {
        let outcome = match completion {
            Completion::Analyzed(ticket, result) => match self.store.complete(ticket, result) {
                Ok(analysis) => {
                    self.on_analysis_replaced();
                    Ok(SessionEvent::AnalysisReady(analysis))
                }
                Err(SessionError::Service(e)) => Ok(SessionEvent::AnalysisFailed(e)),
                Err(e) => Err(e),
            },
            Completion::Suggested(ticket, result) => self
                .suggestions
                .complete(ticket, result)
                .map(|count| SessionEvent::SuggestionsSettled { count }),
            Completion::Drafted(ticket, result) => {
                let title = ticket.title().to_string();
                match self.documents.complete(ticket, result) {
                    Ok(draft) => Ok(SessionEvent::DraftReady(draft)),
                    Err(SessionError::Service(error)) => {
                        Ok(SessionEvent::DraftFailed { title, error })
                    }
                    Err(e) => Err(e),
                }
            }
            Completion::Carded(ticket, result) => {
                self.practice
                    .complete(ticket, result)
                    .map(|state| match state {
                        PracticeState::Ready(session) => SessionEvent::PracticeReady {
                            cards: session.cards().len(),
                        },
                        _ => SessionEvent::PracticeEmpty,
                    })
            }
        };

        match outcome {
            Ok(event) => Some(event),
            Err(e) => {
                debug!(error = %e, "reply discarded");
                None
            }
        }
    }

    /// Notify each dependent of the new analysis; each decides for itself
    /// whether to fetch.
    fn on_analysis_replaced(&mut self) {
        info!("analysis replaced; refreshing derived state");
        self.suggestions.invalidate();
        self.documents.reset();
        self.ensure_suggestions();

        let current = self.store.current();
        if let Some(ticket) = self.practice.on_analysis(current.as_ref()) {
            let gateway = Arc::clone(&self.gateway);
            self.pending.push(Box::pin(async move {
                let result = gateway.generate_practice_cards(ticket.analysis()).await;
                Completion::Carded(ticket, result)
            }));
        }
    }
}
