//! Document generation controller.
//!
//! ## States
//!
//! IDLE → GENERATING → READY | FAILED
//!
//! Selecting a different title (or the same title after a failure) re-enters
//! GENERATING and clears the previous draft. Only the reply for the latest
//! selection request is applied.

use std::fmt;
use std::sync::Arc;

use lawzy_core::{CaseAnalysis, DocumentDraft, Endpoint};
use lawzy_gateway::ServiceError;
use tracing::{info, warn};

use crate::error::{SessionError, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftState {
    Idle,
    Generating { title: String },
    Ready(DocumentDraft),
    Failed { title: String, reason: String },
}

impl DraftState {
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Generating { title } | Self::Failed { title, .. } => Some(title),
            Self::Ready(draft) => Some(&draft.title),
        }
    }

    pub fn draft(&self) -> Option<&DocumentDraft> {
        match self {
            Self::Ready(draft) => Some(draft),
            _ => None,
        }
    }

    pub fn is_generating(&self) -> bool {
        matches!(self, Self::Generating { .. })
    }
}

impl fmt::Display for DraftState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "IDLE",
            Self::Generating { .. } => "GENERATING",
            Self::Ready(_) => "READY",
            Self::Failed { .. } => "FAILED",
        };
        f.write_str(s)
    }
}

/// One outstanding generate request.
#[derive(Debug)]
pub struct DraftTicket {
    request: u64,
    title: String,
    analysis: Arc<CaseAnalysis>,
}

impl DraftTicket {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn analysis(&self) -> &Arc<CaseAnalysis> {
        &self.analysis
    }
}

#[derive(Debug)]
pub struct DocumentController {
    state: DraftState,
    history: Vec<String>,
    request: u64,
}

impl Default for DocumentController {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentController {
    pub fn new() -> Self {
        Self {
            state: DraftState::Idle,
            history: Vec::new(),
            request: 0,
        }
    }

    pub fn state(&self) -> &DraftState {
        &self.state
    }

    /// Every title selected so far, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Start generating `title` for the current analysis.
    ///
    /// Returns `None` when `title` is already generating or ready.
    pub fn select(
        &mut self,
        current: Option<&Arc<CaseAnalysis>>,
        title: &str,
    ) -> Result<Option<DraftTicket>, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::BlankTitle);
        }
        let analysis = current.ok_or(ValidationError::NoAnalysis)?;

        let unchanged = self.state.title() == Some(title)
            && matches!(self.state, DraftState::Generating { .. } | DraftState::Ready(_));
        if unchanged {
            return Ok(None);
        }

        self.request += 1;
        self.history.push(title.to_string());
        self.state = DraftState::Generating {
            title: title.to_string(),
        };
        info!(title, request = self.request, "generating draft");
        Ok(Some(DraftTicket {
            request: self.request,
            title: title.to_string(),
            analysis: Arc::clone(analysis),
        }))
    }

    /// Apply the generate reply for `ticket`.
    pub fn complete(
        &mut self,
        ticket: DraftTicket,
        result: Result<String, ServiceError>,
    ) -> Result<DocumentDraft, SessionError> {
        if ticket.request != self.request || !self.state.is_generating() {
            return Err(SessionError::StaleResponse {
                endpoint: Endpoint::GenerateDocument,
            });
        }
        match result {
            Ok(content) => {
                info!(title = %ticket.title, chars = content.len(), "draft ready");
                let draft = DocumentDraft {
                    title: ticket.title,
                    content,
                };
                self.state = DraftState::Ready(draft.clone());
                Ok(draft)
            }
            Err(e) => {
                warn!(title = %ticket.title, error = %e, "draft generation failed");
                self.state = DraftState::Failed {
                    title: ticket.title,
                    reason: e.to_string(),
                };
                Err(e.into())
            }
        }
    }

    /// Back to IDLE, dropping the selection and content. Outstanding replies
    /// become stale.
    pub fn reset(&mut self) {
        self.request += 1;
        self.state = DraftState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{failure, sample_analysis};

    fn analysis() -> Arc<CaseAnalysis> {
        Arc::new(sample_analysis("threat"))
    }

    #[test]
    fn select_requires_title_and_analysis() {
        let mut docs = DocumentController::new();
        let a = analysis();
        assert_eq!(docs.select(Some(&a), "  ").unwrap_err(), ValidationError::BlankTitle);
        assert_eq!(docs.select(None, "Legal Notice").unwrap_err(), ValidationError::NoAnalysis);
        assert_eq!(docs.state(), &DraftState::Idle);
    }

    #[test]
    fn select_then_ready() {
        let mut docs = DocumentController::new();
        let a = analysis();
        let ticket = docs.select(Some(&a), "Legal Notice").unwrap().unwrap();
        assert_eq!(docs.state().to_string(), "GENERATING");

        let draft = docs.complete(ticket, Ok("Notice body".into())).unwrap();
        assert_eq!(draft.title, "Legal Notice");
        assert_eq!(draft.content, "Notice body");
        assert_eq!(docs.state().to_string(), "READY");
    }

    #[test]
    fn reselecting_same_title_is_a_no_op() {
        let mut docs = DocumentController::new();
        let a = analysis();
        let ticket = docs.select(Some(&a), "Legal Notice").unwrap().unwrap();
        assert!(docs.select(Some(&a), "Legal Notice").unwrap().is_none());
        docs.complete(ticket, Ok("body".into())).unwrap();
        assert!(docs.select(Some(&a), "Legal Notice").unwrap().is_none());
        assert_eq!(docs.history(), ["Legal Notice"]);
    }

    #[test]
    fn retry_after_failure_reaches_ready() {
        let mut docs = DocumentController::new();
        let a = analysis();
        let ticket = docs.select(Some(&a), "Affidavit").unwrap().unwrap();
        let err = docs
            .complete(ticket, Err(failure(Endpoint::GenerateDocument)))
            .unwrap_err();
        assert!(matches!(err, SessionError::Service(_)));
        assert!(matches!(docs.state(), DraftState::Failed { title, .. } if title == "Affidavit"));
        assert!(docs.state().draft().is_none());

        let retry = docs.select(Some(&a), "Affidavit").unwrap().unwrap();
        assert!(docs.state().is_generating());
        let draft = docs.complete(retry, Ok("Sworn statement".into())).unwrap();
        assert_eq!(draft.content, "Sworn statement");
        assert_eq!(docs.history(), ["Affidavit", "Affidavit"]);
    }

    #[test]
    fn switching_title_discards_earlier_reply() {
        let mut docs = DocumentController::new();
        let a = analysis();
        let first = docs.select(Some(&a), "Police Complaint").unwrap().unwrap();
        let second = docs.select(Some(&a), "Legal Notice").unwrap().unwrap();

        assert!(docs.complete(first, Ok("complaint".into())).unwrap_err().is_stale());
        assert!(docs.state().is_generating());
        let draft = docs.complete(second, Ok("notice".into())).unwrap();
        assert_eq!(draft.title, "Legal Notice");
        assert_eq!(docs.history(), ["Police Complaint", "Legal Notice"]);
    }

    #[test]
    fn reset_clears_selection_and_orphans_reply() {
        let mut docs = DocumentController::new();
        let a = analysis();
        let ticket = docs.select(Some(&a), "Legal Notice").unwrap().unwrap();
        docs.reset();
        assert_eq!(docs.state(), &DraftState::Idle);
        assert!(docs.complete(ticket, Ok("late".into())).unwrap_err().is_stale());
        assert_eq!(docs.state(), &DraftState::Idle);
        assert_eq!(docs.history().len(), 1);
    }
}
