//! Analysis session store: the single source of truth for the current case.
//!
//! Renderers observe the stored value through a `watch` channel; only the
//! store writes it, and only with a complete analysis.

use std::sync::Arc;

use lawzy_core::{CaseAnalysis, Endpoint};
use lawzy_gateway::ServiceError;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::{SessionError, ValidationError};

pub type SharedAnalysis = Option<Arc<CaseAnalysis>>;

/// Proof that an analyze request was issued, ordered by submission.
#[derive(Debug)]
pub struct AnalyzeTicket {
    seq: u64,
    query: String,
}

impl AnalyzeTicket {
    pub fn query(&self) -> &str {
        &self.query
    }
}

pub struct AnalysisStore {
    current: watch::Sender<SharedAnalysis>,
    issued: u64,
    applied: u64,
}

impl Default for AnalysisStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisStore {
    pub fn new() -> Self {
        let (current, _) = watch::channel(None);
        Self {
            current,
            issued: 0,
            applied: 0,
        }
    }

    pub fn current(&self) -> SharedAnalysis {
        self.current.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SharedAnalysis> {
        self.current.subscribe()
    }

    /// Whether `analysis` is the instance currently stored.
    pub fn is_current(&self, analysis: &Arc<CaseAnalysis>) -> bool {
        self.current
            .borrow()
            .as_ref()
            .is_some_and(|c| Arc::ptr_eq(c, analysis))
    }

    /// Validate `query` and issue a ticket for the analyze call.
    pub fn begin(&mut self, query: &str) -> Result<AnalyzeTicket, ValidationError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ValidationError::BlankQuery);
        }
        self.issued += 1;
        debug!(seq = self.issued, "analysis requested");
        Ok(AnalyzeTicket {
            seq: self.issued,
            query: query.to_string(),
        })
    }

    /// Apply the analyze result for `ticket`.
    ///
    /// Success replaces the stored analysis wholesale and returns it. Failure
    /// leaves the store untouched. A reply older than one already applied is
    /// stale, whatever its outcome.
    pub fn complete(
        &mut self,
        ticket: AnalyzeTicket,
        result: Result<CaseAnalysis, ServiceError>,
    ) -> Result<Arc<CaseAnalysis>, SessionError> {
        if ticket.seq < self.applied {
            return Err(SessionError::StaleResponse {
                endpoint: Endpoint::Analyze,
            });
        }
        match result {
            Ok(analysis) => {
                let analysis = Arc::new(analysis);
                self.applied = ticket.seq;
                self.current.send_replace(Some(Arc::clone(&analysis)));
                info!(seq = ticket.seq, "analysis stored");
                Ok(analysis)
            }
            Err(e) => {
                warn!(seq = ticket.seq, error = %e, "analysis failed");
                Err(e.into())
            }
        }
    }
}
