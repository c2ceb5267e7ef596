//! Suggestion cache and prefetch coordinator.
//!
//! Fetches the document suggestions for the current analysis as soon as it is
//! stored, at most once per analysis instance. The in-flight flag is set when
//! the ticket is issued, before any network call is queued, so repeated
//! evaluation while a fetch is outstanding issues nothing.

use std::sync::Arc;

use lawzy_core::{CaseAnalysis, Endpoint, Suggestion};
use lawzy_gateway::ServiceError;
use tracing::{debug, warn};

use crate::error::SessionError;

/// Issued once per analysis instance; carries the instance being fetched for.
#[derive(Debug)]
pub struct PrefetchTicket {
    analysis: Arc<CaseAnalysis>,
}

impl PrefetchTicket {
    pub fn analysis(&self) -> &Arc<CaseAnalysis> {
        &self.analysis
    }
}

#[derive(Debug, Default)]
pub struct SuggestionCache {
    keyed_to: Option<Arc<CaseAnalysis>>,
    suggestions: Vec<Suggestion>,
    in_flight: bool,
    /// A result (possibly empty after a failure) is recorded for `keyed_to`.
    settled: bool,
}

impl SuggestionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    /// True only while a fetch is outstanding. Empty and not loading means
    /// "no suggestions".
    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Drop everything derived from the previous analysis.
    pub fn invalidate(&mut self) {
        *self = Self::default();
    }

    /// Decide whether a fetch should start for `current`.
    ///
    /// Returns a ticket only when an analysis is present, nothing is recorded
    /// for that exact instance, and no fetch for it is in flight.
    pub fn evaluate(&mut self, current: Option<&Arc<CaseAnalysis>>) -> Option<PrefetchTicket> {
        let analysis = current?;
        let same_instance = self
            .keyed_to
            .as_ref()
            .is_some_and(|k| Arc::ptr_eq(k, analysis));
        if !same_instance {
            self.invalidate();
            self.keyed_to = Some(Arc::clone(analysis));
        }
        if self.settled || self.in_flight {
            return None;
        }
        self.in_flight = true;
        debug!("suggestion prefetch started");
        Some(PrefetchTicket {
            analysis: Arc::clone(analysis),
        })
    }

    /// Record the outcome of the fetch behind `ticket`.
    ///
    /// Failures are logged and settle to an empty list. Returns the number of
    /// suggestions now cached.
    pub fn complete(
        &mut self,
        ticket: PrefetchTicket,
        result: Result<Vec<Suggestion>, ServiceError>,
    ) -> Result<usize, SessionError> {
        let matches = self
            .keyed_to
            .as_ref()
            .is_some_and(|k| Arc::ptr_eq(k, &ticket.analysis));
        if !matches || !self.in_flight {
            return Err(SessionError::StaleResponse {
                endpoint: Endpoint::SuggestDocuments,
            });
        }

        self.in_flight = false;
        self.settled = true;
        match result {
            Ok(suggestions) => {
                debug!(count = suggestions.len(), "suggestions cached");
                self.suggestions = suggestions;
            }
            Err(e) => {
                warn!(error = %e, "suggestion prefetch failed; continuing without suggestions");
                self.suggestions.clear();
            }
        }
        Ok(self.suggestions.len())
    }
}
