//! Interrogation practice controller.
//!
//! ## States
//!
//! EMPTY → LOADING → READY | EMPTY
//!
//! A failed fetch still reaches READY, with a single fallback card, so the
//! practice flow never blocks on the backend.

use std::sync::Arc;

use lawzy_core::{CaseAnalysis, Difficulty, Endpoint, PracticeCard};
use lawzy_gateway::ServiceError;
use tracing::{debug, warn};

use crate::error::SessionError;

pub const FALLBACK_CATEGORY: &str = "Consistency";
pub const FALLBACK_QUESTION: &str = "Sample Question: Describe the sequence of events again.";
pub const FALLBACK_DIFFICULTY: u8 = 3;
pub const FALLBACK_PURPOSE: &str = "Testing for narrative contradictions.";

/// The card shown when the backend cannot produce any.
pub fn fallback_card() -> PracticeCard {
    PracticeCard {
        category: FALLBACK_CATEGORY.to_string(),
        question: FALLBACK_QUESTION.to_string(),
        difficulty: Difficulty::new(FALLBACK_DIFFICULTY),
        purpose: FALLBACK_PURPOSE.to_string(),
    }
}

/// Result of [`PracticeSession::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the card at this index.
    Moved(usize),
    /// Already on the last card; the briefing is over.
    Complete,
}

/// A non-empty card sequence with a cursor and a per-card reveal flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeSession {
    cards: Vec<PracticeCard>,
    cursor: usize,
    revealed: bool,
}

impl PracticeSession {
    /// `None` for an empty card list.
    pub fn new(cards: Vec<PracticeCard>) -> Option<Self> {
        if cards.is_empty() {
            return None;
        }
        Some(Self {
            cards,
            cursor: 0,
            revealed: false,
        })
    }

    pub fn cards(&self) -> &[PracticeCard] {
        &self.cards
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> &PracticeCard {
        &self.cards[self.cursor]
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn is_last(&self) -> bool {
        self.cursor + 1 == self.cards.len()
    }

    /// One-based position and total, as in "Phase 2 of 10".
    pub fn progress(&self) -> (usize, usize) {
        (self.cursor + 1, self.cards.len())
    }

    pub fn reveal(&mut self) {
        self.revealed = true;
    }

    /// Move to the next card. On the last card the cursor stays put.
    pub fn advance(&mut self) -> Advance {
        self.revealed = false;
        if self.is_last() {
            return Advance::Complete;
        }
        self.cursor += 1;
        Advance::Moved(self.cursor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PracticeState {
    Empty,
    Loading,
    Ready(PracticeSession),
}

#[derive(Debug)]
pub struct PracticeTicket {
    analysis: Arc<CaseAnalysis>,
}

impl PracticeTicket {
    pub fn analysis(&self) -> &Arc<CaseAnalysis> {
        &self.analysis
    }
}

#[derive(Debug)]
pub struct PracticeController {
    state: PracticeState,
    keyed_to: Option<Arc<CaseAnalysis>>,
}

impl Default for PracticeController {
    fn default() -> Self {
        Self::new()
    }
}

impl PracticeController {
    pub fn new() -> Self {
        Self {
            state: PracticeState::Empty,
            keyed_to: None,
        }
    }

    pub fn state(&self) -> &PracticeState {
        &self.state
    }

    pub fn session(&self) -> Option<&PracticeSession> {
        match &self.state {
            PracticeState::Ready(session) => Some(session),
            _ => None,
        }
    }

    /// React to the stored analysis changing. Returns a ticket when cards
    /// should be fetched for a new instance.
    pub fn on_analysis(&mut self, current: Option<&Arc<CaseAnalysis>>) -> Option<PracticeTicket> {
        let Some(analysis) = current else {
            self.keyed_to = None;
            self.state = PracticeState::Empty;
            return None;
        };
        if self.keyed_to.as_ref().is_some_and(|k| Arc::ptr_eq(k, analysis)) {
            return None;
        }
        self.keyed_to = Some(Arc::clone(analysis));
        self.state = PracticeState::Loading;
        debug!("practice cards requested");
        Some(PracticeTicket {
            analysis: Arc::clone(analysis),
        })
    }

    /// Apply the fetched cards. Failures fall back to a single card.
    pub fn complete(
        &mut self,
        ticket: PracticeTicket,
        result: Result<Vec<PracticeCard>, ServiceError>,
    ) -> Result<&PracticeState, SessionError> {
        let matches = self
            .keyed_to
            .as_ref()
            .is_some_and(|k| Arc::ptr_eq(k, &ticket.analysis));
        if !matches || self.state != PracticeState::Loading {
            return Err(SessionError::StaleResponse {
                endpoint: Endpoint::PracticeCards,
            });
        }

        let cards = match result {
            Ok(cards) => cards,
            Err(e) => {
                warn!(error = %e, "practice cards unavailable; using fallback card");
                vec![fallback_card()]
            }
        };
        self.state = match PracticeSession::new(cards) {
            Some(session) => PracticeState::Ready(session),
            None => PracticeState::Empty,
        };
        Ok(&self.state)
    }

    /// `None` unless READY.
    pub fn advance(&mut self) -> Option<Advance> {
        match &mut self.state {
            PracticeState::Ready(session) => Some(session.advance()),
            _ => None,
        }
    }

    /// Returns whether a card was revealed.
    pub fn reveal(&mut self) -> bool {
        match &mut self.state {
            PracticeState::Ready(session) => {
                session.reveal();
                true
            }
            _ => false,
        }
    }
}
