//! Session orchestration: one authoritative analysis and the views derived from it.
//!
//! The store publishes the current analysis; the suggestion prefetch, document
//! drafting, and interrogation practice controllers each react to it. The
//! [`Session`] drives their gateway calls and applies replies in order.

pub mod documents;
pub mod error;
pub mod export;
pub mod practice;
pub mod prefetch;
pub mod session;
pub mod smoother;
pub mod store;

#[cfg(test)]
mod testing;

pub use documents::{DocumentController, DraftState};
pub use error::{SessionError, ValidationError};
pub use practice::{Advance, PracticeController, PracticeSession, PracticeState, fallback_card};
pub use prefetch::SuggestionCache;
pub use session::{Session, SessionEvent};
pub use smoother::{Clock, LoadingSmoother, StatusRotation, SystemClock};
pub use store::AnalysisStore;
