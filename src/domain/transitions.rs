//! Step transition logic
//!
//! Pure functions that move a session between steps. Illegal requests are
//! ignored: the caller keeps its current snapshot.

use crate::schemas::{Session, Step};

use super::steps::{get_next_step, get_previous_step};

/// Result of a transition attempt
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionResult {
    /// The transition applied
    Applied {
        /// Snapshot on the new step
        next_session: Session,
    },
    /// The request was not legal from the current step
    Ignored {
        /// Why nothing happened
        reason: String,
    },
}

impl TransitionResult {
    pub fn is_applied(&self) -> bool {
        matches!(self, TransitionResult::Applied { .. })
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, TransitionResult::Ignored { .. })
    }

    /// Get the next session if the transition applied
    pub fn session(self) -> Option<Session> {
        match self {
            TransitionResult::Applied { next_session } => Some(next_session),
            TransitionResult::Ignored { .. } => None,
        }
    }

    /// The new snapshot, or a copy of `current` when the request was ignored
    pub fn session_or(self, current: &Session) -> Session {
        match self {
            TransitionResult::Applied { next_session } => next_session,
            TransitionResult::Ignored { reason } => {
                tracing::debug!(step = %current.current_step, %reason, "transition ignored");
                current.clone()
            }
        }
    }
}

/// Move forward after `from` completed.
///
/// Ignored when `from` is not the current step or has no successor.
pub fn apply_advance(session: &Session, from: Step) -> TransitionResult {
    if session.current_step != from {
        return TransitionResult::Ignored {
            reason: format!(
                "cannot advance from {}: session is on {}",
                from, session.current_step
            ),
        };
    }

    let next_step = match get_next_step(from) {
        Some(step) => step,
        None => {
            return TransitionResult::Ignored {
                reason: format!("cannot advance from terminal step: {}", from),
            };
        }
    };

    TransitionResult::Applied {
        next_session: session.clone().with_step(next_step),
    }
}

/// Move one step back, keeping every entered value.
pub fn apply_go_back(session: &Session) -> TransitionResult {
    match get_previous_step(session.current_step) {
        Some(previous) => TransitionResult::Applied {
            next_session: session.clone().with_step(previous),
        },
        None => TransitionResult::Ignored {
            reason: format!("no step before {}", session.current_step),
        },
    }
}

/// Initial snapshot for the next worker: login step, no user, no record, no sections.
pub fn reset() -> Session {
    Session::new()
}
