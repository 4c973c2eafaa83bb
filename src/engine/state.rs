//! Invocation state machine.
//!
//! State transitions:
//! ```text
//! VALIDATING → INVOKING → UNWRAPPING → RESOLVED
//!      │           │           │
//!      └───────────┴───────────┴────→ FAILED(kind)
//! ```
//! `RESOLVED` and `FAILED` are terminal. There is no path back out of
//! `FAILED`: a caller who wants another attempt starts a new invocation.

use crate::types::ErrorKind;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvocationState {
    Validating,
    Invoking,
    Unwrapping,
    Resolved,
    Failed(ErrorKind),
}

impl InvocationState {
    pub fn is_terminal(self) -> bool {
        matches!(self, InvocationState::Resolved | InvocationState::Failed(_))
    }

    pub fn can_transition_to(self, to: InvocationState) -> bool {
        match (self, to) {
            (InvocationState::Validating, InvocationState::Invoking) => true,
            (InvocationState::Invoking, InvocationState::Unwrapping) => true,
            (InvocationState::Unwrapping, InvocationState::Resolved) => true,
            (from, InvocationState::Failed(_)) => !from.is_terminal(),
            _ => false,
        }
    }
}

/// Tracks one invocation's progress and the states it passed through.
#[derive(Debug, Clone)]
pub struct StateTrace {
    current: InvocationState,
    history: Vec<InvocationState>,
}

impl StateTrace {
    pub fn start() -> Self {
        Self {
            current: InvocationState::Validating,
            history: vec![InvocationState::Validating],
        }
    }

    pub fn current(&self) -> InvocationState {
        self.current
    }

    pub fn history(&self) -> &[InvocationState] {
        &self.history
    }

    /// Move to `next`. Invalid transitions are logged and ignored.
    pub fn advance(&mut self, next: InvocationState) -> bool {
        if !self.current.can_transition_to(next) {
            tracing::error!(
                "invalid invocation transition: {:?} -> {:?}",
                self.current,
                next
            );
            return false;
        }
        tracing::debug!(from = ?self.current, to = ?next, "invocation_transition");
        self.current = next;
        self.history.push(next);
        true
    }

    pub fn fail(&mut self, kind: ErrorKind) -> bool {
        self.advance(InvocationState::Failed(kind))
    }

    pub fn into_history(self) -> Vec<InvocationState> {
        self.history
    }
}
