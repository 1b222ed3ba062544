//! Error types for the dialogue engine.
//!
//! Unmatched input is *not* an error -- see
//! [`StepOutcome::Unmatched`](crate::StepOutcome) -- and normalization cannot
//! fail at all. What remains: bad registrations caught at load time, and
//! action effects failing against live world state.

use thiserror::Error;

use crate::state::StatePattern;

/// A transition rejected at registration time.
///
/// Raised by [`TransitionTable::add`](crate::TransitionTable::add) so a
/// broken quest script aborts its own loader instead of surfacing as
/// nondeterminism during live matching.
#[derive(Debug, Error, PartialEq)]
pub enum RegistrationError {
    #[error("conflicting transition for state {state:?} on trigger '{trigger}': no discriminating condition")]
    ConflictingTransition { state: StatePattern, trigger: String },
}

/// An action effect that failed against current world state.
///
/// Content defects, not engine defects: the engine commits the transition's
/// next state and propagates these to the caller.
#[derive(Debug, Error, PartialEq)]
pub enum ActionError {
    #[error("player does not carry {amount} x '{item}'")]
    MissingItem { item: String, amount: u32 },
    #[error("action effect failed: {0}")]
    Effect(String),
}
