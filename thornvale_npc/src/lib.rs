#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

//! Conversational finite-state-machine engine for Thornvale NPCs.
//!
//! Quest scripts register [`Transition`]s into a [`TransitionTable`] at world
//! load; during play an [`Engine`] normalizes each player utterance into a
//! [`Sentence`], picks the best-matching transition for the holder's current
//! [`ConversationState`], runs its [`ChatAction`], and commits the next state.

pub const THORNVALE_NPC_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod action;
pub mod condition;
pub mod engine;
pub mod error;
pub mod npc;
pub mod parser;
pub mod state;
pub mod transition;

pub use action::ChatAction;
pub use condition::ChatCondition;
pub use engine::{Engine, StepOutcome};
pub use error::{ActionError, RegistrationError};
pub use npc::Npc;
pub use parser::{Sentence, Token, TokenKind, parse};
pub use state::{ConversationState, StatePattern};
pub use transition::{Transition, TransitionTable, TriggerPattern};
