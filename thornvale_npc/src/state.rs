//! Conversation states for the NPC dialogue state machine.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The state an NPC conversation holds between player utterances.
///
/// Every conversation holder occupies exactly one of these at all times;
/// [`Idle`](ConversationState::Idle) is both the initial state and the one a
/// conversation returns to when the player says goodbye.
#[derive(Copy, Clone, Debug, Default, variantly::Variantly, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConversationState {
    /// Not engaged with any player.
    #[default]
    Idle,
    /// Engaged and listening for the next request.
    Attending,
    /// Waiting on the player's answer to a question the NPC asked.
    Question,
    /// Performing a service (healing, ferrying, repairs).
    Service,
    /// Quoted a purchase price and awaiting confirmation.
    BuyPriceOffered,
    /// Quoted a sale price and awaiting confirmation.
    SellPriceOffered,
}

impl Display for ConversationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversationState::Idle => write!(f, "Idle"),
            ConversationState::Attending => write!(f, "Attending"),
            ConversationState::Question => write!(f, "Question"),
            ConversationState::Service => write!(f, "Service"),
            ConversationState::BuyPriceOffered => write!(f, "BuyPriceOffered"),
            ConversationState::SellPriceOffered => write!(f, "SellPriceOffered"),
        }
    }
}

/// Source-state selector in a transition definition.
///
/// `Any` exists only in transition matching; an engine never *holds* `Any`,
/// so a wildcard state is unrepresentable outside the table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatePattern {
    Exact(ConversationState),
    Any,
}

impl StatePattern {
    pub fn matches(&self, state: ConversationState) -> bool {
        match self {
            StatePattern::Exact(wanted) => *wanted == state,
            StatePattern::Any => true,
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, StatePattern::Exact(_))
    }
}

impl From<ConversationState> for StatePattern {
    fn from(state: ConversationState) -> Self {
        StatePattern::Exact(state)
    }
}
