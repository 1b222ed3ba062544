//! Conversation engine -- one finite-state machine per NPC dialogue session.
//!
//! The engine owns the holder's current [`ConversationState`] and a shared
//! handle to the script's read-only [`TransitionTable`]. `step` is the only
//! mutation path and processes one utterance synchronously; callers serialize
//! turns per holder (one world-tick thread, or a per-holder lock).

use std::sync::Arc;

use log::{error, info};
use serde::{Deserialize, Serialize};

use thornvale_world::Player;

use crate::error::ActionError;
use crate::npc::Npc;
use crate::parser::parse;
use crate::state::ConversationState;
use crate::transition::TransitionTable;

const DEFAULT_FALLBACK: &str = "Sorry, I did not understand you.";

/// What a single `step` did, as seen by the calling session layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    /// A transition fired and `to` was committed.
    Transitioned {
        from: ConversationState,
        to: ConversationState,
    },
    /// No transition qualified; state is unchanged. Normal traffic, not an
    /// error -- the fallback line was spoken if the NPC was attending.
    Unmatched,
}

/// The dialogue state machine driving one conversation holder.
#[derive(Clone, Debug)]
pub struct Engine {
    state: ConversationState,
    table: Arc<TransitionTable>,
    fallback: String,
}

impl Engine {
    /// Create an engine in the initial `Idle` state over a shared table.
    pub fn new(table: Arc<TransitionTable>) -> Self {
        Self {
            state: ConversationState::Idle,
            table,
            fallback: DEFAULT_FALLBACK.into(),
        }
    }

    /// Replace the "not understood" line spoken on unmatched input.
    #[must_use]
    pub fn with_fallback(mut self, text: impl Into<String>) -> Self {
        self.fallback = text.into();
        self
    }

    pub fn current_state(&self) -> ConversationState {
        self.state
    }

    /// Process one player utterance.
    ///
    /// Normalizes `raw`, asks the table for the best-matching transition,
    /// runs its action (an action-requested [`SetState`](crate::ChatAction)
    /// override beats the table's static `next_state`), and commits the
    /// resolved state. Unmatched input leaves the state untouched; an idle
    /// NPC ignores it silently, an engaged one speaks the fallback line.
    ///
    /// # Errors
    /// - [`ActionError`] when the transition's action fails. The declared
    ///   next state is committed anyway; the failure is a content defect
    ///   surfaced to the caller and the log, never a corrupted machine.
    pub fn step(&mut self, player: &mut Player, npc: &mut Npc, raw: &str) -> Result<StepOutcome, ActionError> {
        let sentence = parse(raw);
        // hold the table through a local handle so the matched transition
        // does not pin `self` while the new state is committed
        let table = Arc::clone(&self.table);
        let Some(transition) = table.find_match(self.state, &sentence, player, npc) else {
            if !self.state.is_idle() {
                npc.say(self.fallback.clone());
            }
            return Ok(StepOutcome::Unmatched);
        };

        let from = self.state;
        let declared = transition.next_state;
        let result = match &transition.action {
            Some(action) => action.apply(player, &sentence, npc),
            None => Ok(None),
        };
        let to = match result {
            Ok(Some(requested)) => requested,
            Ok(None) => declared,
            Err(err) => {
                // commit-then-report policy: content failures never leave
                // the machine stuck between states
                self.state = declared;
                error!("{}: action failed stepping {from} -> {declared}: {err}", npc.name);
                return Err(err);
            },
        };
        self.state = to;
        info!(
            "{}: entered state {to} from {from} via '{}'",
            npc.name,
            sentence.canonical_text()
        );
        Ok(StepOutcome::Transitioned { from, to })
    }
}
