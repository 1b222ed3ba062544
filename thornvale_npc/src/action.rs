//! `ChatAction` -- side effects fired when a transition is taken.
//!
//! Actions mutate player state and speak through the NPC. An action may also
//! request a state override via [`ChatAction::SetState`], which beats the
//! transition's static `next_state` when data-dependent branching is needed.
//! Failures are content defects and propagate as [`ActionError`]; the engine
//! decides what happens to the pending state change.

use log::debug;
use serde::{Deserialize, Serialize};

use thornvale_world::Player;

use crate::error::ActionError;
use crate::npc::Npc;
use crate::parser::Sentence;
use crate::state::ConversationState;

/// Effects a transition can fire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChatAction {
    /// NPC utters a line.
    Say(String),
    /// Write a quest slot on the player.
    SetQuestSlot { slot: String, value: String },
    /// Add items to the player's inventory.
    GrantItem { item: String, amount: u32 },
    /// Remove items from the player's inventory; fails if not carried.
    TakeItem { item: String, amount: u32 },
    /// Award experience points.
    GrantXp(u64),
    /// Adjust karma up or down.
    ModifyKarma(f64),
    /// Request a next state different from the transition's static one.
    SetState(ConversationState),
    /// Run several effects in order; the last state override wins.
    All(Vec<ChatAction>),
}

impl ChatAction {
    /// Execute this effect against the player and conversation holder.
    ///
    /// Returns the state override requested by the action, if any.
    ///
    /// # Errors
    /// - [`ActionError::MissingItem`] when a `TakeItem` exceeds what the
    ///   player carries; earlier effects in an `All` sequence stay applied.
    pub fn apply(
        &self,
        player: &mut Player,
        sentence: &Sentence,
        npc: &mut Npc,
    ) -> Result<Option<ConversationState>, ActionError> {
        debug!("└─ action: {self:?}");
        match self {
            Self::Say(text) => {
                npc.say(text.clone());
                Ok(None)
            },
            Self::SetQuestSlot { slot, value } => {
                player.set_quest(slot, value);
                Ok(None)
            },
            Self::GrantItem { item, amount } => {
                player.equip(item, *amount);
                Ok(None)
            },
            Self::TakeItem { item, amount } => {
                if player.drop_item(item, *amount) {
                    Ok(None)
                } else {
                    Err(ActionError::MissingItem {
                        item: item.clone(),
                        amount: *amount,
                    })
                }
            },
            Self::GrantXp(amount) => {
                player.add_xp(*amount);
                Ok(None)
            },
            Self::ModifyKarma(amount) => {
                player.add_karma(*amount);
                Ok(None)
            },
            Self::SetState(state) => Ok(Some(*state)),
            Self::All(effects) => {
                let mut requested = None;
                for effect in effects {
                    if let Some(state) = effect.apply(player, sentence, npc)? {
                        requested = Some(state);
                    }
                }
                Ok(requested)
            },
        }
    }
}
