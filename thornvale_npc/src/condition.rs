//! `ChatCondition` -- guard predicates on dialogue transitions.
//!
//! Conditions are evaluated against the (player, sentence, holder) triple and
//! must stay side-effect free: the matcher may probe them repeatedly and
//! speculatively while selecting a transition. Composition uses the
//! `Not`/`And`/`Or` variants rather than trait objects so that equality and
//! hashing stay structural over the whole condition graph.

use serde::{Deserialize, Serialize};

use thornvale_world::Player;

use crate::npc::Npc;
use crate::parser::Sentence;

/// Boolean predicates a transition can be guarded by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChatCondition {
    /// The quest slot exists with any value.
    QuestStarted(String),
    /// The quest slot has never been set.
    QuestNotStarted(String),
    /// The quest slot's state word is `"done"`.
    QuestCompleted(String),
    /// The quest slot's state word equals `value` exactly.
    QuestInState { slot: String, value: String },
    /// The quest slot exists but is not yet `"done"`.
    QuestActive(String),
    /// Player carries at least `amount` of the named item.
    HasItem { item: String, amount: u32 },
    /// Player carries none of the named item.
    MissingItem(String),
    /// Player level is `min` or higher.
    LevelAtLeast(u32),
    /// The sentence mentions the canonical form of `word`.
    SentenceContains(String),
    /// The sentence carries a numeric amount token.
    SentenceHasAmount,
    Not(Box<ChatCondition>),
    And(Vec<ChatCondition>),
    Or(Vec<ChatCondition>),
}

impl ChatCondition {
    /// Evaluate this condition. Pure: reads player/world state and the
    /// sentence, mutates nothing.
    pub fn fire(&self, player: &Player, sentence: &Sentence, npc: &Npc) -> bool {
        match self {
            Self::QuestStarted(slot) => player.has_quest(slot),
            Self::QuestNotStarted(slot) => !player.has_quest(slot),
            Self::QuestCompleted(slot) => player.quest_completed(slot),
            Self::QuestInState { slot, value } => player.quest_in_state(slot, value),
            Self::QuestActive(slot) => player.has_quest(slot) && !player.quest_completed(slot),
            Self::HasItem { item, amount } => player.equipped_count(item) >= *amount,
            Self::MissingItem(item) => !player.is_equipped(item),
            Self::LevelAtLeast(min) => player.level >= *min,
            Self::SentenceContains(word) => sentence.contains(word),
            Self::SentenceHasAmount => sentence.amount().is_some(),
            Self::Not(inner) => !inner.fire(player, sentence, npc),
            Self::And(all) => all.iter().all(|c| c.fire(player, sentence, npc)),
            Self::Or(any) => any.iter().any(|c| c.fire(player, sentence, npc)),
        }
    }
}
