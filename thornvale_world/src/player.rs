//! Player -- the actor on whose behalf dialogue conditions and actions run.

use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Quest slot value conventionally used when a quest has been finished.
pub const QUEST_DONE: &str = "done";

/// A connected player character.
///
/// Quest progress is tracked in free-form string slots (`name -> value`),
/// with `"start"`, `"rejected"` and [`QUEST_DONE`] as the usual values.
/// Items are counted stacks keyed by item name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub quests: HashMap<String, String>,
    pub inventory: HashMap<String, u32>,
    pub karma: f64,
    pub xp: u64,
    pub level: u32,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            quests: HashMap::new(),
            inventory: HashMap::new(),
            karma: 0.0,
            xp: 0,
            level: 1,
        }
    }

    /// Current value of a quest slot, if the quest has been started at all.
    pub fn quest(&self, slot: &str) -> Option<&str> {
        self.quests.get(slot).map(String::as_str)
    }

    pub fn set_quest(&mut self, slot: &str, value: &str) {
        info!("{}: quest slot '{slot}' set to '{value}'", self.name);
        self.quests.insert(slot.to_string(), value.to_string());
    }

    pub fn has_quest(&self, slot: &str) -> bool {
        self.quests.contains_key(slot)
    }

    /// True when the slot exists and holds exactly `value`.
    /// Quest values like `"eating;1219676807283"` carry a `;`-separated
    /// payload after the state word; only the first segment is compared.
    pub fn quest_in_state(&self, slot: &str, value: &str) -> bool {
        self.quest(slot)
            .is_some_and(|v| v.split(';').next() == Some(value))
    }

    pub fn quest_completed(&self, slot: &str) -> bool {
        self.quest_in_state(slot, QUEST_DONE)
    }

    /// Number of a named item currently carried.
    pub fn equipped_count(&self, item: &str) -> u32 {
        self.inventory.get(item).copied().unwrap_or(0)
    }

    pub fn is_equipped(&self, item: &str) -> bool {
        self.equipped_count(item) > 0
    }

    /// Add `amount` of an item to the player's stacks.
    pub fn equip(&mut self, item: &str, amount: u32) {
        *self.inventory.entry(item.to_string()).or_insert(0) += amount;
    }

    /// Remove `amount` of an item. Returns false (and removes nothing) if
    /// the player carries fewer than `amount`.
    pub fn drop_item(&mut self, item: &str, amount: u32) -> bool {
        match self.inventory.get_mut(item) {
            Some(held) if *held >= amount => {
                *held -= amount;
                if *held == 0 {
                    self.inventory.remove(item);
                }
                true
            },
            _ => false,
        }
    }

    pub fn add_xp(&mut self, amount: u64) {
        self.xp += amount;
        info!("{} earns {amount} experience points", self.name);
    }

    pub fn add_karma(&mut self, amount: f64) {
        self.karma += amount;
    }
}
