//! NPC conversation holder.

use log::info;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The stateful side of an NPC dialogue session.
///
/// Holds the NPC's identity and the transcript of lines it has spoken; the
/// most recent line is what scripted tests (and the chat transport) observe.
/// The conversation state itself lives in the [`Engine`](crate::Engine) that
/// drives this holder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Npc {
    pub id: Uuid,
    pub name: String,
    transcript: Vec<String>,
}

impl Npc {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            transcript: Vec::new(),
        }
    }

    /// Utter a line of dialogue.
    pub fn say(&mut self, line: impl Into<String>) {
        let line = line.into();
        info!("{} says: {line}", self.name);
        self.transcript.push(line);
    }

    /// Most recently uttered line, if the NPC has spoken at all.
    pub fn latest_text(&self) -> Option<&str> {
        self.transcript.last().map(String::as_str)
    }

    /// Every line uttered so far, oldest first.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }
}
