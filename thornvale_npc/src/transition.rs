//! Transition table -- the data-driven heart of NPC dialogue.
//!
//! Quest scripts register [`Transition`]s at world load; during play the
//! table is read-only and shared between every holder using the same script,
//! so concurrent matching needs no locking.

use log::debug;
use serde::{Deserialize, Serialize};

use thornvale_world::Player;

use crate::action::ChatAction;
use crate::condition::ChatCondition;
use crate::error::RegistrationError;
use crate::npc::Npc;
use crate::parser::{Sentence, canonical_word};
use crate::state::{ConversationState, StatePattern};

/// Trigger selector in a transition definition.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerPattern {
    /// Matches when the sentence's primary token is one of these phrases.
    Phrases(Vec<String>),
    /// Matches any sentence, including an empty one.
    Any,
}

impl TriggerPattern {
    /// Build a phrase trigger, normalizing each word the same way the
    /// sentence parser does so registration and matching agree.
    pub fn phrases<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::Phrases(
            words
                .into_iter()
                .map(|w| canonical_word(&w.as_ref().to_lowercase()).to_string())
                .collect(),
        )
    }

    pub fn matches(&self, sentence: &Sentence) -> bool {
        match self {
            Self::Any => true,
            Self::Phrases(phrases) => sentence
                .primary_token()
                .is_some_and(|token| phrases.iter().any(|p| p == token)),
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, Self::Phrases(_))
    }

    /// True when the patterns collide within the same specificity tier:
    /// phrase sets sharing a word, or two ANY triggers. A phrase trigger and
    /// an ANY trigger never collide -- precedence already orders them.
    fn overlaps(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Phrases(a), Self::Phrases(b)) => a.iter().any(|p| b.contains(p)),
            (Self::Any, Self::Any) => true,
            _ => false,
        }
    }
}

impl From<&str> for TriggerPattern {
    fn from(word: &str) -> Self {
        Self::phrases([word])
    }
}

/// One dialogue rule: in `state`, on `trigger`, if `condition` holds, run
/// `action` and move to `next_state`. Immutable once registered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub state: StatePattern,
    pub trigger: TriggerPattern,
    pub condition: Option<ChatCondition>,
    pub action: Option<ChatAction>,
    pub next_state: ConversationState,
}

impl Transition {
    /// Specificity tier for tie-breaking, lower = more specific:
    /// exact state + exact trigger + condition, then without condition,
    /// then exact state + ANY trigger, ANY state + exact trigger, and
    /// finally ANY + ANY.
    fn specificity(&self) -> u8 {
        match (self.state.is_exact(), self.trigger.is_exact(), self.condition.is_some()) {
            (true, true, true) => 0,
            (true, true, false) => 1,
            (true, false, _) => 2,
            (false, true, _) => 3,
            (false, false, _) => 4,
        }
    }
}

/// Ordered collection of the transitions registered for one dialogue script.
///
/// Insertion order is significant: within a specificity tier the
/// earliest-registered transition wins, so the table is an ordered structure,
/// never a sorted or hashed one.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TransitionTable {
    transitions: Vec<Transition>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Register a transition.
    ///
    /// # Errors
    /// - [`RegistrationError::ConflictingTransition`] when an existing
    ///   transition covers the same state and an overlapping trigger with a
    ///   structurally equal guard (or both have none): the pair could never
    ///   be told apart at match time, so the loader fails fast instead.
    pub fn add(
        &mut self,
        state: impl Into<StatePattern>,
        trigger: TriggerPattern,
        condition: Option<ChatCondition>,
        action: Option<ChatAction>,
        next_state: ConversationState,
    ) -> Result<(), RegistrationError> {
        let transition = Transition {
            state: state.into(),
            trigger,
            condition,
            action,
            next_state,
        };
        if let Some(existing) = self.transitions.iter().find(|t| {
            t.state == transition.state
                && t.trigger.overlaps(&transition.trigger)
                && t.condition == transition.condition
        }) {
            let trigger = match &existing.trigger {
                TriggerPattern::Phrases(p) => p.join("|"),
                TriggerPattern::Any => "*".to_string(),
            };
            return Err(RegistrationError::ConflictingTransition {
                state: existing.state,
                trigger,
            });
        }
        self.transitions.push(transition);
        Ok(())
    }

    /// Select the best transition for the current state and sentence.
    ///
    /// Candidates must match the held state (or be ANY-state), contain the
    /// sentence's primary token (or be ANY-trigger), and pass their guard
    /// condition if they carry one. Ties break by specificity tier, then by
    /// registration order. Returns `None` when nothing qualifies -- a normal
    /// outcome, handled by the engine's fallback.
    pub fn find_match(
        &self,
        current: ConversationState,
        sentence: &Sentence,
        player: &Player,
        npc: &Npc,
    ) -> Option<&Transition> {
        let mut best: Option<(&Transition, u8)> = None;
        for transition in &self.transitions {
            if !transition.state.matches(current) || !transition.trigger.matches(sentence) {
                continue;
            }
            if let Some(condition) = &transition.condition {
                if !condition.fire(player, sentence, npc) {
                    continue;
                }
            }
            let tier = transition.specificity();
            // strict < keeps the earliest registration within a tier
            if best.is_none_or(|(_, best_tier)| tier < best_tier) {
                best = Some((transition, tier));
            }
        }
        if best.is_none() {
            debug!("no transition for state {current} on '{}'", sentence.canonical_text());
        }
        best.map(|(transition, _)| transition)
    }

    /// Register the standard greeting: Idle --hi--> Attending, saying `text`.
    ///
    /// # Errors
    /// - on a conflicting prior registration
    pub fn add_greeting(&mut self, text: &str) -> Result<(), RegistrationError> {
        self.add(
            ConversationState::Idle,
            TriggerPattern::from("hi"),
            None,
            Some(ChatAction::Say(text.into())),
            ConversationState::Attending,
        )
    }

    /// Register the standard farewell: any state --bye--> Idle, saying `text`.
    ///
    /// # Errors
    /// - on a conflicting prior registration
    pub fn add_goodbye(&mut self, text: &str) -> Result<(), RegistrationError> {
        self.add(
            StatePattern::Any,
            TriggerPattern::from("bye"),
            None,
            Some(ChatAction::Say(text.into())),
            ConversationState::Idle,
        )
    }

    /// Register a static reply while attending: Attending --trigger--> Attending.
    ///
    /// # Errors
    /// - on a conflicting prior registration
    pub fn add_reply<I, S>(&mut self, triggers: I, text: &str) -> Result<(), RegistrationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.add(
            ConversationState::Attending,
            TriggerPattern::phrases(triggers),
            None,
            Some(ChatAction::Say(text.into())),
            ConversationState::Attending,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use ConversationState::{Attending, Idle, Question};

    fn fixtures() -> (Player, Npc) {
        (Player::new("tester"), Npc::new("Wren"))
    }

    fn say(text: &str) -> Option<ChatAction> {
        Some(ChatAction::Say(text.into()))
    }

    #[test]
    fn match_respects_state_and_trigger() {
        let (player, npc) = fixtures();
        let mut table = TransitionTable::new();
        table.add_greeting("Hello.").unwrap();
        table.add_reply(["job"], "I pick berries.").unwrap();

        let hit = table
            .find_match(Idle, &parse("hi"), &player, &npc)
            .expect("greeting should match");
        assert_eq!(hit.next_state, Attending);

        // wrong state: "job" is registered from Attending only
        assert!(table.find_match(Idle, &parse("job"), &player, &npc).is_none());
        // wrong trigger
        assert!(table.find_match(Attending, &parse("dance"), &player, &npc).is_none());
    }

    #[test]
    fn match_is_sound_over_wildcards() {
        let (player, npc) = fixtures();
        let mut table = TransitionTable::new();
        table.add_goodbye("Bye.").unwrap();
        table
            .add(StatePattern::Any, TriggerPattern::Any, None, say("Hmm?"), Attending)
            .unwrap();

        for state in [Idle, Attending, Question] {
            let hit = table
                .find_match(state, &parse("bye"), &player, &npc)
                .expect("wildcard-state goodbye matches everywhere");
            assert_eq!(hit.next_state, Idle);
        }
        // empty sentence can only reach the ANY-trigger entry
        let hit = table
            .find_match(Attending, &parse(""), &player, &npc)
            .expect("ANY/ANY should match empty input");
        assert_eq!(hit.trigger, TriggerPattern::Any);
    }

    #[test]
    fn guard_conditions_filter_candidates() {
        let (mut player, npc) = fixtures();
        let mut table = TransitionTable::new();
        table
            .add(
                Attending,
                TriggerPattern::from("task"),
                Some(ChatCondition::QuestNotStarted("berry_errand".into())),
                say("Fetch me berries?"),
                Question,
            )
            .unwrap();
        table
            .add(
                Attending,
                TriggerPattern::from("task"),
                Some(ChatCondition::QuestInState {
                    slot: "berry_errand".into(),
                    value: "start".into(),
                }),
                say("Where are my berries?"),
                Attending,
            )
            .unwrap();

        let sentence = parse("task");
        let offer = table.find_match(Attending, &sentence, &player, &npc).unwrap();
        assert_eq!(offer.action, say("Fetch me berries?"));

        player.set_quest("berry_errand", "start");
        let nag = table.find_match(Attending, &sentence, &player, &npc).unwrap();
        assert_eq!(nag.action, say("Where are my berries?"));
    }

    #[test]
    fn precedence_tiers_order_conflicting_matches() {
        let (mut player, npc) = fixtures();
        player.set_quest("berry_errand", "start");
        let mut table = TransitionTable::new();
        // registered least-specific first to prove order within the scan
        // does not trump specificity
        table
            .add(StatePattern::Any, TriggerPattern::Any, None, say("any/any"), Attending)
            .unwrap();
        table
            .add(StatePattern::Any, TriggerPattern::from("task"), None, say("any/exact"), Attending)
            .unwrap();
        table
            .add(Attending, TriggerPattern::Any, None, say("exact/any"), Attending)
            .unwrap();
        table
            .add(Attending, TriggerPattern::from("task"), None, say("exact/exact"), Attending)
            .unwrap();
        table
            .add(
                Attending,
                TriggerPattern::from("task"),
                Some(ChatCondition::QuestStarted("berry_errand".into())),
                say("exact/exact/guarded"),
                Attending,
            )
            .unwrap();

        let sentence = parse("task");
        // knock out tiers one by one from the most specific end
        let mut tiers = vec![
            "exact/exact/guarded",
            "exact/exact",
            "exact/any",
            "any/exact",
            "any/any",
        ];
        while let Some(expected) = tiers.first().copied() {
            let hit = table.find_match(Attending, &sentence, &player, &npc).unwrap();
            assert_eq!(hit.action, say(expected));
            let winner = hit.clone();
            table.transitions.retain(|t| *t != winner);
            tiers.remove(0);
        }
        assert!(table.find_match(Attending, &sentence, &player, &npc).is_none());
    }

    #[test]
    fn earliest_registration_wins_within_a_tier() {
        let (mut player, npc) = fixtures();
        player.set_quest("berry_errand", "start");
        let mut table = TransitionTable::new();
        // same tier (exact state, exact trigger, guarded), different guards
        table
            .add(
                Attending,
                TriggerPattern::from("task"),
                Some(ChatCondition::QuestStarted("berry_errand".into())),
                say("first"),
                Attending,
            )
            .unwrap();
        table
            .add(
                Attending,
                TriggerPattern::from("task"),
                Some(ChatCondition::QuestActive("berry_errand".into())),
                say("second"),
                Attending,
            )
            .unwrap();
        let hit = table.find_match(Attending, &parse("task"), &player, &npc).unwrap();
        assert_eq!(hit.action, say("first"));
    }

    #[test]
    fn triggers_normalize_like_the_parser() {
        let (player, npc) = fixtures();
        let mut table = TransitionTable::new();
        // registered with a synonym and mixed case; matched via canonical "hi"
        table
            .add(Idle, TriggerPattern::phrases(["Hello"]), None, say("Hi."), Attending)
            .unwrap();
        assert!(table.find_match(Idle, &parse("hey"), &player, &npc).is_some());
    }

    #[test]
    fn conflicting_registration_fails_fast() {
        let mut table = TransitionTable::new();
        table.add_greeting("Hello.").unwrap();
        let dup = table.add_greeting("Hello again.");
        assert!(matches!(dup, Err(RegistrationError::ConflictingTransition { .. })));
        // same shape but discriminated by a guard is fine
        table
            .add(
                Idle,
                TriggerPattern::from("hi"),
                Some(ChatCondition::QuestCompleted("berry_errand".into())),
                say("Welcome back, friend."),
                Attending,
            )
            .unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn table_round_trips_through_serde() {
        let (player, npc) = fixtures();
        let mut table = TransitionTable::new();
        table.add_greeting("Hello.").unwrap();
        table
            .add(
                Attending,
                TriggerPattern::from("task"),
                Some(ChatCondition::QuestNotStarted("berry_errand".into())),
                say("Fetch me berries?"),
                Question,
            )
            .unwrap();
        let json = serde_json::to_string(&table).expect("table serializes");
        let restored: TransitionTable = serde_json::from_str(&json).expect("table deserializes");
        assert_eq!(restored.len(), table.len());
        let hit = restored
            .find_match(Attending, &parse("task"), &player, &npc)
            .expect("restored table still matches");
        assert_eq!(hit.next_state, Question);
    }

    #[test]
    fn overlapping_phrase_sets_conflict() {
        let mut table = TransitionTable::new();
        table.add_reply(["help", "job"], "I pick berries.").unwrap();
        let dup = table.add_reply(["job", "offer"], "Berries again.");
        assert!(matches!(dup, Err(RegistrationError::ConflictingTransition { .. })));
    }
}
