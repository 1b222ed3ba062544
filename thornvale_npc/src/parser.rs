//! Sentence normalizer.
//!
//! Converts raw chat text into a canonical token sequence that conditions and
//! the transition table can match against. Normalization never fails: unknown
//! words come through as opaque object tokens, and empty input produces an
//! empty [`Sentence`] that can only satisfy ANY-trigger transitions.

use serde::{Deserialize, Serialize};

/// Trigger verbs the dialogue grammar recognizes directly.
const VERBS: &[&str] = &[
    "hi", "bye", "yes", "no", "task", "help", "job", "offer", "buy", "sell", "done", "stop",
];

/// Words carrying no matching weight, dropped during normalization.
const FILLERS: &[&str] = &["a", "an", "the", "please", "me", "to", "you"];

/// Lexical role of a normalized token.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// A recognized trigger verb ("hi", "buy", ...).
    Verb,
    /// Anything else: item names, NPC names, unknown words.
    Object,
    /// A bare number, e.g. the `5` in "buy 5 torches".
    Amount,
}

/// One normalized word with its lexical role.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
}

/// Normalized, immutable representation of one player utterance.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sentence {
    tokens: Vec<Token>,
}

impl Sentence {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The token the transition table matches triggers against: the first
    /// verb if the sentence has one, otherwise the first token of any kind.
    pub fn primary_token(&self) -> Option<&str> {
        self.tokens
            .iter()
            .find(|t| t.kind == TokenKind::Verb)
            .or_else(|| self.tokens.first())
            .map(|t| t.text.as_str())
    }

    /// True if any token equals the canonical form of `word`.
    pub fn contains(&self, word: &str) -> bool {
        let wanted = canonical_word(&word.to_lowercase()).to_string();
        self.tokens.iter().any(|t| t.text == wanted)
    }

    /// First object token, if any -- "icecream" in "buy icecream".
    pub fn object(&self) -> Option<&str> {
        self.tokens
            .iter()
            .find(|t| t.kind == TokenKind::Object)
            .map(|t| t.text.as_str())
    }

    /// First numeric token, if any.
    pub fn amount(&self) -> Option<u32> {
        self.tokens
            .iter()
            .find(|t| t.kind == TokenKind::Amount)
            .and_then(|t| t.text.parse().ok())
    }

    /// The sentence rendered back to canonical text. Re-parsing this yields
    /// an equal sentence.
    pub fn canonical_text(&self) -> String {
        self.tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Map known synonyms and greetings onto their canonical trigger word.
/// Canonical words map to themselves.
pub(crate) fn canonical_word(word: &str) -> &str {
    match word {
        "hello" | "hallo" | "hey" | "greetings" => "hi",
        "goodbye" | "farewell" | "cya" => "bye",
        "ok" | "okay" | "yeah" | "sure" => "yes",
        "nope" => "no",
        "quest" | "favor" | "favour" => "task",
        "purchase" => "buy",
        "complete" | "finished" => "done",
        other => other,
    }
}

/// Normalize one raw chat line into a [`Sentence`].
///
/// Lower-cases, splits on whitespace and punctuation, drops filler words,
/// maps synonyms onto canonical trigger words, and tags each surviving token
/// by lexical role. Never fails.
pub fn parse(raw: &str) -> Sentence {
    let mut tokens = Vec::new();
    for word in raw.split(|c: char| !c.is_alphanumeric()) {
        let lower = word.to_lowercase();
        if lower.is_empty() || FILLERS.contains(&lower.as_str()) {
            continue;
        }
        let text = canonical_word(&lower).to_string();
        let kind = if text.chars().all(|c| c.is_ascii_digit()) {
            TokenKind::Amount
        } else if VERBS.contains(&text.as_str()) {
            TokenKind::Verb
        } else {
            TokenKind::Object
        };
        tokens.push(Token { text, kind });
    }
    Sentence { tokens }
}
