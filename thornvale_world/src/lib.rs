//! Shared world-facing data model for Thornvale.
//!
//! The dialogue engine reads and mutates player state through the types in
//! this crate; the rest of the server (zones, sessions, persistence) layers
//! its own concerns on top.

pub mod player;

pub use player::Player;
