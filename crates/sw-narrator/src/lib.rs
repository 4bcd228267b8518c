//! Narrator backends for Seelenwanderer.
//!
//! [`OllamaNarrator`] generates chapters through a local Ollama instance;
//! [`ScriptedNarrator`] serves canned chapters for offline play and tests.

/// Ollama-backed narrator.
pub mod client;
/// Random story seed elements.
pub mod elements;
/// Prompt construction.
pub mod prompt;
/// Scripted offline narrator.
pub mod script;

/// Ollama narrator and its defaults.
pub use client::{DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS, DEFAULT_URL, OllamaNarrator};
/// Random seed elements.
pub use elements::StoryElements;
/// Scripted narrator.
pub use script::ScriptedNarrator;
