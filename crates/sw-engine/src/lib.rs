//! Session orchestration for Seelenwanderer.
//!
//! The engine turns raw user replies into session transitions and outbound
//! messages. It normalizes input, builds narrator requests with enough prior
//! context for continuity, validates what comes back, and classifies the
//! finished journey. The narrator itself is a trait seam; backends live in
//! `sw-narrator`.

/// Session controller and reply types.
pub mod controller;
/// Engine error types.
pub mod error;
/// Generated chapter schema and the narrator seam.
pub mod generate;
/// Input normalization.
pub mod input;
/// Outbound text rendering.
pub mod render;
/// Narrator request payloads.
pub mod request;
/// Concurrent session registry.
pub mod store;

/// Session controller.
pub use controller::{Controller, EngineConfig, Reply, messages};
/// Engine error and result types.
pub use error::{EngineError, EngineResult};
/// Narrator seam and response schema.
pub use generate::{GeneratedChapter, Narrator, NarratorError};
/// Entry and choice parsing.
pub use input::{EntryCommand, InputError, parse_choice, parse_entry};
/// Narrator request payloads.
pub use request::{ChoiceSummary, NarrativeRequest};
/// Session registry types.
pub use store::{SessionHandle, SessionStore};
