//! Core types for Seelenwanderer: choices, categories, session state, and
//! the soul-profile classifier.
//!
//! This crate defines the data model the session engine drives. It is
//! independent of any transport or generation backend — you can construct a
//! [`Session`] programmatically and replay choices against it.

/// Choice letters, behavioral categories, and chapter options.
pub mod choice;
/// Final soul-profile classification.
pub mod classify;
/// Error types used throughout the crate.
pub mod error;
/// Archival snapshot of a finished session.
pub mod record;
/// Session state and lifecycle.
pub mod session;
/// Running per-category choice counts.
pub mod tally;

/// Re-export choice types.
pub use choice::{Category, ChapterOption, ChoiceLetter, ChoiceRecord};
/// Re-export the classifier.
pub use classify::classify;
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export the archival snapshot.
pub use record::SessionRecord;
/// Re-export session types.
pub use session::{
    CustomSetup, DEFAULT_TOTAL_CHAPTERS, Phase, Session, SessionId, StoryMode,
};
/// Re-export the tally.
pub use tally::CategoryTally;
