//! Input normalization for entry commands and chapter choices.
//!
//! Pure functions of the raw reply text; no session state is touched here,
//! and case sensitivity is never observable to the caller.

use sw_core::ChoiceLetter;
use thiserror::Error;

/// Validation failures for raw user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The entry reply was neither `start` nor `custom`.
    #[error("not an entry command: {0:?}")]
    InvalidEntry(String),

    /// The chapter reply was not one of A, B, C, D.
    #[error("not a choice letter: {0:?}")]
    InvalidChoice(String),
}

/// Entry-phase commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryCommand {
    /// Begin a randomly seeded journey.
    Start,
    /// Supply a custom scene and character first.
    Custom,
}

/// Parse an entry-phase reply.
///
/// Matching is case-insensitive after trimming surrounding whitespace;
/// anything else, including empty input, is rejected.
pub fn parse_entry(input: &str) -> Result<EntryCommand, InputError> {
    match input.trim().to_lowercase().as_str() {
        "start" => Ok(EntryCommand::Start),
        "custom" => Ok(EntryCommand::Custom),
        other => Err(InputError::InvalidEntry(other.to_string())),
    }
}

/// Parse a chapter-choice reply into a letter.
pub fn parse_choice(input: &str) -> Result<ChoiceLetter, InputError> {
    ChoiceLetter::parse(input).map_err(|_| InputError::InvalidChoice(input.trim().to_string()))
}
