use crate::choice::ChoiceLetter;
use crate::session::Phase;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when manipulating session state.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A transition was attempted from a phase that does not allow it.
    #[error("invalid transition from {0:?}")]
    InvalidTransition(Phase),

    /// The session has ended and accepts no further mutation.
    #[error("session has ended")]
    SessionEnded,

    /// A choice was already recorded for this chapter.
    #[error("chapter {0} already has a recorded choice")]
    DuplicateChapter(u32),

    /// A choice was recorded past the configured chapter count.
    #[error("chapter {index} exceeds the configured total of {total}")]
    ChapterOverflow {
        /// The chapter index the choice would have answered.
        index: u32,
        /// The configured chapter count.
        total: u32,
    },

    /// The delivered chapter carries no option with this letter.
    #[error("no delivered option with letter {0}")]
    MissingOption(ChoiceLetter),

    /// The classifier was invoked on an empty choice history.
    #[error("cannot classify an empty choice history")]
    EmptyHistory,

    /// A string was not one of the four choice letters.
    #[error("not a choice letter: {0:?}")]
    InvalidLetter(String),

    /// A string was not one of the four known categories.
    #[error("unknown category: {0:?}")]
    UnknownCategory(String),
}
