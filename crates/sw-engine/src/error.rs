//! Error types for the session engine.

use sw_core::CoreError;
use thiserror::Error;

/// Alias for `Result<T, EngineError>`.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that escape the controller.
///
/// Invalid user input and narrator faults are handled inside the controller
/// and become replies; what surfaces here signals a programming defect, and
/// the affected session is forcibly ended before it is returned.
#[derive(Debug, Error)]
pub enum EngineError {
    /// An internal invariant was breached.
    #[error("state violation: {0}")]
    StateViolation(String),

    /// Core session state rejected a transition.
    #[error(transparent)]
    Core(#[from] CoreError),
}
