//! Generated chapter schema, shape validation, and the narrator seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use sw_core::{ChapterOption, ChoiceLetter};

use crate::request::NarrativeRequest;

/// Faults in a narrator call or its response.
#[derive(Debug, Error)]
pub enum NarratorError {
    /// The call itself failed: transport, timeout, or service error.
    #[error("narrator request failed: {0}")]
    Request(String),

    /// The response arrived but did not match the expected shape.
    #[error("malformed narrator response: {0}")]
    Malformed(String),
}

/// One generated narrative unit: prose plus, for mid-story chapters, the
/// four labeled options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedChapter {
    /// Chapter prose.
    pub prose: String,
    /// The four options; absent for the ending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<ChapterOption>>,
}

impl GeneratedChapter {
    /// Validate the response shape against what was requested.
    ///
    /// Mid-story chapters must carry exactly one option per letter A-D, each
    /// with non-empty text; the ending must carry none. Category tags were
    /// already checked against the fixed enum during deserialization.
    pub fn validate(&self, is_ending: bool) -> Result<(), NarratorError> {
        if self.prose.trim().is_empty() {
            return Err(NarratorError::Malformed("empty prose".to_string()));
        }
        match (&self.options, is_ending) {
            (None, true) => Ok(()),
            (Some(_), true) => Err(NarratorError::Malformed(
                "ending must not carry options".to_string(),
            )),
            (None, false) => Err(NarratorError::Malformed(
                "chapter arrived without options".to_string(),
            )),
            (Some(options), false) => {
                if options.len() != ChoiceLetter::ALL.len() {
                    return Err(NarratorError::Malformed(format!(
                        "expected {} options, got {}",
                        ChoiceLetter::ALL.len(),
                        options.len()
                    )));
                }
                for letter in ChoiceLetter::ALL {
                    let found = options.iter().filter(|o| o.letter == letter).count();
                    if found != 1 {
                        return Err(NarratorError::Malformed(format!(
                            "option {letter} appears {found} times"
                        )));
                    }
                }
                if let Some(blank) = options.iter().find(|o| o.text.trim().is_empty()) {
                    return Err(NarratorError::Malformed(format!(
                        "option {} has empty text",
                        blank.letter
                    )));
                }
                Ok(())
            }
        }
    }
}

/// The external text-generation collaborator.
#[async_trait]
pub trait Narrator: Send + Sync {
    /// Generate one chapter, or the ending, for the given context.
    async fn generate(&self, request: &NarrativeRequest)
    -> Result<GeneratedChapter, NarratorError>;
}
