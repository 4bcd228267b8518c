//! The session controller: consumes one inbound event at a time, advances
//! session state, and produces exactly one outbound reply per event.

use tracing::{debug, error, warn};

use sw_core::{Category, CustomSetup, DEFAULT_TOTAL_CHAPTERS, Phase, Session};

use crate::error::{EngineError, EngineResult};
use crate::generate::{GeneratedChapter, Narrator, NarratorError};
use crate::input::{self, EntryCommand};
use crate::render;
use crate::request::NarrativeRequest;

/// Fixed user-visible message strings.
pub mod messages {
    /// Greeting shown when a session is created.
    pub const WELCOME: &str = "Welcome, wanderer. Reply 'start' for a random journey or 'custom' \
                               to set your own scene.";

    /// Farewell after an unrecognized entry reply.
    pub const FAREWELL: &str = "You can return anytime to begin your soul journey. Reply 'start' \
                                or 'custom' whenever you are ready.";

    /// Prompt for the custom scene and character.
    pub const SETUP_PROMPT: &str = "Tell me the scene and character you want. For example: \
                                    'scene: a mysterious library, character: a scholar searching \
                                    for answers'.";

    /// Corrective for an empty custom setup.
    pub const SETUP_EMPTY: &str = "The setup cannot be empty. Describe a scene and a character \
                                   to begin.";

    /// Notice after repeated generation failures.
    pub const GENERATION_FAILED: &str = "The story could not be continued right now. This \
                                         journey has ended; please start a new one later.";

    /// Response to any input after the session ended.
    pub const CONCLUDED: &str = "This session has already concluded. Start a new one to journey \
                                 again.";

    /// Corrective prompt for an invalid chapter choice.
    pub fn invalid_choice(raw: &str) -> String {
        format!(
            "'{}' is not one of the offered paths. Reply with A, B, C or D to decide your next \
             step.",
            raw.trim()
        )
    }
}

/// Tunable knobs the controller depends on.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Chapters per session before the ending.
    pub total_chapters: u32,
    /// Additional attempts after a failed narrator call.
    pub retries: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            total_chapters: DEFAULT_TOTAL_CHAPTERS,
            retries: 1,
        }
    }
}

/// One outbound message, produced per processed event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Chapter prose with its four options.
    Chapter(String),
    /// Prompt asking for the custom scene and character.
    SetupPrompt(String),
    /// Corrective prompt after invalid input; the session is unchanged.
    Corrective(String),
    /// Farewell after an unrecognized entry reply; the session has ended.
    Farewell(String),
    /// Ending prose plus the final soul-profile analysis.
    Analysis {
        /// The full outbound text.
        text: String,
        /// The computed category.
        category: Category,
    },
    /// The narrator failed repeatedly; the session has ended.
    GenerationFailed(String),
    /// The session had already concluded before this event.
    Concluded(String),
}

impl Reply {
    /// The outbound message text.
    pub fn text(&self) -> &str {
        match self {
            Self::Chapter(text)
            | Self::SetupPrompt(text)
            | Self::Corrective(text)
            | Self::Farewell(text)
            | Self::GenerationFailed(text)
            | Self::Concluded(text) => text,
            Self::Analysis { text, .. } => text,
        }
    }
}

/// Drives sessions through the entry, chapter, and ending phases.
pub struct Controller<N: Narrator> {
    narrator: N,
    config: EngineConfig,
}

impl<N: Narrator> Controller<N> {
    /// Create a controller over a narrator backend.
    pub fn new(narrator: N, config: EngineConfig) -> Self {
        Self { narrator, config }
    }

    /// Create a session sized to this controller's configuration.
    pub fn new_session(&self) -> Session {
        Session::new(self.config.total_chapters)
    }

    /// Process one inbound message for the session.
    pub async fn handle(&self, session: &mut Session, input: &str) -> EngineResult<Reply> {
        match session.phase() {
            Phase::AwaitingEntry => self.handle_entry(session, input).await,
            Phase::AwaitingCustomSetup => self.handle_setup(session, input).await,
            Phase::AwaitingChoice => self.handle_choice(session, input).await,
            Phase::Ended => Ok(Reply::Concluded(messages::CONCLUDED.to_string())),
        }
    }

    /// Force a session to its end without a final choice or classification.
    ///
    /// Hook for transport-side idle timeouts.
    pub fn abandon(&self, session: &mut Session) {
        if session.phase() != Phase::Ended {
            debug!(id = %session.id(), "session abandoned");
            session.end();
        }
    }

    async fn handle_entry(&self, session: &mut Session, input: &str) -> EngineResult<Reply> {
        match input::parse_entry(input) {
            Ok(EntryCommand::Start) => {
                session.choose_random()?;
                self.open_chapter(session).await
            }
            Ok(EntryCommand::Custom) => {
                session.request_custom_setup()?;
                Ok(Reply::SetupPrompt(messages::SETUP_PROMPT.to_string()))
            }
            Err(e) => {
                debug!(id = %session.id(), %e, "unrecognized entry reply, ending session");
                session.end();
                Ok(Reply::Farewell(messages::FAREWELL.to_string()))
            }
        }
    }

    async fn handle_setup(&self, session: &mut Session, input: &str) -> EngineResult<Reply> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Reply::Corrective(messages::SETUP_EMPTY.to_string()));
        }
        session.store_custom_setup(CustomSetup::parse(trimmed))?;
        self.open_chapter(session).await
    }

    async fn handle_choice(&self, session: &mut Session, input: &str) -> EngineResult<Reply> {
        let letter = match input::parse_choice(input) {
            Ok(letter) => letter,
            Err(_) => return Ok(Reply::Corrective(messages::invalid_choice(input))),
        };

        let record = session.record_choice(letter)?;
        debug!(
            id = %session.id(),
            chapter = record.chapter,
            letter = %record.letter,
            category = %record.category,
            "choice recorded"
        );

        if session.is_complete() {
            self.close_out(session).await
        } else {
            self.open_chapter(session).await
        }
    }

    /// Request, validate, and deliver the next chapter.
    async fn open_chapter(&self, session: &mut Session) -> EngineResult<Reply> {
        let request = NarrativeRequest::chapter(session);
        let generated = match self.generate_checked(&request).await {
            Ok(generated) => generated,
            Err(e) => return Ok(self.fail_generation(session, &e)),
        };
        let options = generated.options.clone().ok_or_else(|| {
            EngineError::StateViolation("validated chapter carries no options".to_string())
        })?;
        let text = render::chapter(&generated.prose, &options);
        session.deliver_chapter(options)?;
        Ok(Reply::Chapter(text))
    }

    /// Request the ending, classify, and conclude the session.
    async fn close_out(&self, session: &mut Session) -> EngineResult<Reply> {
        let request = NarrativeRequest::ending(session);
        let ending = match self.generate_checked(&request).await {
            Ok(generated) => generated,
            Err(e) => return Ok(self.fail_generation(session, &e)),
        };

        let category = match sw_core::classify(session.history()) {
            Ok(category) => category,
            Err(e) => {
                error!(id = %session.id(), %e, "classification impossible, ending session");
                session.end();
                return Err(EngineError::StateViolation(format!(
                    "classification failed: {e}"
                )));
            }
        };

        let text = render::analysis(&ending.prose, category, session.tally());
        session.finish(category)?;
        debug!(id = %session.id(), %category, "session classified");
        Ok(Reply::Analysis { text, category })
    }

    /// Call the narrator with the retry-then-fail policy.
    async fn generate_checked(
        &self,
        request: &NarrativeRequest,
    ) -> Result<GeneratedChapter, NarratorError> {
        let mut last = None;
        for attempt in 0..=self.config.retries {
            match self.narrator.generate(request).await {
                Ok(generated) => match generated.validate(request.is_ending) {
                    Ok(()) => return Ok(generated),
                    Err(e) => {
                        warn!(attempt, %e, "narrator response failed validation");
                        last = Some(e);
                    }
                },
                Err(e) => {
                    warn!(attempt, %e, "narrator call failed");
                    last = Some(e);
                }
            }
        }
        Err(last.unwrap_or_else(|| NarratorError::Request("no attempts made".to_string())))
    }

    fn fail_generation(&self, session: &mut Session, fault: &NarratorError) -> Reply {
        error!(id = %session.id(), %fault, "generation failed after retry, ending session");
        session.end();
        Reply::GenerationFailed(messages::GENERATION_FAILED.to_string())
    }
}
