//! Session state for one user's end-to-end playthrough.
//!
//! A [`Session`] is mutated only through its transition methods, which
//! enforce the phase rules and the history invariants: no two records share
//! a chapter index, the tally always matches the history, and an ended
//! session accepts nothing further.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::choice::{Category, ChapterOption, ChoiceLetter, ChoiceRecord};
use crate::error::{CoreError, CoreResult};
use crate::tally::CategoryTally;

/// Default number of story chapters before the ending.
pub const DEFAULT_TOTAL_CHAPTERS: u32 = 5;

/// Unique identifier for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generate a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Where a session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for the user to pick a random or custom journey.
    AwaitingEntry,
    /// Waiting for the free-form scene and character setup.
    AwaitingCustomSetup,
    /// A chapter has been delivered; waiting for an A-D reply.
    AwaitingChoice,
    /// The session has concluded and accepts no further input.
    Ended,
}

/// How the opening chapter is seeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryMode {
    /// Seeded from random story elements.
    Random,
    /// Seeded from a user-supplied scene and character.
    Custom,
}

/// User-supplied scene and character setup for custom mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomSetup {
    /// Scene description.
    pub scene: String,
    /// Character description; empty when the user supplied none.
    pub character: String,
}

impl CustomSetup {
    /// Parse free-form setup text.
    ///
    /// A `scene: ..., character: ...` split is applied when both markers are
    /// present in that order; otherwise the whole text becomes the scene.
    pub fn parse(input: &str) -> Self {
        let lower = input.to_ascii_lowercase();
        if let (Some(scene_at), Some(character_at)) =
            (lower.find("scene:"), lower.find("character:"))
        {
            if scene_at < character_at {
                let scene = input[scene_at + "scene:".len()..character_at]
                    .trim()
                    .trim_end_matches(',')
                    .trim();
                let character = input[character_at + "character:".len()..].trim();
                return Self {
                    scene: scene.to_string(),
                    character: character.to_string(),
                };
            }
        }
        Self {
            scene: input.trim().to_string(),
            character: String::new(),
        }
    }
}

/// One user's end-to-end playthrough from entry to ending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    phase: Phase,
    mode: StoryMode,
    custom_setup: Option<CustomSetup>,
    chapter_index: u32,
    total_chapters: u32,
    /// Options of the delivered, not yet answered chapter.
    open_options: Option<Vec<ChapterOption>>,
    history: Vec<ChoiceRecord>,
    tally: CategoryTally,
    final_category: Option<Category>,
    created_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Create a fresh session awaiting its entry reply.
    pub fn new(total_chapters: u32) -> Self {
        Self {
            id: SessionId::new(),
            phase: Phase::AwaitingEntry,
            mode: StoryMode::Random,
            custom_setup: None,
            chapter_index: 0,
            total_chapters: total_chapters.max(1),
            open_options: None,
            history: Vec::new(),
            tally: CategoryTally::new(),
            final_category: None,
            created_at: Utc::now(),
            ended_at: None,
        }
    }

    /// The session identifier.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Story mode; meaningful once the entry reply has been processed.
    pub fn mode(&self) -> StoryMode {
        self.mode
    }

    /// The custom setup, present only in custom mode.
    pub fn custom_setup(&self) -> Option<&CustomSetup> {
        self.custom_setup.as_ref()
    }

    /// Zero-based index of the next unanswered chapter.
    pub fn chapter(&self) -> u32 {
        self.chapter_index
    }

    /// Configured number of chapters before the ending.
    pub fn total_chapters(&self) -> u32 {
        self.total_chapters
    }

    /// Options of the delivered, not yet answered chapter.
    pub fn open_options(&self) -> Option<&[ChapterOption]> {
        self.open_options.as_deref()
    }

    /// Every choice made so far, in order.
    pub fn history(&self) -> &[ChoiceRecord] {
        &self.history
    }

    /// Running per-category counts.
    pub fn tally(&self) -> &CategoryTally {
        &self.tally
    }

    /// The final category, present once the session concluded with one.
    pub fn final_category(&self) -> Option<Category> {
        self.final_category
    }

    /// When the session was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the session ended, if it has.
    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    /// Whether every chapter has been answered.
    pub fn is_complete(&self) -> bool {
        self.chapter_index == self.total_chapters
    }

    /// Enter random mode. Only valid on the entry phase.
    pub fn choose_random(&mut self) -> CoreResult<()> {
        self.expect_phase(Phase::AwaitingEntry)?;
        self.mode = StoryMode::Random;
        Ok(())
    }

    /// Move to the custom-setup phase. Only valid on the entry phase.
    pub fn request_custom_setup(&mut self) -> CoreResult<()> {
        self.expect_phase(Phase::AwaitingEntry)?;
        self.phase = Phase::AwaitingCustomSetup;
        Ok(())
    }

    /// Store the custom setup and enter custom mode.
    pub fn store_custom_setup(&mut self, setup: CustomSetup) -> CoreResult<()> {
        self.expect_phase(Phase::AwaitingCustomSetup)?;
        self.mode = StoryMode::Custom;
        self.custom_setup = Some(setup);
        Ok(())
    }

    /// Deliver a generated chapter's options and await the user's choice.
    pub fn deliver_chapter(&mut self, options: Vec<ChapterOption>) -> CoreResult<()> {
        if self.phase == Phase::Ended {
            return Err(CoreError::SessionEnded);
        }
        if self.open_options.is_some() {
            return Err(CoreError::InvalidTransition(self.phase));
        }
        self.open_options = Some(options);
        self.phase = Phase::AwaitingChoice;
        Ok(())
    }

    /// Record a validated choice against the delivered chapter.
    ///
    /// Appends to the history, updates the tally, advances the chapter index
    /// and clears the open options. The category comes from the delivered
    /// option carrying the chosen letter.
    pub fn record_choice(&mut self, letter: ChoiceLetter) -> CoreResult<ChoiceRecord> {
        self.expect_phase(Phase::AwaitingChoice)?;
        let options = self
            .open_options
            .as_ref()
            .ok_or(CoreError::InvalidTransition(Phase::AwaitingChoice))?;
        let option = options
            .iter()
            .find(|o| o.letter == letter)
            .ok_or(CoreError::MissingOption(letter))?;

        if self.chapter_index >= self.total_chapters {
            return Err(CoreError::ChapterOverflow {
                index: self.chapter_index,
                total: self.total_chapters,
            });
        }
        if self.history.iter().any(|r| r.chapter == self.chapter_index) {
            return Err(CoreError::DuplicateChapter(self.chapter_index));
        }

        let record = ChoiceRecord {
            chapter: self.chapter_index,
            letter,
            text: option.text.clone(),
            category: option.category,
            chosen_at: Utc::now(),
        };
        self.history.push(record.clone());
        self.tally.record(record.category);
        self.chapter_index += 1;
        self.open_options = None;
        Ok(record)
    }

    /// Conclude the session with its final category.
    pub fn finish(&mut self, category: Category) -> CoreResult<()> {
        if self.phase == Phase::Ended {
            return Err(CoreError::SessionEnded);
        }
        self.phase = Phase::Ended;
        self.final_category = Some(category);
        self.ended_at = Some(Utc::now());
        Ok(())
    }

    /// End the session without a classification.
    ///
    /// Used for the entry farewell, abandonment, and generation failures.
    /// A no-op on an already ended session.
    pub fn end(&mut self) {
        if self.phase != Phase::Ended {
            self.phase = Phase::Ended;
            self.ended_at = Some(Utc::now());
        }
    }

    fn expect_phase(&self, expected: Phase) -> CoreResult<()> {
        if self.phase == Phase::Ended {
            return Err(CoreError::SessionEnded);
        }
        if self.phase != expected {
            return Err(CoreError::InvalidTransition(self.phase));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<ChapterOption> {
        vec![
            ChapterOption {
                letter: ChoiceLetter::A,
                text: "Step into the unknown".to_string(),
                category: Category::Explorer,
            },
            ChapterOption {
                letter: ChoiceLetter::B,
                text: "Reason it through".to_string(),
                category: Category::Logical,
            },
            ChapterOption {
                letter: ChoiceLetter::C,
                text: "Follow your feeling".to_string(),
                category: Category::Emotional,
            },
            ChapterOption {
                letter: ChoiceLetter::D,
                text: "Let the current carry you".to_string(),
                category: Category::Fate,
            },
        ]
    }

    #[test]
    fn fresh_session_awaits_entry() {
        let session = Session::new(5);
        assert_eq!(session.phase(), Phase::AwaitingEntry);
        assert_eq!(session.chapter(), 0);
        assert!(session.history().is_empty());
        assert!(session.final_category().is_none());
    }

    #[test]
    fn history_length_tracks_chapter_index() {
        let mut session = Session::new(3);
        session.choose_random().unwrap();
        for _ in 0..3 {
            session.deliver_chapter(options()).unwrap();
            session.record_choice(ChoiceLetter::A).unwrap();
            assert_eq!(session.history().len() as u32, session.chapter());
            assert_eq!(session.tally().total() as usize, session.history().len());
        }
        assert!(session.is_complete());
    }

    #[test]
    fn record_uses_delivered_category() {
        let mut session = Session::new(5);
        session.choose_random().unwrap();
        session.deliver_chapter(options()).unwrap();
        let record = session.record_choice(ChoiceLetter::C).unwrap();
        assert_eq!(record.category, Category::Emotional);
        assert_eq!(session.tally().count(Category::Emotional), 1);
    }

    #[test]
    fn choice_requires_open_chapter() {
        let mut session = Session::new(5);
        session.choose_random().unwrap();
        assert!(matches!(
            session.record_choice(ChoiceLetter::A),
            Err(CoreError::InvalidTransition(_))
        ));
    }

    #[test]
    fn double_delivery_rejected() {
        let mut session = Session::new(5);
        session.choose_random().unwrap();
        session.deliver_chapter(options()).unwrap();
        assert!(session.deliver_chapter(options()).is_err());
    }

    #[test]
    fn ended_session_accepts_nothing() {
        let mut session = Session::new(5);
        session.end();
        assert_eq!(session.phase(), Phase::Ended);
        assert!(matches!(
            session.deliver_chapter(options()),
            Err(CoreError::SessionEnded)
        ));
        assert!(matches!(
            session.choose_random(),
            Err(CoreError::SessionEnded)
        ));
        assert!(session.finish(Category::Fate).is_err());
    }

    #[test]
    fn finish_sets_category_and_timestamp() {
        let mut session = Session::new(1);
        session.choose_random().unwrap();
        session.deliver_chapter(options()).unwrap();
        session.record_choice(ChoiceLetter::D).unwrap();
        session.finish(Category::Fate).unwrap();

        assert_eq!(session.phase(), Phase::Ended);
        assert_eq!(session.final_category(), Some(Category::Fate));
        assert!(session.ended_at().is_some());
    }

    #[test]
    fn custom_setup_flow() {
        let mut session = Session::new(5);
        session.request_custom_setup().unwrap();
        assert_eq!(session.phase(), Phase::AwaitingCustomSetup);

        session
            .store_custom_setup(CustomSetup::parse(
                "scene: a mysterious library, character: a scholar",
            ))
            .unwrap();
        assert_eq!(session.mode(), StoryMode::Custom);
        let setup = session.custom_setup().unwrap();
        assert_eq!(setup.scene, "a mysterious library");
        assert_eq!(setup.character, "a scholar");
    }

    #[test]
    fn custom_setup_without_markers() {
        let setup = CustomSetup::parse("  a rainy harbor at dusk  ");
        assert_eq!(setup.scene, "a rainy harbor at dusk");
        assert!(setup.character.is_empty());
    }

    #[test]
    fn at_least_one_chapter() {
        let session = Session::new(0);
        assert_eq!(session.total_chapters(), 1);
    }
}
