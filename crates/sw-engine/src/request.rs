//! Context payloads sent to the narrator.
//!
//! A request carries enough prior context for continuity — the chosen option
//! of every answered chapter — without re-sending full prior prose. Whether
//! the ending is being requested is flagged explicitly, never inferred from
//! the chapter index.

use serde::Serialize;

use sw_core::{Category, ChoiceLetter, CustomSetup, Session, StoryMode};

/// Summary of one answered chapter, for continuity context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceSummary {
    /// Zero-based chapter index.
    pub chapter: u32,
    /// The letter the user picked.
    pub letter: ChoiceLetter,
    /// The text of the picked option.
    pub text: String,
    /// The category of the picked option.
    pub category: Category,
}

/// Self-contained request for one generated chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NarrativeRequest {
    /// Story mode.
    pub mode: StoryMode,
    /// Custom scene and character, present in custom mode only.
    pub custom_setup: Option<CustomSetup>,
    /// Zero-based index of the chapter being requested.
    pub chapter: u32,
    /// Total chapters in the session.
    pub total_chapters: u32,
    /// One summary per answered chapter, in order.
    pub prior_choices: Vec<ChoiceSummary>,
    /// Whether this requests the ending: closing prose with no options.
    pub is_ending: bool,
}

impl NarrativeRequest {
    /// Build a mid-story chapter request from the session.
    pub fn chapter(session: &Session) -> Self {
        Self::build(session, false)
    }

    /// Build the ending request from the session.
    pub fn ending(session: &Session) -> Self {
        Self::build(session, true)
    }

    fn build(session: &Session, is_ending: bool) -> Self {
        Self {
            mode: session.mode(),
            custom_setup: session.custom_setup().cloned(),
            chapter: session.chapter(),
            total_chapters: session.total_chapters(),
            prior_choices: session
                .history()
                .iter()
                .map(|r| ChoiceSummary {
                    chapter: r.chapter,
                    letter: r.letter,
                    text: r.text.clone(),
                    category: r.category,
                })
                .collect(),
            is_ending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sw_core::{ChapterOption, Phase};

    fn options() -> Vec<ChapterOption> {
        vec![
            ChapterOption {
                letter: ChoiceLetter::A,
                text: "Open the door".to_string(),
                category: Category::Explorer,
            },
            ChapterOption {
                letter: ChoiceLetter::B,
                text: "Study the lock".to_string(),
                category: Category::Logical,
            },
            ChapterOption {
                letter: ChoiceLetter::C,
                text: "Knock softly".to_string(),
                category: Category::Emotional,
            },
            ChapterOption {
                letter: ChoiceLetter::D,
                text: "Walk away".to_string(),
                category: Category::Fate,
            },
        ]
    }

    #[test]
    fn first_chapter_request_is_empty_of_history() {
        let mut session = Session::new(5);
        session.choose_random().unwrap();
        let request = NarrativeRequest::chapter(&session);

        assert_eq!(request.chapter, 0);
        assert_eq!(request.total_chapters, 5);
        assert!(request.prior_choices.is_empty());
        assert!(!request.is_ending);
        assert!(request.custom_setup.is_none());
    }

    #[test]
    fn summaries_follow_history_order() {
        let mut session = Session::new(5);
        session.choose_random().unwrap();
        session.deliver_chapter(options()).unwrap();
        session.record_choice(ChoiceLetter::B).unwrap();
        session.deliver_chapter(options()).unwrap();
        session.record_choice(ChoiceLetter::D).unwrap();

        let request = NarrativeRequest::chapter(&session);
        assert_eq!(request.chapter, 2);
        assert_eq!(request.prior_choices.len(), 2);
        assert_eq!(request.prior_choices[0].letter, ChoiceLetter::B);
        assert_eq!(request.prior_choices[0].text, "Study the lock");
        assert_eq!(request.prior_choices[1].category, Category::Fate);
    }

    #[test]
    fn ending_is_flagged_explicitly() {
        let mut session = Session::new(1);
        session.choose_random().unwrap();
        session.deliver_chapter(options()).unwrap();
        session.record_choice(ChoiceLetter::A).unwrap();
        assert_eq!(session.phase(), Phase::AwaitingChoice);

        let request = NarrativeRequest::ending(&session);
        assert!(request.is_ending);
        assert_eq!(request.prior_choices.len(), 1);
    }
}
