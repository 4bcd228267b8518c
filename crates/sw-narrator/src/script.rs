//! Scripted offline narrator.
//!
//! Serves canned chapters with a fixed option layout so the full session
//! flow, including classification, works without a running model service.

use async_trait::async_trait;

use sw_core::{Category, ChapterOption, ChoiceLetter, StoryMode};
use sw_engine::{GeneratedChapter, NarrativeRequest, Narrator, NarratorError};

const OPENINGS: &[&str] = &[
    "You wake at the edge of a pale shoreline, a path of worn stones leading inland.",
    "A lantern-lit road winds into a sleeping town where every window watches you.",
    "Snow settles on an old bridge; on its far side, three roads braid into the dark.",
];

const CHAPTERS: &[&str] = &[
    "The path narrows between mossy walls, and somewhere ahead water is falling.",
    "A door stands ajar in the hillside, warm light spilling across your boots.",
    "Wind carries a melody you almost remember, pulling at you from two directions.",
    "The ground opens onto a valley of mirrors, each reflecting a different sky.",
    "An old traveler waits at a fork, offering you a map with one corner burned away.",
];

const ENDING: &str = "The road behind you folds into mist, and what you carried here feels \
                      lighter. The journey ends where it began: with you.";

/// Narrator serving fixed prose and a fixed option layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptedNarrator;

impl ScriptedNarrator {
    /// Create a scripted narrator.
    pub fn new() -> Self {
        Self
    }

    fn options() -> Vec<ChapterOption> {
        vec![
            ChapterOption {
                letter: ChoiceLetter::A,
                text: "Press on and see what waits ahead".to_string(),
                category: Category::Explorer,
            },
            ChapterOption {
                letter: ChoiceLetter::B,
                text: "Study the signs before moving".to_string(),
                category: Category::Logical,
            },
            ChapterOption {
                letter: ChoiceLetter::C,
                text: "Follow the pull in your chest".to_string(),
                category: Category::Emotional,
            },
            ChapterOption {
                letter: ChoiceLetter::D,
                text: "Close your eyes and let the road choose".to_string(),
                category: Category::Fate,
            },
        ]
    }

    fn prose(request: &NarrativeRequest) -> String {
        if request.chapter == 0 {
            if request.mode == StoryMode::Custom {
                if let Some(setup) = &request.custom_setup {
                    return format!(
                        "In {}, {} takes a first uncertain step into the story.",
                        setup.scene, setup.character
                    );
                }
            }
            let index = request.total_chapters as usize % OPENINGS.len();
            return OPENINGS[index].to_string();
        }
        let index = (request.chapter as usize - 1) % CHAPTERS.len();
        CHAPTERS[index].to_string()
    }
}

#[async_trait]
impl Narrator for ScriptedNarrator {
    async fn generate(
        &self,
        request: &NarrativeRequest,
    ) -> Result<GeneratedChapter, NarratorError> {
        if request.is_ending {
            return Ok(GeneratedChapter {
                prose: ENDING.to_string(),
                options: None,
            });
        }
        Ok(GeneratedChapter {
            prose: Self::prose(request),
            options: Some(Self::options()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sw_core::CustomSetup;

    fn request(chapter: u32, is_ending: bool) -> NarrativeRequest {
        NarrativeRequest {
            mode: StoryMode::Random,
            custom_setup: None,
            chapter,
            total_chapters: 5,
            prior_choices: Vec::new(),
            is_ending,
        }
    }

    #[tokio::test]
    async fn chapters_always_validate() {
        let narrator = ScriptedNarrator::new();
        for chapter in 0..5 {
            let generated = narrator.generate(&request(chapter, false)).await.unwrap();
            generated.validate(false).unwrap();
        }
    }

    #[tokio::test]
    async fn ending_has_no_options() {
        let narrator = ScriptedNarrator::new();
        let generated = narrator.generate(&request(5, true)).await.unwrap();
        generated.validate(true).unwrap();
        assert!(generated.prose.contains("journey ends"));
    }

    #[tokio::test]
    async fn custom_opening_mentions_the_setup() {
        let narrator = ScriptedNarrator::new();
        let mut req = request(0, false);
        req.mode = StoryMode::Custom;
        req.custom_setup = Some(CustomSetup {
            scene: "a mysterious library".to_string(),
            character: "a scholar".to_string(),
        });
        let generated = narrator.generate(&req).await.unwrap();
        assert!(generated.prose.contains("a mysterious library"));
        assert!(generated.prose.contains("a scholar"));
    }

    #[tokio::test]
    async fn options_cover_every_category() {
        let narrator = ScriptedNarrator::new();
        let generated = narrator.generate(&request(1, false)).await.unwrap();
        let options = generated.options.unwrap();
        for category in Category::ALL {
            assert!(options.iter().any(|o| o.category == category));
        }
    }
}
