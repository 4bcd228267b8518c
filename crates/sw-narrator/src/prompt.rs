//! Prompt construction for the Ollama narrator.

use std::fmt::Write;

use sw_core::StoryMode;
use sw_engine::NarrativeRequest;

use crate::elements::StoryElements;

/// System prompt fixing the narrator's role and the response schema.
pub fn system(total_chapters: u32) -> String {
    format!(
        "You are the narrator of an interactive soul-exploration story told over \
         {total_chapters} chapters. Each chapter is a short scene of 100 to 150 characters \
         followed by exactly four options labeled A, B, C and D. Each option carries one \
         category tag: 'explorer' for bold discovery, 'logical' for reasoned analysis, \
         'emotional' for feeling and connection, 'fate' for surrender to chance. Answer \
         with a single JSON object: {{\"prose\": \"...\", \"options\": [{{\"letter\": \"A\", \
         \"text\": \"...\", \"category\": \"...\"}}, ...]}}. For the final ending, answer \
         {{\"prose\": \"...\"}} with no options. Output only JSON, no other text."
    )
}

/// Build the user prompt for one request.
///
/// Openings sample fresh story elements; pass them in explicitly via
/// [`opening_with`] when determinism matters.
pub fn for_request(request: &NarrativeRequest) -> String {
    if request.is_ending {
        return ending(request);
    }
    if request.chapter == 0 {
        let elements = StoryElements::pick(&mut rand::rng());
        return opening_with(request, elements);
    }
    continuation(request)
}

/// Build the opening prompt from fixed story elements.
pub fn opening_with(request: &NarrativeRequest, elements: StoryElements) -> String {
    let mut out = String::new();
    match (request.mode, &request.custom_setup) {
        (StoryMode::Custom, Some(setup)) => {
            let _ = write!(
                out,
                "Begin chapter 1 of {}. Scene: {}. Main character: {}.",
                request.total_chapters, setup.scene, setup.character
            );
        }
        _ => {
            let _ = write!(
                out,
                "Begin chapter 1 of {}. Weave these elements into the opening scene: a {} {} \
                 that {}.",
                request.total_chapters, elements.adjective, elements.noun, elements.verb
            );
        }
    }
    out.push_str(" Offer four options A-D, one per category.");
    out
}

fn continuation(request: &NarrativeRequest) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "Continue with chapter {} of {}. The journey so far:",
        request.chapter + 1,
        request.total_chapters
    );
    for choice in &request.prior_choices {
        let _ = write!(
            out,
            "\n- Chapter {}: chose {} ({}): {}",
            choice.chapter + 1,
            choice.letter,
            choice.category,
            choice.text
        );
    }
    out.push_str("\nOffer four options A-D, one per category.");
    out
}

fn ending(request: &NarrativeRequest) -> String {
    let mut out = String::from(
        "Write the closing scene of the journey. Resolve the story in 100 to 150 characters, \
         reflecting the path taken:",
    );
    for choice in &request.prior_choices {
        let _ = write!(
            out,
            "\n- Chapter {}: chose {} ({}): {}",
            choice.chapter + 1,
            choice.letter,
            choice.category,
            choice.text
        );
    }
    out.push_str("\nNo options. Prose only.");
    out
}
