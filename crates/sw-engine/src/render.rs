//! Outbound text rendering for chapters and the final analysis.

use std::fmt::Write;

use sw_core::{Category, CategoryTally, ChapterOption};

/// Render chapter prose with its labeled options.
pub fn chapter(prose: &str, options: &[ChapterOption]) -> String {
    let mut out = String::from(prose.trim());
    out.push('\n');
    for option in options {
        let _ = write!(out, "\n{}. {}", option.letter, option.text);
    }
    out
}

/// Render the ending prose followed by the soul-profile analysis.
pub fn analysis(prose: &str, category: Category, tally: &CategoryTally) -> String {
    let mut out = String::from(prose.trim());
    out.push_str("\n\n---\n\n**Soul profile**\n");
    let _ = writeln!(out, "Your journey points to the {category} path.");
    for cat in Category::ALL {
        let _ = writeln!(out, "  {cat}: {}", tally.count(cat));
    }
    out.push_str("\nWould you wander with us again?");
    out
}
