//! Final soul-profile classification.

use crate::choice::{Category, ChoiceRecord};
use crate::error::{CoreError, CoreResult};
use crate::tally::CategoryTally;

/// Compute the final category from a completed choice history.
///
/// The category with the strictly highest count wins. On a tie, the tied
/// category whose first occurrence in the history is earliest wins, which
/// makes the result deterministic for any fixed history. An empty history
/// cannot be classified.
pub fn classify(history: &[ChoiceRecord]) -> CoreResult<Category> {
    if history.is_empty() {
        return Err(CoreError::EmptyHistory);
    }

    let mut tally = CategoryTally::new();
    for record in history {
        tally.record(record.category);
    }
    let peak = tally.peak();

    // Every tied leader occurs in the history, so the first record whose
    // category reaches the peak count is the earliest-occurring leader.
    history
        .iter()
        .map(|r| r.category)
        .find(|c| tally.count(*c) == peak)
        .ok_or(CoreError::EmptyHistory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::ChoiceLetter;
    use chrono::Utc;

    fn history_of(categories: &[Category]) -> Vec<ChoiceRecord> {
        categories
            .iter()
            .enumerate()
            .map(|(i, &category)| ChoiceRecord {
                chapter: i as u32,
                letter: ChoiceLetter::A,
                text: String::new(),
                category,
                chosen_at: Utc::now(),
            })
            .collect()
    }

    #[test]
    fn empty_history_rejected() {
        assert!(matches!(classify(&[]), Err(CoreError::EmptyHistory)));
    }

    #[test]
    fn strict_majority_wins() {
        let history = history_of(&[
            Category::Explorer,
            Category::Logical,
            Category::Explorer,
            Category::Emotional,
            Category::Explorer,
        ]);
        assert_eq!(classify(&history).unwrap(), Category::Explorer);
    }

    #[test]
    fn tie_resolves_to_earliest_first_occurrence() {
        let history = history_of(&[
            Category::Explorer,
            Category::Logical,
            Category::Explorer,
            Category::Logical,
        ]);
        assert_eq!(classify(&history).unwrap(), Category::Explorer);

        let reversed = history_of(&[
            Category::Logical,
            Category::Explorer,
            Category::Logical,
            Category::Explorer,
        ]);
        assert_eq!(classify(&reversed).unwrap(), Category::Logical);
    }

    #[test]
    fn single_choice_classifies() {
        let history = history_of(&[Category::Fate]);
        assert_eq!(classify(&history).unwrap(), Category::Fate);
    }

    #[test]
    fn repeated_calls_are_deterministic() {
        let history = history_of(&[
            Category::Emotional,
            Category::Fate,
            Category::Emotional,
            Category::Fate,
        ]);
        let first = classify(&history).unwrap();
        for _ in 0..10 {
            assert_eq!(classify(&history).unwrap(), first);
        }
    }
}
