//! Running per-category choice counts.

use serde::{Deserialize, Serialize};

use crate::choice::Category;

/// Per-category counts of the choices made so far.
///
/// Counts only ever increase; the tally always equals the multiset count of
/// categories in the session's choice history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTally {
    explorer: u32,
    logical: u32,
    emotional: u32,
    fate: u32,
}

impl CategoryTally {
    /// Create an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one choice toward a category.
    pub fn record(&mut self, category: Category) {
        match category {
            Category::Explorer => self.explorer += 1,
            Category::Logical => self.logical += 1,
            Category::Emotional => self.emotional += 1,
            Category::Fate => self.fate += 1,
        }
    }

    /// Count for one category.
    pub fn count(&self, category: Category) -> u32 {
        match category {
            Category::Explorer => self.explorer,
            Category::Logical => self.logical,
            Category::Emotional => self.emotional,
            Category::Fate => self.fate,
        }
    }

    /// Total number of recorded choices.
    pub fn total(&self) -> u32 {
        self.explorer + self.logical + self.emotional + self.fate
    }

    /// The highest count among all categories.
    pub fn peak(&self) -> u32 {
        self.explorer
            .max(self.logical)
            .max(self.emotional)
            .max(self.fate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tally() {
        let tally = CategoryTally::new();
        assert_eq!(tally.total(), 0);
        for category in Category::ALL {
            assert_eq!(tally.count(category), 0);
        }
    }

    #[test]
    fn record_and_count() {
        let mut tally = CategoryTally::new();
        tally.record(Category::Explorer);
        tally.record(Category::Explorer);
        tally.record(Category::Fate);

        assert_eq!(tally.count(Category::Explorer), 2);
        assert_eq!(tally.count(Category::Fate), 1);
        assert_eq!(tally.count(Category::Logical), 0);
        assert_eq!(tally.total(), 3);
        assert_eq!(tally.peak(), 2);
    }
}
