//! Random seed elements for randomly started journeys.
//!
//! A random journey opens from a sampled adjective, noun, and verb; the
//! prompt weaves them into the first scene so no two openings read alike.

use rand::Rng;

const ADJECTIVES: &[&str] = &[
    "mysterious",
    "forgotten",
    "luminous",
    "silent",
    "ancient",
    "restless",
    "hidden",
    "endless",
    "fractured",
    "wandering",
];

const NOUNS: &[&str] = &[
    "lighthouse",
    "library",
    "forest",
    "harbor",
    "observatory",
    "marketplace",
    "monastery",
    "railway",
    "garden",
    "archive",
];

const VERBS: &[&str] = &[
    "awakens",
    "beckons",
    "unravels",
    "whispers",
    "drifts",
    "burns",
    "remembers",
    "collapses",
    "blooms",
    "calls",
];

/// One sampled adjective, noun, and verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoryElements {
    /// Sampled adjective.
    pub adjective: &'static str,
    /// Sampled noun.
    pub noun: &'static str,
    /// Sampled verb.
    pub verb: &'static str,
}

impl StoryElements {
    /// Sample one element from each pool.
    pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            adjective: ADJECTIVES[rng.random_range(0..ADJECTIVES.len())],
            noun: NOUNS[rng.random_range(0..NOUNS.len())],
            verb: VERBS[rng.random_range(0..VERBS.len())],
        }
    }
}
