//! Choice letters, behavioral categories, and chapter options.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CoreError, CoreResult};

/// One of the four labels a chapter offers its choices under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChoiceLetter {
    /// First option.
    A,
    /// Second option.
    B,
    /// Third option.
    C,
    /// Fourth option.
    D,
}

impl ChoiceLetter {
    /// All four letters in label order.
    pub const ALL: [Self; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// Parse a raw reply into a letter.
    ///
    /// Surrounding whitespace is trimmed and matching is case-insensitive.
    /// Anything that is not exactly one of the four labels is rejected.
    pub fn parse(input: &str) -> CoreResult<Self> {
        match input.trim().to_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            other => Err(CoreError::InvalidLetter(other.to_string())),
        }
    }

    /// The label as written in chapter text.
    pub fn label(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

impl fmt::Display for ChoiceLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for ChoiceLetter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for ChoiceLetter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Classification axis driving the final soul-profile analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Drawn to the unknown; acts to discover.
    Explorer,
    /// Weighs and reasons before acting.
    Logical,
    /// Follows feeling and intuition.
    Emotional,
    /// Lets circumstance decide; trusts the current.
    Fate,
}

impl Category {
    /// All four categories in canonical order.
    pub const ALL: [Self; 4] = [Self::Explorer, Self::Logical, Self::Emotional, Self::Fate];

    /// Parse a category tag from generated content.
    ///
    /// Tags arrive from an external generator and are matched
    /// case-insensitively against the fixed set; anything else is rejected.
    pub fn parse(input: &str) -> CoreResult<Self> {
        match input.trim().to_lowercase().as_str() {
            "explorer" => Ok(Self::Explorer),
            "logical" => Ok(Self::Logical),
            "emotional" => Ok(Self::Emotional),
            "fate" => Ok(Self::Fate),
            other => Err(CoreError::UnknownCategory(other.to_string())),
        }
    }

    /// The lowercase wire tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Explorer => "explorer",
            Self::Logical => "logical",
            Self::Emotional => "emotional",
            Self::Fate => "fate",
        }
    }

    /// The capitalized display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Explorer => "Explorer",
            Self::Logical => "Logical",
            Self::Emotional => "Emotional",
            Self::Fate => "Fate",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// One labeled behavioral option attached to a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterOption {
    /// The label the user replies with.
    pub letter: ChoiceLetter,
    /// The option text shown to the user.
    pub text: String,
    /// The category this option counts toward.
    pub category: Category,
}

/// One answered chapter in the session history. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceRecord {
    /// Zero-based index of the chapter this choice answered.
    pub chapter: u32,
    /// The letter the user picked.
    pub letter: ChoiceLetter,
    /// The text of the picked option.
    pub text: String,
    /// The category attached to that letter by the generated chapter.
    pub category: Category,
    /// When the choice was made.
    pub chosen_at: DateTime<Utc>,
}
