//! Archival snapshot of a finished session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::choice::{Category, ChoiceRecord};
use crate::session::{Session, SessionId, StoryMode};

/// Snapshot of a finished session, suitable for audit storage.
///
/// Not required for the engine's correctness; a transport owner may persist
/// these keyed by session ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Session identifier.
    pub id: SessionId,
    /// Story mode the session ran in.
    pub mode: StoryMode,
    /// Every choice made, in order.
    pub choices: Vec<ChoiceRecord>,
    /// Final category; absent when the session ended before any chapter.
    pub category: Option<Category>,
    /// When the session was created.
    pub started_at: DateTime<Utc>,
    /// When the session ended.
    pub ended_at: Option<DateTime<Utc>>,
}

impl SessionRecord {
    /// Snapshot a session.
    pub fn from_session(session: &Session) -> Self {
        Self {
            id: session.id(),
            mode: session.mode(),
            choices: session.history().to_vec(),
            category: session.final_category(),
            started_at: session.created_at(),
            ended_at: session.ended_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::{ChapterOption, ChoiceLetter};

    #[test]
    fn snapshot_roundtrips_through_json() {
        let mut session = Session::new(1);
        session.choose_random().unwrap();
        session
            .deliver_chapter(vec![
                ChapterOption {
                    letter: ChoiceLetter::A,
                    text: "Explore".to_string(),
                    category: Category::Explorer,
                },
                ChapterOption {
                    letter: ChoiceLetter::B,
                    text: "Reason".to_string(),
                    category: Category::Logical,
                },
                ChapterOption {
                    letter: ChoiceLetter::C,
                    text: "Feel".to_string(),
                    category: Category::Emotional,
                },
                ChapterOption {
                    letter: ChoiceLetter::D,
                    text: "Wait".to_string(),
                    category: Category::Fate,
                },
            ])
            .unwrap();
        session.record_choice(ChoiceLetter::A).unwrap();
        session.finish(Category::Explorer).unwrap();

        let record = SessionRecord::from_session(&session);
        let json = serde_json::to_string(&record).unwrap();
        let back: SessionRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id, session.id());
        assert_eq!(back.category, Some(Category::Explorer));
        assert_eq!(back.choices.len(), 1);
    }
}
