//! Answer options within a question's choice set.

use serde::Serialize;
use std::fmt;

/// Shown in place of text for answers created without any.
pub const NO_ANSWER: &str = "No Answer";

/// A single answer option.
///
/// Immutable once created; replace the whole value to change it. `Clone`
/// yields an independent copy with the same id and text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    /// 1-based identifier, unique within one question's choices.
    id: u32,
    /// Answer text; absent text renders as [`NO_ANSWER`].
    text: Option<String>,
}

impl Answer {
    /// Create an answer with text.
    pub fn new(id: u32, text: impl Into<String>) -> Self {
        Self {
            id,
            text: Some(text.into()),
        }
    }

    /// Create an answer without text; it renders as the sentinel.
    pub fn untitled(id: u32) -> Self {
        Self { id, text: None }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// The answer text, with the missing case resolved to [`NO_ANSWER`].
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or(NO_ANSWER)
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Answer {}: {}", self.id, self.text())
    }
}
