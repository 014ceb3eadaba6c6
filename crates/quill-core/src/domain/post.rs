use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post entity - a published blog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub published_at: DateTime<Utc>,
}

/// Validated title and text, ready to be written.
///
/// Only [`PostForm::validate`](super::PostForm::validate) hands these out, so
/// holding one means the length and presence rules already passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub(crate) title: String,
    pub(crate) text: String,
}

impl PostDraft {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_parts(self) -> (String, String) {
        (self.title, self.text)
    }
}

/// A post that has not been assigned an id yet.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: i64,
    pub draft: PostDraft,
    pub published_at: DateTime<Utc>,
}

impl NewPost {
    /// Attribute a draft to its author, published now.
    pub fn new(author_id: i64, draft: PostDraft) -> Self {
        Self {
            author_id,
            draft,
            published_at: Utc::now(),
        }
    }
}
