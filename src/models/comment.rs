use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub type CommentId = u64;

/// A reply attached to the post. Only `content` changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub author: String,
    pub content: String,
    pub created_at: NaiveDate,
}

/// The comment currently in edit mode and its in-progress content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditSession {
    pub comment_id: CommentId,
    pub buffer: String,
}

/// Text typed into the composer or the inline editor.
///
/// Emptiness is a page setting, not a DTO rule: see `CommentSettings`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CommentText {
    #[validate(length(max = 1000, message = "Comment must be at most 1000 characters"))]
    pub content: String,
}
