use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::comment::Comment;

/// Opaque post identifier taken from the route.
pub type PostId = String;

/// The article shown at the top of the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub tag: String,
    pub title: String,
    pub content: String,

    /// Only ever incremented, one per upvote.
    pub upvotes: u64,

    /// Serialized as `YYYY-MM-DD`.
    pub created_at: NaiveDate,
}

/// Everything a page needs after navigation: the post and its comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPayload {
    pub post: Post,
    pub comments: Vec<Comment>,
}
