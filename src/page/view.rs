use chrono::NaiveDate;
use serde::Serialize;

use crate::models::comment::CommentId;

use super::{PostPage, registration::RegisterButton};

/// Serializable snapshot of what the page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PageView {
    Loading,
    Ready {
        post: PostView,
        action_bar: ActionBarView,
        composer: ComposerView,
        comments: Vec<CommentView>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostView {
    pub id: String,
    pub tag: String,
    pub title: String,
    pub content: String,
    pub created_at: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionBarView {
    pub upvotes: u64,
    pub registered: bool,
    pub register_button: RegisterButton,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposerView {
    pub label: &'static str,
    pub draft: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentView {
    pub id: CommentId,
    pub author: String,
    pub created_at: NaiveDate,
    pub body: CommentBody,
}

/// Read mode shows the content with an Edit control; edit mode shows the
/// buffer with Save and Cancel. Delete is available in both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CommentBody {
    Reading { content: String },
    Editing { buffer: String },
}

pub const COMPOSER_LABEL: &str = "Type a comment, and hit enter to submit.";

impl PostPage {
    pub fn view(&self) -> PageView {
        let Some(post) = self.post() else {
            return PageView::Loading;
        };

        let comments = self
            .comments()
            .iter()
            .map(|comment| {
                let body = match self.editing() {
                    Some(session) if session.comment_id == comment.id => CommentBody::Editing {
                        buffer: session.buffer.clone(),
                    },
                    _ => CommentBody::Reading {
                        content: comment.content.clone(),
                    },
                };
                CommentView {
                    id: comment.id,
                    author: comment.author.clone(),
                    created_at: comment.created_at,
                    body,
                }
            })
            .collect();

        PageView::Ready {
            post: PostView {
                id: post.id.clone(),
                tag: post.tag.clone(),
                title: post.title.clone(),
                content: post.content.clone(),
                created_at: post.created_at,
            },
            action_bar: ActionBarView {
                upvotes: post.upvotes,
                registered: self.registration().is_registered(),
                register_button: self.registration().button(),
            },
            composer: ComposerView {
                label: COMPOSER_LABEL,
                draft: self.draft().to_string(),
            },
            comments,
        }
    }
}
