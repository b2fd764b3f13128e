// src/page/mod.rs

//! View state of a single post page.
//!
//! `PostPage` owns everything the page shows: the post, its comments, the
//! composer draft, the (at most one) edit session and the registration flag.
//! Every user interaction is a method here, so the page behaves the same
//! whether it is driven by HTTP handlers or directly from tests.

pub mod action;
pub mod ids;
pub mod registration;
pub mod view;

use chrono::NaiveDate;

use crate::{
    config::Config,
    error::AppError,
    models::{
        comment::{Comment, CommentId, EditSession},
        post::{Post, PostId, PostPayload},
    },
    utils::date::today,
};

use self::{action::Action, ids::CommentIds, registration::Registration};

/// Rules applied to comments submitted from the composer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentSettings {
    pub author: String,
    pub reject_empty: bool,
}

impl Default for CommentSettings {
    fn default() -> Self {
        Self {
            author: "Random User".to_string(),
            reject_empty: false,
        }
    }
}

impl From<&Config> for CommentSettings {
    fn from(config: &Config) -> Self {
        Self {
            author: config.comment_author.clone(),
            reject_empty: config.reject_empty_comments,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PostPage {
    settings: CommentSettings,
    route: Option<PostId>,
    post: Option<Post>,
    comments: Vec<Comment>,
    ids: CommentIds,
    editing: Option<EditSession>,
    draft: String,
    registration: Registration,
}

impl PostPage {
    pub fn new(settings: CommentSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn route(&self) -> Option<&str> {
        self.route.as_deref()
    }

    pub fn post(&self) -> Option<&Post> {
        self.post.as_ref()
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn registration(&self) -> Registration {
        self.registration
    }

    /// True until a payload for the current route has been installed.
    pub fn is_loading(&self) -> bool {
        self.post.is_none()
    }

    /// Points the page at `id`.
    ///
    /// Returns `true` when the route changed and a load is needed. A change
    /// drops the whole page back to loading, including unsaved edits, the
    /// composer draft and the registration flag.
    pub fn navigate(&mut self, id: &str) -> bool {
        if self.route.as_deref() == Some(id) {
            return false;
        }

        if self.editing.is_some() || !self.draft.is_empty() {
            tracing::warn!(
                "Navigating to post {} discards unsaved input on {:?}",
                id,
                self.route
            );
        }

        tracing::info!("Navigating to post {}", id);
        *self = Self {
            settings: self.settings.clone(),
            route: Some(id.to_string()),
            ..Self::default()
        };
        true
    }

    /// Installs a loaded payload. Payloads for any other route are stale
    /// and ignored; returns whether the payload was applied.
    pub fn finish_load(&mut self, payload: PostPayload) -> bool {
        if self.route.as_deref() != Some(payload.post.id.as_str()) {
            tracing::debug!("Dropping stale payload for post {}", payload.post.id);
            return false;
        }

        self.ids = CommentIds::after(&payload.comments);
        self.comments = payload.comments;
        self.post = Some(payload.post);
        true
    }

    /// Dispatches one user action against the loaded page.
    pub fn apply(&mut self, action: Action) -> Result<(), AppError> {
        tracing::debug!("Applying {} to post {:?}", action.name(), self.route);

        match action {
            Action::Upvote => self.upvote().map(drop),
            Action::Share => self.share(),
            Action::ToggleRegistration => self.toggle_registration().map(drop),
            Action::UpdateDraft(text) => self.update_draft(text.content),
            Action::SubmitComment(text) => self.submit_comment(text.content, today()).map(drop),
            Action::DeleteComment { id } => self.delete_comment(id).map(drop),
            Action::EditComment { id } => self.edit_comment(id).map(drop),
            Action::ChangeEdit(text) => self.change_edit(text.content).map(drop),
            Action::SaveEdit { id } => self.save_edit(id).map(drop),
            Action::CancelEdit => self.cancel_edit().map(drop),
        }
    }

    /// Adds one upvote and returns the new count.
    pub fn upvote(&mut self) -> Result<u64, AppError> {
        let post = self.loaded_post_mut()?;
        post.upvotes = post.upvotes.saturating_add(1);
        Ok(post.upvotes)
    }

    /// The share control has no behavior yet.
    pub fn share(&mut self) -> Result<(), AppError> {
        self.ensure_loaded()
    }

    pub fn toggle_registration(&mut self) -> Result<Registration, AppError> {
        self.ensure_loaded()?;
        self.registration = self.registration.toggled();
        Ok(self.registration)
    }

    pub fn update_draft(&mut self, content: String) -> Result<(), AppError> {
        self.ensure_loaded()?;
        self.draft = content;
        Ok(())
    }

    /// Appends a comment by the placeholder author and clears the draft.
    pub fn submit_comment(
        &mut self,
        content: String,
        created_at: NaiveDate,
    ) -> Result<CommentId, AppError> {
        self.ensure_loaded()?;

        if self.settings.reject_empty && content.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Comment must not be empty".to_string(),
            ));
        }

        let id = self.ids.allocate();
        self.comments.push(Comment {
            id,
            author: self.settings.author.clone(),
            content,
            created_at,
        });
        self.draft.clear();

        tracing::debug!("Comment {} added, {} total", id, self.comments.len());
        Ok(id)
    }

    /// Removes the comment with `id`; returns whether anything was removed.
    pub fn delete_comment(&mut self, id: CommentId) -> Result<bool, AppError> {
        self.ensure_loaded()?;

        let before = self.comments.len();
        self.comments.retain(|comment| comment.id != id);
        let removed = self.comments.len() != before;

        // An edit session on a deleted comment has nothing left to save into.
        if self.editing.as_ref().is_some_and(|session| session.comment_id == id) {
            self.editing = None;
        }

        Ok(removed)
    }

    /// Opens the editor on `id` with a copy of its content, replacing any
    /// other open session. Unknown ids leave the page untouched.
    pub fn edit_comment(&mut self, id: CommentId) -> Result<bool, AppError> {
        self.ensure_loaded()?;

        let Some(comment) = self.comments.iter().find(|comment| comment.id == id) else {
            return Ok(false);
        };

        self.editing = Some(EditSession {
            comment_id: id,
            buffer: comment.content.clone(),
        });
        Ok(true)
    }

    pub fn change_edit(&mut self, content: String) -> Result<bool, AppError> {
        self.ensure_loaded()?;

        match self.editing.as_mut() {
            Some(session) => {
                session.buffer = content;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Writes the edit buffer into comment `id` and closes the editor.
    /// Does nothing unless the open session targets `id`.
    pub fn save_edit(&mut self, id: CommentId) -> Result<bool, AppError> {
        self.ensure_loaded()?;

        match self.editing.take() {
            Some(session) if session.comment_id == id => {
                if let Some(comment) = self.comments.iter_mut().find(|comment| comment.id == id) {
                    comment.content = session.buffer;
                }
                Ok(true)
            }
            other => {
                self.editing = other;
                Ok(false)
            }
        }
    }

    /// Closes the editor without touching the comment.
    pub fn cancel_edit(&mut self) -> Result<bool, AppError> {
        self.ensure_loaded()?;
        Ok(self.editing.take().is_some())
    }

    fn ensure_loaded(&self) -> Result<(), AppError> {
        if self.is_loading() {
            return Err(AppError::Conflict("Post is still loading".to_string()));
        }
        Ok(())
    }

    fn loaded_post_mut(&mut self) -> Result<&mut Post, AppError> {
        self.post
            .as_mut()
            .ok_or(AppError::Conflict("Post is still loading".to_string()))
    }
}
