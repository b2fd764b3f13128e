use serde::Deserialize;
use validator::Validate;

use crate::models::comment::{CommentId, CommentText};

/// One discrete user interaction with the page.
///
/// Wire form is internally tagged, e.g. `{"type": "delete_comment", "id": 2}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    Upvote,
    Share,
    ToggleRegistration,
    /// Composer keystrokes.
    UpdateDraft(CommentText),
    SubmitComment(CommentText),
    DeleteComment { id: CommentId },
    EditComment { id: CommentId },
    /// Inline editor keystrokes.
    ChangeEdit(CommentText),
    SaveEdit { id: CommentId },
    CancelEdit,
}

impl Action {
    /// Runs the length rules on any text the action carries.
    pub fn validate(&self) -> Result<(), validator::ValidationErrors> {
        match self {
            Action::UpdateDraft(text) | Action::SubmitComment(text) | Action::ChangeEdit(text) => {
                text.validate()
            }
            _ => Ok(()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::Upvote => "upvote",
            Action::Share => "share",
            Action::ToggleRegistration => "toggle_registration",
            Action::UpdateDraft(_) => "update_draft",
            Action::SubmitComment(_) => "submit_comment",
            Action::DeleteComment { .. } => "delete_comment",
            Action::EditComment { .. } => "edit_comment",
            Action::ChangeEdit(_) => "change_edit",
            Action::SaveEdit { .. } => "save_edit",
            Action::CancelEdit => "cancel_edit",
        }
    }
}
