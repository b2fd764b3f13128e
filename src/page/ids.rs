use crate::models::comment::{Comment, CommentId};

/// Hands out comment ids that are never reused while a page is open.
///
/// Ids keep climbing after deletions, so a new comment can never collide
/// with one that was removed or with a seed comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentIds {
    next: CommentId,
}

impl Default for CommentIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl CommentIds {
    /// Starts past the largest id already present in `comments`.
    pub fn after(comments: &[Comment]) -> Self {
        let next = comments
            .iter()
            .map(|comment| comment.id)
            .max()
            .map_or(1, |max| max.saturating_add(1));
        Self { next }
    }

    pub fn allocate(&mut self) -> CommentId {
        let id = self.next;
        self.next = self.next.saturating_add(1);
        id
    }

    #[cfg(test)]
    pub fn peek(&self) -> CommentId {
        self.next
    }
}
