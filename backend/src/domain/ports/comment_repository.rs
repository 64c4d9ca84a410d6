//! Port abstraction for comment persistence.

use async_trait::async_trait;

use crate::domain::{Comment, CommentDetail, CommentId, CommentText, NewComment, PostId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by comment repository adapters.
    pub enum CommentPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "comment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "comment repository query failed: {message}",
        /// The referenced post or author no longer exists.
        MissingParent => "comment references a missing post or author",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Comments on `post` in ascending id order, joined with their authors.
    async fn list_for_post(
        &self,
        post: PostId,
    ) -> Result<Vec<CommentDetail>, CommentPersistenceError>;

    /// Fetch a comment by identifier.
    async fn find(&self, id: CommentId) -> Result<Option<Comment>, CommentPersistenceError>;

    /// Insert a comment and return it with its assigned id.
    async fn insert(&self, comment: NewComment) -> Result<Comment, CommentPersistenceError>;

    /// Replace a comment's text. Returns `None` when no comment has the id.
    async fn update(
        &self,
        id: CommentId,
        text: CommentText,
    ) -> Result<Option<Comment>, CommentPersistenceError>;

    /// Delete a comment. Returns `false` when no comment has the id.
    async fn delete(&self, id: CommentId) -> Result<bool, CommentPersistenceError>;
}
