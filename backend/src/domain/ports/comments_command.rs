//! Driving ports for reading and moderating comments.

use async_trait::async_trait;

use crate::domain::{Comment, CommentId, CommentText, Error, Identity, PostId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentsQuery: Send + Sync {
    /// A single comment. Missing comments yield `NotFound`.
    async fn comment(&self, id: CommentId) -> Result<Comment, Error>;
}

/// Comment mutations. Only the author or an admin may edit or delete a
/// comment; anyone else receives `NotFound`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentsCommand: Send + Sync {
    /// Attach a comment by `identity` to an existing post.
    async fn add_comment(
        &self,
        identity: Identity,
        post: PostId,
        text: CommentText,
    ) -> Result<Comment, Error>;

    /// Replace a comment's text.
    async fn update_comment(
        &self,
        identity: Identity,
        id: CommentId,
        text: CommentText,
    ) -> Result<Comment, Error>;

    /// Delete a comment and return it so callers can locate its post.
    async fn delete_comment(&self, identity: Identity, id: CommentId) -> Result<Comment, Error>;
}
