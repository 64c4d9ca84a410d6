//! Port abstraction for post persistence.

use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostDraft, PostId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by post repository adapters.
    pub enum PostPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "post repository query failed: {message}",
        /// Another post already uses the title.
        DuplicateTitle => "a post with that title already exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Every post in ascending id order.
    async fn list(&self) -> Result<Vec<Post>, PostPersistenceError>;

    /// Fetch a post by identifier.
    async fn find(&self, id: PostId) -> Result<Option<Post>, PostPersistenceError>;

    /// Insert a post and return it with its assigned id.
    async fn insert(&self, post: NewPost) -> Result<Post, PostPersistenceError>;

    /// Replace the editable fields of a post; date and owner are kept.
    ///
    /// Returns `None` when no post has the id.
    async fn update(
        &self,
        id: PostId,
        content: PostDraft,
    ) -> Result<Option<Post>, PostPersistenceError>;

    /// Delete a post and every comment attached to it in one transaction.
    ///
    /// Returns `false` when no post has the id.
    async fn delete(&self, id: PostId) -> Result<bool, PostPersistenceError>;
}
