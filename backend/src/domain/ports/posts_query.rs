//! Driving port for reading posts.

use async_trait::async_trait;

use crate::domain::{Error, Post, PostDetail, PostId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsQuery: Send + Sync {
    /// Every post in ascending id order.
    async fn list_posts(&self) -> Result<Vec<Post>, Error>;

    /// A single post. Missing posts yield `NotFound`.
    async fn post(&self, id: PostId) -> Result<Post, Error>;

    /// A post with its comments and their authors.
    async fn post_detail(&self, id: PostId) -> Result<PostDetail, Error>;
}
