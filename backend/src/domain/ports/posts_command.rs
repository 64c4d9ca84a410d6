//! Driving port for authoring posts.
//!
//! Every operation re-checks the authorization policy; callers that are not
//! admins receive `NotFound`.

use async_trait::async_trait;

use crate::domain::{Error, Identity, Post, PostDraft, PostId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsCommand: Send + Sync {
    /// Publish a post dated today and owned by `identity`.
    async fn create_post(&self, identity: Identity, draft: PostDraft) -> Result<Post, Error>;

    /// Replace a post's editable fields.
    async fn update_post(
        &self,
        identity: Identity,
        id: PostId,
        draft: PostDraft,
    ) -> Result<Post, Error>;

    /// Delete a post together with its comments.
    async fn delete_post(&self, identity: Identity, id: PostId) -> Result<(), Error>;
}
