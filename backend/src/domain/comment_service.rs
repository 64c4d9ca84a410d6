//! Comment creation and moderation service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{CommentRepository, CommentsCommand, CommentsQuery, PostRepository};
use crate::domain::policy::{Action, authorize};
use crate::domain::post_service::{map_comment_error, map_post_error};
use crate::domain::{Comment, CommentId, CommentText, Error, Identity, NewComment, PostId};

/// Comment service implementing the comment driving ports.
#[derive(Clone)]
pub struct CommentService<P, C> {
    posts: Arc<P>,
    comments: Arc<C>,
}

impl<P, C> CommentService<P, C> {
    /// Create a new service over the post and comment stores.
    pub fn new(posts: Arc<P>, comments: Arc<C>) -> Self {
        Self { posts, comments }
    }
}

fn comment_not_found() -> Error {
    Error::not_found_or_denied()
}

impl<P, C> CommentService<P, C>
where
    P: PostRepository,
    C: CommentRepository,
{
    async fn existing(&self, id: CommentId) -> Result<Comment, Error> {
        self.comments
            .find(id)
            .await
            .map_err(map_comment_error)?
            .ok_or_else(comment_not_found)
    }
}

#[async_trait]
impl<P, C> CommentsQuery for CommentService<P, C>
where
    P: PostRepository,
    C: CommentRepository,
{
    async fn comment(&self, id: CommentId) -> Result<Comment, Error> {
        self.existing(id).await
    }
}

#[async_trait]
impl<P, C> CommentsCommand for CommentService<P, C>
where
    P: PostRepository,
    C: CommentRepository,
{
    async fn add_comment(
        &self,
        identity: Identity,
        post: PostId,
        text: CommentText,
    ) -> Result<Comment, Error> {
        authorize(Some(&identity), Action::CreateComment).require()?;
        if self
            .posts
            .find(post)
            .await
            .map_err(map_post_error)?
            .is_none()
        {
            return Err(Error::not_found_or_denied());
        }
        let comment = self
            .comments
            .insert(NewComment {
                text,
                author: identity.id,
                post,
            })
            .await
            .map_err(map_comment_error)?;
        info!(comment_id = %comment.id, %post, user_id = %identity.id, "added comment");
        Ok(comment)
    }

    async fn update_comment(
        &self,
        identity: Identity,
        id: CommentId,
        text: CommentText,
    ) -> Result<Comment, Error> {
        let existing = self.existing(id).await?;
        authorize(Some(&identity), Action::EditComment(&existing)).require()?;
        let updated = self
            .comments
            .update(id, text)
            .await
            .map_err(map_comment_error)?
            .ok_or_else(comment_not_found)?;
        info!(comment_id = %id, user_id = %identity.id, "updated comment");
        Ok(updated)
    }

    async fn delete_comment(&self, identity: Identity, id: CommentId) -> Result<Comment, Error> {
        let existing = self.existing(id).await?;
        authorize(Some(&identity), Action::DeleteComment(&existing)).require()?;
        if !self.comments.delete(id).await.map_err(map_comment_error)? {
            return Err(comment_not_found());
        }
        info!(comment_id = %id, user_id = %identity.id, "deleted comment");
        Ok(existing)
    }
}
