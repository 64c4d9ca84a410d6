//! Post reading and authoring service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    CommentPersistenceError, CommentRepository, PostPersistenceError, PostRepository,
    PostsCommand, PostsQuery,
};
use crate::domain::policy::{Action, authorize};
use crate::domain::{
    Error, Identity, NewPost, Post, PostDetail, PostDraft, PostId, format_post_date,
};

const DUPLICATE_TITLE_MESSAGE: &str = "A post with that title already exists.";

/// Post service implementing the post driving ports.
#[derive(Clone)]
pub struct PostService<P, C> {
    posts: Arc<P>,
    comments: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<P, C> PostService<P, C> {
    /// Create a new service. `clock` supplies the creation date of new posts.
    pub fn new(posts: Arc<P>, comments: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            posts,
            comments,
            clock,
        }
    }
}

pub(crate) fn map_post_error(error: PostPersistenceError) -> Error {
    match error {
        PostPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("post repository unavailable: {message}"))
        }
        PostPersistenceError::Query { message } => {
            Error::internal(format!("post repository error: {message}"))
        }
        PostPersistenceError::DuplicateTitle => Error::conflict(DUPLICATE_TITLE_MESSAGE),
    }
}

pub(crate) fn map_comment_error(error: CommentPersistenceError) -> Error {
    match error {
        CommentPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("comment repository unavailable: {message}"))
        }
        CommentPersistenceError::Query { message } => {
            Error::internal(format!("comment repository error: {message}"))
        }
        CommentPersistenceError::MissingParent => Error::not_found_or_denied(),
    }
}

fn post_not_found() -> Error {
    Error::not_found_or_denied()
}

#[async_trait]
impl<P, C> PostsQuery for PostService<P, C>
where
    P: PostRepository,
    C: CommentRepository,
{
    async fn list_posts(&self) -> Result<Vec<Post>, Error> {
        authorize(None, Action::ViewPosts).require()?;
        self.posts.list().await.map_err(map_post_error)
    }

    async fn post(&self, id: PostId) -> Result<Post, Error> {
        authorize(None, Action::ViewPost).require()?;
        self.posts
            .find(id)
            .await
            .map_err(map_post_error)?
            .ok_or_else(post_not_found)
    }

    async fn post_detail(&self, id: PostId) -> Result<PostDetail, Error> {
        let post = self.post(id).await?;
        let comments = self
            .comments
            .list_for_post(id)
            .await
            .map_err(map_comment_error)?;
        Ok(PostDetail { post, comments })
    }
}

#[async_trait]
impl<P, C> PostsCommand for PostService<P, C>
where
    P: PostRepository,
    C: CommentRepository,
{
    async fn create_post(&self, identity: Identity, draft: PostDraft) -> Result<Post, Error> {
        authorize(Some(&identity), Action::CreatePost).require()?;
        let post = self
            .posts
            .insert(NewPost {
                content: draft,
                date: format_post_date(self.clock.utc().date_naive()),
                owner: identity.id,
            })
            .await
            .map_err(map_post_error)?;
        info!(post_id = %post.id, user_id = %identity.id, "created post");
        Ok(post)
    }

    async fn update_post(
        &self,
        identity: Identity,
        id: PostId,
        draft: PostDraft,
    ) -> Result<Post, Error> {
        authorize(Some(&identity), Action::EditPost).require()?;
        let post = self
            .posts
            .update(id, draft)
            .await
            .map_err(map_post_error)?
            .ok_or_else(post_not_found)?;
        info!(post_id = %id, user_id = %identity.id, "updated post");
        Ok(post)
    }

    async fn delete_post(&self, identity: Identity, id: PostId) -> Result<(), Error> {
        authorize(Some(&identity), Action::DeletePost).require()?;
        if !self.posts.delete(id).await.map_err(map_post_error)? {
            return Err(post_not_found());
        }
        info!(post_id = %id, user_id = %identity.id, "deleted post and its comments");
        Ok(())
    }
}
