//! PostgreSQL-backed `PostRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use tracing::debug;

use crate::domain::ports::{PostPersistenceError, PostRepository};
use crate::domain::{NewPost, Post, PostDraft, PostId, UserId};

use super::diesel_error_mapping::StoreFailure;
use super::models::{NewPostRow, PostRow, PostUpdate};
use super::pool::DbPool;
use super::schema::{comments, posts};

/// Diesel implementation of post storage.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_failure(failure: impl Into<StoreFailure>) -> PostPersistenceError {
    match failure.into() {
        StoreFailure::Connection(message) => PostPersistenceError::connection(message),
        StoreFailure::Unique(_) => PostPersistenceError::duplicate_title(),
        StoreFailure::ForeignKey => PostPersistenceError::query("post owner does not exist"),
        StoreFailure::Query(message) => PostPersistenceError::query(message),
    }
}

fn row_to_post(row: PostRow) -> Post {
    Post {
        id: PostId::new(row.id),
        content: PostDraft {
            title: row.title,
            subtitle: row.subtitle,
            author: row.author,
            img_url: row.img_url,
            body: row.body,
        },
        date: row.date,
        owner: UserId::new(row.owner_id),
    }
}

fn update_row(draft: &PostDraft) -> PostUpdate<'_> {
    PostUpdate {
        title: &draft.title,
        subtitle: &draft.subtitle,
        author: &draft.author,
        img_url: &draft.img_url,
        body: &draft.body,
    }
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn list(&self) -> Result<Vec<Post>, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let rows: Vec<PostRow> = posts::table
            .select(PostRow::as_select())
            .order_by(posts::id)
            .load(&mut conn)
            .await
            .map_err(map_failure)?;
        Ok(rows.into_iter().map(row_to_post).collect())
    }

    async fn find(&self, id: PostId) -> Result<Option<Post>, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let row = posts::table
            .find(id.get())
            .select(PostRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_failure)?;
        Ok(row.map(row_to_post))
    }

    async fn insert(&self, post: NewPost) -> Result<Post, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let row = NewPostRow {
            title: &post.content.title,
            subtitle: &post.content.subtitle,
            author: &post.content.author,
            img_url: &post.content.img_url,
            body: &post.content.body,
            date: &post.date,
            owner_id: post.owner.get(),
        };
        let stored: PostRow = diesel::insert_into(posts::table)
            .values(&row)
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_failure)?;
        Ok(row_to_post(stored))
    }

    async fn update(
        &self,
        id: PostId,
        content: PostDraft,
    ) -> Result<Option<Post>, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let row = diesel::update(posts::table.find(id.get()))
            .set(&update_row(&content))
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_failure)?;
        Ok(row.map(row_to_post))
    }

    async fn delete(&self, id: PostId) -> Result<bool, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let raw = id.get();
        let (removed_comments, removed_posts) = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let removed_comments =
                        diesel::delete(comments::table.filter(comments::post_id.eq(raw)))
                            .execute(conn)
                            .await?;
                    let removed_posts = diesel::delete(posts::table.find(raw))
                        .execute(conn)
                        .await?;
                    Ok((removed_comments, removed_posts))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_failure)?;
        debug!(post_id = raw, removed_comments, "deleted post rows");
        Ok(removed_posts > 0)
    }
}
