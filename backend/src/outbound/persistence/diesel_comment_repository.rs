//! PostgreSQL-backed `CommentRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CommentPersistenceError, CommentRepository};
use crate::domain::{
    Comment, CommentDetail, CommentId, CommentText, NewComment, PostId, UserId,
};

use super::diesel_error_mapping::StoreFailure;
use super::models::{CommentRow, NewCommentRow};
use super::pool::DbPool;
use super::schema::{comments, users};

/// Diesel implementation of comment storage.
#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_failure(failure: impl Into<StoreFailure>) -> CommentPersistenceError {
    match failure.into() {
        StoreFailure::Connection(message) => CommentPersistenceError::connection(message),
        StoreFailure::ForeignKey => CommentPersistenceError::missing_parent(),
        StoreFailure::Unique(_) => CommentPersistenceError::query("unexpected unique violation"),
        StoreFailure::Query(message) => CommentPersistenceError::query(message),
    }
}

fn row_to_comment(row: CommentRow) -> Comment {
    Comment {
        id: CommentId::new(row.id),
        text: row.text,
        author: UserId::new(row.author_id),
        post: PostId::new(row.post_id),
    }
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn list_for_post(
        &self,
        post: PostId,
    ) -> Result<Vec<CommentDetail>, CommentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let rows: Vec<(CommentRow, String, String)> = comments::table
            .inner_join(users::table)
            .filter(comments::post_id.eq(post.get()))
            .order_by(comments::id)
            .select((CommentRow::as_select(), users::display_name, users::avatar_url))
            .load(&mut conn)
            .await
            .map_err(map_failure)?;
        Ok(rows
            .into_iter()
            .map(|(row, author_name, author_avatar)| CommentDetail {
                comment: row_to_comment(row),
                author_name,
                author_avatar,
            })
            .collect())
    }

    async fn find(&self, id: CommentId) -> Result<Option<Comment>, CommentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let row = comments::table
            .find(id.get())
            .select(CommentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_failure)?;
        Ok(row.map(row_to_comment))
    }

    async fn insert(&self, comment: NewComment) -> Result<Comment, CommentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let row = NewCommentRow {
            text: comment.text.as_ref(),
            author_id: comment.author.get(),
            post_id: comment.post.get(),
        };
        let stored: CommentRow = diesel::insert_into(comments::table)
            .values(&row)
            .returning(CommentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_failure)?;
        Ok(row_to_comment(stored))
    }

    async fn update(
        &self,
        id: CommentId,
        text: CommentText,
    ) -> Result<Option<Comment>, CommentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let row = diesel::update(comments::table.find(id.get()))
            .set(comments::text.eq(text.as_ref()))
            .returning(CommentRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_failure)?;
        Ok(row.map(row_to_comment))
    }

    async fn delete(&self, id: CommentId) -> Result<bool, CommentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let removed = diesel::delete(comments::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_failure)?;
        Ok(removed > 0)
    }
}
