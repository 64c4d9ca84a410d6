//! In-memory blog store for tests and database-less development.
//!
//! One `parking_lot::Mutex` guards users, posts and comments together, so
//! every uniqueness check happens atomically with the insert that follows it
//! and a post delete removes its comments in the same critical section.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::ports::{
    CommentPersistenceError, CommentRepository, PostPersistenceError, PostRepository,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    Comment, CommentDetail, CommentId, CommentText, NewComment, NewPost, NewUser, Post,
    PostDraft, PostId, Role, User, UserId,
};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    posts: BTreeMap<PostId, Post>,
    comments: BTreeMap<CommentId, Comment>,
    next_user: i32,
    next_post: i32,
    next_comment: i32,
}

fn next_id(counter: &mut i32) -> i32 {
    *counter += 1;
    *counter
}

/// Thread-safe store implementing every repository port.
#[derive(Debug, Default)]
pub struct InMemoryBlogStore {
    tables: Mutex<Tables>,
}

impl InMemoryBlogStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user, enforcing unique email, unique display name and a
    /// single admin.
    pub fn insert_user(&self, user: NewUser) -> Result<User, UserPersistenceError> {
        let mut tables = self.tables.lock();
        let clash = tables.users.values().any(|existing| {
            existing.email() == &user.email || existing.display_name() == &user.display_name
        });
        if clash {
            return Err(UserPersistenceError::duplicate());
        }
        if user.role == Role::Admin
            && tables
                .users
                .values()
                .any(|existing| existing.role() == Role::Admin)
        {
            return Err(UserPersistenceError::admin_exists());
        }
        let id = UserId::new(next_id(&mut tables.next_user));
        let stored = user.into_user(id);
        tables.users.insert(id, stored.clone());
        Ok(stored)
    }

    /// Insert a post, enforcing unique titles.
    pub fn insert_post(&self, post: NewPost) -> Result<Post, PostPersistenceError> {
        let mut tables = self.tables.lock();
        if title_taken(&tables, &post.content.title, None) {
            return Err(PostPersistenceError::duplicate_title());
        }
        let id = PostId::new(next_id(&mut tables.next_post));
        let stored = Post {
            id,
            content: post.content,
            date: post.date,
            owner: post.owner,
        };
        tables.posts.insert(id, stored.clone());
        Ok(stored)
    }

    /// Remove a post and its comments. Returns `false` when absent.
    pub fn remove_post(&self, id: PostId) -> Result<bool, PostPersistenceError> {
        let mut tables = self.tables.lock();
        if tables.posts.remove(&id).is_none() {
            return Ok(false);
        }
        tables.comments.retain(|_, comment| comment.post != id);
        Ok(true)
    }
}

fn title_taken(tables: &Tables, title: &str, except: Option<PostId>) -> bool {
    tables
        .posts
        .values()
        .any(|post| post.content.title == title && Some(post.id) != except)
}

#[async_trait]
impl UserRepository for InMemoryBlogStore {
    async fn insert(&self, user: NewUser) -> Result<User, UserPersistenceError> {
        self.insert_user(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.tables.lock().users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .tables
            .lock()
            .users
            .values()
            .find(|user| user.email().as_ref() == email)
            .cloned())
    }

    async fn find_by_display_name(
        &self,
        display_name: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .tables
            .lock()
            .users
            .values()
            .find(|user| user.display_name().as_ref() == display_name)
            .cloned())
    }

    async fn any_exists(&self) -> Result<bool, UserPersistenceError> {
        Ok(!self.tables.lock().users.is_empty())
    }
}

#[async_trait]
impl PostRepository for InMemoryBlogStore {
    async fn list(&self) -> Result<Vec<Post>, PostPersistenceError> {
        Ok(self.tables.lock().posts.values().cloned().collect())
    }

    async fn find(&self, id: PostId) -> Result<Option<Post>, PostPersistenceError> {
        Ok(self.tables.lock().posts.get(&id).cloned())
    }

    async fn insert(&self, post: NewPost) -> Result<Post, PostPersistenceError> {
        self.insert_post(post)
    }

    async fn update(
        &self,
        id: PostId,
        content: PostDraft,
    ) -> Result<Option<Post>, PostPersistenceError> {
        let mut tables = self.tables.lock();
        if title_taken(&tables, &content.title, Some(id)) {
            return Err(PostPersistenceError::duplicate_title());
        }
        Ok(tables.posts.get_mut(&id).map(|post| {
            post.content = content;
            post.clone()
        }))
    }

    async fn delete(&self, id: PostId) -> Result<bool, PostPersistenceError> {
        self.remove_post(id)
    }
}

#[async_trait]
impl CommentRepository for InMemoryBlogStore {
    async fn list_for_post(
        &self,
        post: PostId,
    ) -> Result<Vec<CommentDetail>, CommentPersistenceError> {
        let tables = self.tables.lock();
        tables
            .comments
            .values()
            .filter(|comment| comment.post == post)
            .map(|comment| {
                let author = tables
                    .users
                    .get(&comment.author)
                    .ok_or_else(CommentPersistenceError::missing_parent)?;
                Ok(CommentDetail {
                    comment: comment.clone(),
                    author_name: author.display_name().to_string(),
                    author_avatar: author.avatar_url().to_owned(),
                })
            })
            .collect()
    }

    async fn find(&self, id: CommentId) -> Result<Option<Comment>, CommentPersistenceError> {
        Ok(self.tables.lock().comments.get(&id).cloned())
    }

    async fn insert(&self, comment: NewComment) -> Result<Comment, CommentPersistenceError> {
        let mut tables = self.tables.lock();
        if !tables.posts.contains_key(&comment.post) || !tables.users.contains_key(&comment.author)
        {
            return Err(CommentPersistenceError::missing_parent());
        }
        let id = CommentId::new(next_id(&mut tables.next_comment));
        let stored = Comment {
            id,
            text: comment.text.into(),
            author: comment.author,
            post: comment.post,
        };
        tables.comments.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        id: CommentId,
        text: CommentText,
    ) -> Result<Option<Comment>, CommentPersistenceError> {
        Ok(self.tables.lock().comments.get_mut(&id).map(|comment| {
            comment.text = text.into();
            comment.clone()
        }))
    }

    async fn delete(&self, id: CommentId) -> Result<bool, CommentPersistenceError> {
        Ok(self.tables.lock().comments.remove(&id).is_some())
    }
}
