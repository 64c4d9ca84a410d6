//! Shared HTTP adapter state.
//!
//! Handlers receive this bundle through `actix_web::web::Data` and only ever
//! talk to driving ports, so tests can assemble it from in-memory adapters.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AccountCommand, CommentRepository, CommentsCommand, CommentsQuery, ContactCommand,
    ContactNotifier, PasswordHasher, PostRepository, PostsCommand, PostsQuery, UserRepository,
};
use crate::domain::{AccountService, CommentService, ContactService, PostService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountCommand>,
    pub posts_query: Arc<dyn PostsQuery>,
    pub posts: Arc<dyn PostsCommand>,
    pub comments_query: Arc<dyn CommentsQuery>,
    pub comments: Arc<dyn CommentsCommand>,
    pub contact: Arc<dyn ContactCommand>,
}

/// Driven adapters the domain services are built over.
pub struct ServiceAdapters<U, P, C, H, N> {
    pub users: Arc<U>,
    pub posts: Arc<P>,
    pub comments: Arc<C>,
    pub hasher: Arc<H>,
    pub notifier: Arc<N>,
    /// Supplies the creation date of new posts.
    pub clock: Arc<dyn Clock>,
}

impl HttpState {
    /// Build the domain services over `adapters` and expose them as ports.
    pub fn from_adapters<U, P, C, H, N>(adapters: ServiceAdapters<U, P, C, H, N>) -> Self
    where
        U: UserRepository + 'static,
        P: PostRepository + 'static,
        C: CommentRepository + 'static,
        H: PasswordHasher + 'static,
        N: ContactNotifier + 'static,
    {
        let ServiceAdapters {
            users,
            posts,
            comments,
            hasher,
            notifier,
            clock,
        } = adapters;
        let post_service = Arc::new(PostService::new(posts.clone(), comments.clone(), clock));
        let comment_service = Arc::new(CommentService::new(posts, comments));
        Self {
            accounts: Arc::new(AccountService::new(users, hasher)),
            posts_query: post_service.clone(),
            posts: post_service,
            comments_query: comment_service.clone(),
            comments: comment_service,
            contact: Arc::new(ContactService::new(notifier)),
        }
    }
}
