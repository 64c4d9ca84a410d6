//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`) are implemented by domain services and
//! called by inbound adapters. Driven ports (`*Repository`, `PasswordHasher`,
//! `ContactNotifier`) are implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod comment_repository;
mod comments_command;
mod contact_command;
mod contact_notifier;
mod password_hasher;
mod post_repository;
mod posts_command;
mod posts_query;
mod user_repository;

#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_command::{ACCOUNT_EXISTS_MESSAGE, AccountCommand, LOGIN_FAILED_MESSAGE};
#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comment_repository::{CommentPersistenceError, CommentRepository};
#[cfg(test)]
pub use comments_command::{MockCommentsCommand, MockCommentsQuery};
pub use comments_command::{CommentsCommand, CommentsQuery};
#[cfg(test)]
pub use contact_command::MockContactCommand;
pub use contact_command::ContactCommand;
#[cfg(test)]
pub use contact_notifier::MockContactNotifier;
pub use contact_notifier::{ContactNotifier, ContactNotifierError};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::{PostPersistenceError, PostRepository};
#[cfg(test)]
pub use posts_command::MockPostsCommand;
pub use posts_command::PostsCommand;
#[cfg(test)]
pub use posts_query::MockPostsQuery;
pub use posts_query::PostsQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
