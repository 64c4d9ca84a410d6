//! Domain primitives, services and ports.
//!
//! Purpose: define the blog's entities (users, posts, comments), the
//! authorization policy deciding who may act on them, and the services that
//! implement the driving ports over the driven ports in [`ports`].
//!
//! Public surface:
//! - `Error`/`ErrorCode`: transport-agnostic failure payload.
//! - `User`, `Post`, `Comment` and their validated inputs.
//! - `policy::authorize`: pure authorization decision.
//! - `AccountService`, `PostService`, `CommentService`, `ContactService`.

pub mod account_service;
pub mod auth;
pub mod avatar;
pub mod comment;
pub mod comment_service;
pub mod contact;
pub mod contact_service;
pub mod error;
pub mod policy;
pub mod ports;
pub mod post;
pub mod post_service;
pub mod trace_id;
pub mod user;
pub mod validation;

pub use self::account_service::AccountService;
pub use self::auth::{LoginCredentials, PASSWORD_MIN, Registration, RegistrationInput};
pub use self::avatar::gravatar_url;
pub use self::comment::{
    Comment, CommentDetail, CommentId, CommentText, NewComment, PostDetail,
};
pub use self::comment_service::CommentService;
pub use self::contact::{ContactInput, ContactMessage};
pub use self::contact_service::ContactService;
pub use self::error::{Error, ErrorCode, NOT_FOUND_MESSAGE};
pub use self::post::{NewPost, Post, PostDraft, PostId, PostInput, format_post_date};
pub use self::post_service::PostService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    DISPLAY_NAME_MAX, DISPLAY_NAME_MIN, DisplayName, EmailAddress, Identity, NewUser,
    PasswordHash, Role, User, UserId, UserValidationError,
};
pub use self::validation::FieldErrors;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use blog::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
