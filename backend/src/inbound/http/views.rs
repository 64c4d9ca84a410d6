//! JSON view models returned by page handlers.
//!
//! Each view is the data a template would receive: the page content plus a
//! shared [`Layout`] block with the signed-in user and pending flashes.

use std::collections::BTreeMap;

use actix_web::HttpResponse;
use actix_web::http::header;
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::policy::{Action, authorize};
use crate::domain::{CommentDetail, Error, Identity, Post, PostDetail, User};

use super::session::{Flash, SessionContext};
use super::viewer::Viewer;

/// Public profile of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserView {
    pub display_name: String,
    /// Gravatar image URL.
    pub avatar: String,
    pub is_admin: bool,
}

impl From<&User> for CurrentUserView {
    fn from(user: &User) -> Self {
        Self {
            display_name: user.display_name().to_string(),
            avatar: user.avatar_url().to_owned(),
            is_admin: user.identity().is_admin(),
        }
    }
}

/// Fields shared by every page.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub current_user: Option<CurrentUserView>,
    pub flashes: Vec<Flash>,
}

impl Layout {
    /// Build the layout, draining the session's flashes.
    pub fn new(viewer: &Viewer, session: &SessionContext) -> Self {
        Self {
            current_user: viewer.current_user(),
            flashes: session.take_flashes(),
        }
    }
}

/// Merge the page layout into a form validation error's details.
///
/// The 400 payload then carries `currentUser` and `flashes` next to the
/// form's values and messages, so the client can redraw the whole page.
/// Errors without object details pass through untouched.
pub fn with_layout(error: Error, viewer: &Viewer, session: &SessionContext) -> Error {
    let Some(Value::Object(details)) = error.details() else {
        return error;
    };
    let mut details = details.clone();
    match serde_json::to_value(Layout::new(viewer, session)) {
        Ok(Value::Object(layout)) => details.extend(layout),
        _ => return error,
    }
    error.with_details(Value::Object(details))
}

/// A form to render: its name, where it posts to and pre-filled values.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    pub name: String,
    pub action: String,
    pub values: BTreeMap<String, String>,
}

impl FormState {
    /// A form with no pre-filled values.
    pub fn empty(name: &str, action: impl Into<String>) -> Self {
        Self {
            name: name.to_owned(),
            action: action.into(),
            values: BTreeMap::new(),
        }
    }

    /// Pre-fill one field.
    #[must_use]
    pub fn with_value(mut self, field: &str, value: impl Into<String>) -> Self {
        self.values.insert(field.to_owned(), value.into());
        self
    }
}

/// Post as listed on the home page.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: i32,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub date: String,
}

impl From<&Post> for PostSummary {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.get(),
            title: post.content.title.clone(),
            subtitle: post.content.subtitle.clone(),
            author: post.content.author.clone(),
            date: post.date.clone(),
        }
    }
}

/// `GET /`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HomeView {
    #[serde(flatten)]
    pub layout: Layout,
    pub posts: Vec<PostSummary>,
}

/// Full post content.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostBody {
    pub id: i32,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub date: String,
    pub img_url: String,
    /// Trusted HTML authored by the admin.
    pub body: String,
}

impl From<&Post> for PostBody {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.get(),
            title: post.content.title.clone(),
            subtitle: post.content.subtitle.clone(),
            author: post.content.author.clone(),
            date: post.date.clone(),
            img_url: post.content.img_url.clone(),
            body: post.content.body.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: i32,
    pub text: String,
    pub author_name: String,
    pub author_avatar: String,
    /// Whether the viewer may edit or delete this comment.
    pub can_modify: bool,
}

impl CommentView {
    fn new(detail: &CommentDetail, identity: Option<&Identity>) -> Self {
        Self {
            id: detail.comment.id.get(),
            text: detail.comment.text.clone(),
            author_name: detail.author_name.clone(),
            author_avatar: detail.author_avatar.clone(),
            can_modify: authorize(identity, Action::EditComment(&detail.comment)).is_allowed(),
        }
    }
}

/// `GET /post/{id}` and `GET /edit-comment/{id}`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    #[serde(flatten)]
    pub layout: Layout,
    pub post: PostBody,
    pub comments: Vec<CommentView>,
    /// Whether the viewer may edit or delete the post.
    pub can_edit: bool,
    pub comment_form: FormState,
}

impl PostView {
    pub fn new(
        layout: Layout,
        viewer: &Viewer,
        detail: &PostDetail,
        comment_form: FormState,
    ) -> Self {
        let identity = viewer.identity();
        Self {
            layout,
            post: PostBody::from(&detail.post),
            comments: detail
                .comments
                .iter()
                .map(|comment| CommentView::new(comment, identity.as_ref()))
                .collect(),
            can_edit: authorize(identity.as_ref(), Action::EditPost).is_allowed(),
            comment_form,
        }
    }
}

/// A page consisting of one form.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    #[serde(flatten)]
    pub layout: Layout,
    pub form: FormState,
}

/// A static page, optionally with a confirmation message.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    #[serde(flatten)]
    pub layout: Layout,
    pub heading: String,
    pub message: Option<String>,
}

/// `303 See Other` to `location`.
pub fn see_other(location: impl AsRef<str>) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.as_ref()))
        .finish()
}
