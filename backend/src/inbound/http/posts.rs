//! Post handlers.
//!
//! ```text
//! GET  /                 post list
//! GET  /post/{id}        post with comments and the comment form
//! POST /post/{id}        add a comment
//! GET  /new-post         empty post form (admin)
//! POST /new-post         publish a post (admin)
//! GET  /edit-post/{id}   pre-filled post form (admin)
//! POST /edit-post/{id}   save a post (admin)
//! GET  /delete/{id}      delete a post and its comments (admin)
//! ```
//!
//! Authorization runs before form validation, so a denied caller learns
//! nothing about the form.

use actix_web::{HttpResponse, get, post, web};

use crate::domain::policy::Action;
use crate::domain::{Post, PostId};

use super::ApiResult;
use super::forms::{CommentForm, PostForm};
use super::schemas::ErrorSchema;
use super::session::SessionContext;
use super::state::HttpState;
use super::viewer::Viewer;
use super::views::{
    FormState, FormView, HomeView, Layout, PostSummary, PostView, see_other, with_layout,
};

fn post_path(id: PostId) -> String {
    format!("/post/{id}")
}

fn post_form(action: String, post: &Post) -> FormState {
    FormState::empty("post", action)
        .with_value("title", post.content.title.as_str())
        .with_value("subtitle", post.content.subtitle.as_str())
        .with_value("author", post.content.author.as_str())
        .with_value("img_url", post.content.img_url.as_str())
        .with_value("body", post.content.body.as_str())
}

/// List every post in id order.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "All posts", body = HomeView),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["posts"]
)]
#[get("/")]
pub async fn home(
    state: web::Data<HttpState>,
    viewer: Viewer,
    session: SessionContext,
) -> ApiResult<web::Json<HomeView>> {
    let posts = state.posts_query.list_posts().await?;
    Ok(web::Json(HomeView {
        layout: Layout::new(&viewer, &session),
        posts: posts.iter().map(PostSummary::from).collect(),
    }))
}

/// Show one post with its comments.
#[utoipa::path(
    get,
    path = "/post/{post_id}",
    params(("post_id" = i32, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post page", body = PostView),
        (status = 404, description = "No such post", body = ErrorSchema)
    ),
    tags = ["posts"]
)]
#[get("/post/{post_id}")]
pub async fn show_post(
    state: web::Data<HttpState>,
    viewer: Viewer,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<web::Json<PostView>> {
    let id = PostId::new(path.into_inner());
    let detail = state.posts_query.post_detail(id).await?;
    let layout = Layout::new(&viewer, &session);
    let form = FormState::empty("comment", post_path(id));
    Ok(web::Json(PostView::new(layout, &viewer, &detail, form)))
}

/// Add a comment as the signed-in user.
#[utoipa::path(
    post,
    path = "/post/{post_id}",
    params(("post_id" = i32, Path, description = "Post identifier")),
    request_body(content = CommentForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Comment added; redirects to the post"),
        (status = 400, description = "Empty comment", body = ErrorSchema),
        (status = 404, description = "Not signed in, or no such post", body = ErrorSchema)
    ),
    tags = ["comments"],
    security(("SessionCookie" = []))
)]
#[post("/post/{post_id}")]
pub async fn add_comment(
    state: web::Data<HttpState>,
    viewer: Viewer,
    session: SessionContext,
    path: web::Path<i32>,
    form: web::Form<CommentForm>,
) -> ApiResult<HttpResponse> {
    let identity = viewer.require(Action::CreateComment)?;
    let text = form
        .validate()
        .map_err(|err| with_layout(err, &viewer, &session))?;
    let id = PostId::new(path.into_inner());
    state.comments.add_comment(identity, id, text).await?;
    Ok(see_other(post_path(id)))
}

/// Empty post form with the author pre-filled.
#[utoipa::path(
    get,
    path = "/new-post",
    responses(
        (status = 200, description = "Post form", body = FormView),
        (status = 404, description = "Not an admin", body = ErrorSchema)
    ),
    tags = ["posts"],
    security(("SessionCookie" = []))
)]
#[get("/new-post")]
pub async fn new_post_form(
    viewer: Viewer,
    session: SessionContext,
) -> ApiResult<web::Json<FormView>> {
    viewer.authorize(Action::CreatePost)?;
    let author = viewer
        .user()
        .map(|user| user.display_name().to_string())
        .unwrap_or_default();
    Ok(web::Json(FormView {
        layout: Layout::new(&viewer, &session),
        form: FormState::empty("post", "/new-post").with_value("author", author),
    }))
}

/// Publish a post dated today.
#[utoipa::path(
    post,
    path = "/new-post",
    request_body(content = PostForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Published; redirects to `/`"),
        (status = 400, description = "Form validation failed", body = ErrorSchema),
        (status = 404, description = "Not an admin", body = ErrorSchema),
        (status = 409, description = "Title already used", body = ErrorSchema)
    ),
    tags = ["posts"],
    security(("SessionCookie" = []))
)]
#[post("/new-post")]
pub async fn create_post(
    state: web::Data<HttpState>,
    viewer: Viewer,
    session: SessionContext,
    form: web::Form<PostForm>,
) -> ApiResult<HttpResponse> {
    let identity = viewer.require(Action::CreatePost)?;
    let draft = form
        .validate()
        .map_err(|err| with_layout(err, &viewer, &session))?;
    state.posts.create_post(identity, draft).await?;
    Ok(see_other("/"))
}

/// Post form pre-filled with the stored content.
#[utoipa::path(
    get,
    path = "/edit-post/{post_id}",
    params(("post_id" = i32, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post form", body = FormView),
        (status = 404, description = "Not an admin, or no such post", body = ErrorSchema)
    ),
    tags = ["posts"],
    security(("SessionCookie" = []))
)]
#[get("/edit-post/{post_id}")]
pub async fn edit_post_form(
    state: web::Data<HttpState>,
    viewer: Viewer,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<web::Json<FormView>> {
    viewer.authorize(Action::EditPost)?;
    let id = PostId::new(path.into_inner());
    let post = state.posts_query.post(id).await?;
    Ok(web::Json(FormView {
        layout: Layout::new(&viewer, &session),
        form: post_form(format!("/edit-post/{id}"), &post),
    }))
}

/// Replace a post's content. The creation date is kept.
#[utoipa::path(
    post,
    path = "/edit-post/{post_id}",
    params(("post_id" = i32, Path, description = "Post identifier")),
    request_body(content = PostForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Saved; redirects to the post"),
        (status = 400, description = "Form validation failed", body = ErrorSchema),
        (status = 404, description = "Not an admin, or no such post", body = ErrorSchema),
        (status = 409, description = "Title already used", body = ErrorSchema)
    ),
    tags = ["posts"],
    security(("SessionCookie" = []))
)]
#[post("/edit-post/{post_id}")]
pub async fn update_post(
    state: web::Data<HttpState>,
    viewer: Viewer,
    session: SessionContext,
    path: web::Path<i32>,
    form: web::Form<PostForm>,
) -> ApiResult<HttpResponse> {
    let identity = viewer.require(Action::EditPost)?;
    let draft = form
        .validate()
        .map_err(|err| with_layout(err, &viewer, &session))?;
    let id = PostId::new(path.into_inner());
    state.posts.update_post(identity, id, draft).await?;
    Ok(see_other(post_path(id)))
}

/// Delete a post and every comment on it.
#[utoipa::path(
    get,
    path = "/delete/{post_id}",
    params(("post_id" = i32, Path, description = "Post identifier")),
    responses(
        (status = 303, description = "Deleted; redirects to `/`"),
        (status = 404, description = "Not an admin, or no such post", body = ErrorSchema)
    ),
    tags = ["posts"],
    security(("SessionCookie" = []))
)]
#[get("/delete/{post_id}")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    viewer: Viewer,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let identity = viewer.require(Action::DeletePost)?;
    state
        .posts
        .delete_post(identity, PostId::new(path.into_inner()))
        .await?;
    Ok(see_other("/"))
}
