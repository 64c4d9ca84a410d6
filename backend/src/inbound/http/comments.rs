//! Comment moderation handlers.
//!
//! ```text
//! GET  /edit-comment/{id}     post page with the comment form pre-filled
//! POST /edit-comment/{id}     save the comment
//! GET  /delete-comment/{id}   delete the comment
//! ```
//!
//! Only the comment's author or the admin passes the policy check; everyone
//! else gets the same 404 as for a missing comment.

use actix_web::{HttpResponse, get, post, web};

use crate::domain::CommentId;
use crate::domain::policy::Action;

use super::ApiResult;
use super::forms::CommentForm;
use super::schemas::ErrorSchema;
use super::session::SessionContext;
use super::state::HttpState;
use super::viewer::Viewer;
use super::views::{FormState, Layout, PostView, see_other, with_layout};

/// Post page whose comment form edits an existing comment.
#[utoipa::path(
    get,
    path = "/edit-comment/{comment_id}",
    params(("comment_id" = i32, Path, description = "Comment identifier")),
    responses(
        (status = 200, description = "Post page with the comment form pre-filled", body = PostView),
        (status = 404, description = "Not the author or admin, or no such comment", body = ErrorSchema)
    ),
    tags = ["comments"],
    security(("SessionCookie" = []))
)]
#[get("/edit-comment/{comment_id}")]
pub async fn edit_comment_form(
    state: web::Data<HttpState>,
    viewer: Viewer,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<web::Json<PostView>> {
    let id = CommentId::new(path.into_inner());
    let comment = state.comments_query.comment(id).await?;
    viewer.authorize(Action::EditComment(&comment))?;
    let detail = state.posts_query.post_detail(comment.post).await?;
    let form = FormState::empty("comment", format!("/edit-comment/{id}"))
        .with_value("comment_text", comment.text.as_str());
    let layout = Layout::new(&viewer, &session);
    Ok(web::Json(PostView::new(layout, &viewer, &detail, form)))
}

/// Replace a comment's text.
#[utoipa::path(
    post,
    path = "/edit-comment/{comment_id}",
    params(("comment_id" = i32, Path, description = "Comment identifier")),
    request_body(content = CommentForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Saved; redirects to the post"),
        (status = 400, description = "Empty comment", body = ErrorSchema),
        (status = 404, description = "Not the author or admin, or no such comment", body = ErrorSchema)
    ),
    tags = ["comments"],
    security(("SessionCookie" = []))
)]
#[post("/edit-comment/{comment_id}")]
pub async fn update_comment(
    state: web::Data<HttpState>,
    viewer: Viewer,
    session: SessionContext,
    path: web::Path<i32>,
    form: web::Form<CommentForm>,
) -> ApiResult<HttpResponse> {
    let id = CommentId::new(path.into_inner());
    let comment = state.comments_query.comment(id).await?;
    let identity = viewer.require(Action::EditComment(&comment))?;
    let text = form
        .validate()
        .map_err(|err| with_layout(err, &viewer, &session))?;
    let updated = state.comments.update_comment(identity, id, text).await?;
    Ok(see_other(format!("/post/{}", updated.post)))
}

/// Delete a comment.
#[utoipa::path(
    get,
    path = "/delete-comment/{comment_id}",
    params(("comment_id" = i32, Path, description = "Comment identifier")),
    responses(
        (status = 303, description = "Deleted; redirects to the post"),
        (status = 404, description = "Not the author or admin, or no such comment", body = ErrorSchema)
    ),
    tags = ["comments"],
    security(("SessionCookie" = []))
)]
#[get("/delete-comment/{comment_id}")]
pub async fn delete_comment(
    state: web::Data<HttpState>,
    viewer: Viewer,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = CommentId::new(path.into_inner());
    let comment = state.comments_query.comment(id).await?;
    let identity = viewer.require(Action::DeleteComment(&comment))?;
    let removed = state.comments.delete_comment(identity, id).await?;
    Ok(see_other(format!("/post/{}", removed.post)))
}
