//! Account handlers: registration, login and logout.
//!
//! ```text
//! GET  /register   registration form
//! POST /register   create account and sign in
//! GET  /login      login form
//! POST /login      sign in by display name or email
//! GET  /logout     end the session
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::domain::{Error, ErrorCode};

use super::ApiResult;
use super::forms::{LoginForm, RegisterForm};
use super::schemas::ErrorSchema;
use super::session::{Flash, SessionContext};
use super::state::HttpState;
use super::viewer::Viewer;
use super::views::{FormState, FormView, Layout, see_other, with_layout};

/// Flash category used for a rejected registration.
const REGISTER_FLASH: &str = "info";
/// Flash category used for a rejected login.
const LOGIN_FLASH: &str = "message";

/// Replace an expected rejection with a flash and a redirect back to the form.
fn flash_back(
    session: &SessionContext,
    error: Error,
    expected: ErrorCode,
    category: &str,
    form_path: &str,
) -> ApiResult<HttpResponse> {
    if error.code() != expected {
        return Err(error);
    }
    session.push_flash(Flash::new(category, error.message()))?;
    Ok(see_other(form_path))
}

fn sign_in(session: &SessionContext, user_id: crate::domain::UserId) -> ApiResult<HttpResponse> {
    session.renew();
    session.persist_user(user_id)?;
    Ok(see_other("/"))
}

/// Registration form.
#[utoipa::path(
    get,
    path = "/register",
    responses((status = 200, description = "Registration form", body = FormView)),
    tags = ["accounts"]
)]
#[get("/register")]
pub async fn register_form(viewer: Viewer, session: SessionContext) -> web::Json<FormView> {
    web::Json(FormView {
        layout: Layout::new(&viewer, &session),
        form: FormState::empty("register", "/register"),
    })
}

/// Create an account and sign it in.
///
/// The very first account becomes the administrator.
#[utoipa::path(
    post,
    path = "/register",
    request_body(content = RegisterForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Registered and signed in; redirects to `/`, or back to `/register` with a flash when the name or email is taken"),
        (status = 400, description = "Form validation failed", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["accounts"]
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    viewer: Viewer,
    session: SessionContext,
    form: web::Form<RegisterForm>,
) -> ApiResult<HttpResponse> {
    let registration = form
        .validate()
        .map_err(|err| with_layout(err, &viewer, &session))?;
    match state.accounts.register(registration).await {
        Ok(user) => sign_in(&session, user.id()),
        Err(error) => flash_back(&session, error, ErrorCode::Conflict, REGISTER_FLASH, "/register"),
    }
}

/// Login form.
#[utoipa::path(
    get,
    path = "/login",
    responses((status = 200, description = "Login form", body = FormView)),
    tags = ["accounts"]
)]
#[get("/login")]
pub async fn login_form(viewer: Viewer, session: SessionContext) -> web::Json<FormView> {
    web::Json(FormView {
        layout: Layout::new(&viewer, &session),
        form: FormState::empty("login", "/login"),
    })
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Signed in; redirects to `/`, or back to `/login` with a flash on bad credentials", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Form validation failed", body = ErrorSchema)
    ),
    tags = ["accounts"]
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    viewer: Viewer,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let credentials = form
        .validate()
        .map_err(|err| with_layout(err, &viewer, &session))?;
    match state.accounts.authenticate(&credentials).await {
        Ok(user) => sign_in(&session, user.id()),
        Err(error) => flash_back(&session, error, ErrorCode::Unauthorized, LOGIN_FLASH, "/login"),
    }
}

/// Purge the session. Works signed in or not.
#[utoipa::path(
    get,
    path = "/logout",
    responses((status = 303, description = "Session cleared; redirects to `/`")),
    tags = ["accounts"]
)]
#[get("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    see_other("/")
}
