//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! description of the blog's HTTP surface. It registers:
//!
//! - **Paths**: every page, form and health handler from the inbound layer
//! - **Schemas**: the JSON view models, the URL-encoded form bodies and the
//!   error wrappers ([`ErrorSchema`], [`ErrorCodeSchema`]) that keep domain
//!   types free of utoipa derives
//! - **Security**: the session cookie authentication scheme
//!
//! The generated document is served by Swagger UI in debug builds and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::forms::{CommentForm, ContactForm, LoginForm, PostForm, RegisterForm};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::session::Flash;
use crate::inbound::http::views::{
    CommentView, CurrentUserView, FormState, FormView, HomeView, Layout, PageView, PostBody,
    PostSummary, PostView,
};
use crate::inbound::http::session_config::SESSION_COOKIE_NAME;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE_NAME,
                "Private session cookie issued by POST /login or POST /register.",
            ))),
        );
    }
}

/// OpenAPI document for the blog.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Blog backend",
        description = "Session-authenticated blog: posts authored by the admin, comments by registered readers.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::posts::home,
        crate::inbound::http::posts::show_post,
        crate::inbound::http::posts::add_comment,
        crate::inbound::http::posts::new_post_form,
        crate::inbound::http::posts::create_post,
        crate::inbound::http::posts::edit_post_form,
        crate::inbound::http::posts::update_post,
        crate::inbound::http::posts::delete_post,
        crate::inbound::http::comments::edit_comment_form,
        crate::inbound::http::comments::update_comment,
        crate::inbound::http::comments::delete_comment,
        crate::inbound::http::accounts::register_form,
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login_form,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::pages::about,
        crate::inbound::http::pages::contact_form,
        crate::inbound::http::pages::send_contact,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        Flash,
        CurrentUserView,
        Layout,
        FormState,
        PostSummary,
        PostBody,
        CommentView,
        HomeView,
        PostView,
        FormView,
        PageView,
        RegisterForm,
        LoginForm,
        PostForm,
        CommentForm,
        ContactForm,
    )),
    tags(
        (name = "posts", description = "Reading and authoring posts"),
        (name = "comments", description = "Commenting and comment moderation"),
        (name = "accounts", description = "Registration, login and logout"),
        (name = "pages", description = "Static pages and the contact form"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
