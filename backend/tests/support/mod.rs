//! Shared harness for the blog's end-to-end scenarios.
//!
//! Builds the real services over an isolated in-memory store and drives
//! them through the page routes with a plain-HTTP session cookie.

use std::sync::Arc;

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, test, web};
use blog::Trace;
use blog::inbound::http::configure;
use blog::inbound::http::session_config::{SESSION_COOKIE_NAME, SessionSettings, session_middleware};
use blog::inbound::http::state::{HttpState, ServiceAdapters};
use blog::outbound::contact::LogContactNotifier;
use blog::outbound::memory::InMemoryBlogStore;
use blog::outbound::password::{Argon2PasswordHasher, Argon2Settings};
use mockable::DefaultClock;

pub const PASSWORD: &str = "secret1";

/// Real services over an empty store; Argon2 costs are kept low for speed.
pub fn memory_state() -> HttpState {
    let store = Arc::new(InMemoryBlogStore::new());
    let hasher = Argon2PasswordHasher::new(Argon2Settings {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
    })
    .expect("cheap argon2 parameters are valid");
    HttpState::from_adapters(ServiceAdapters {
        users: store.clone(),
        posts: store.clone(),
        comments: store,
        hasher: Arc::new(hasher),
        notifier: Arc::new(LogContactNotifier),
        clock: Arc::new(DefaultClock),
    })
}

/// Initialise the full page app around a fresh store.
pub async fn blog_service() -> impl Service<
    actix_http::Request,
    Response = ServiceResponse,
    Error = actix_web::Error,
> {
    let session = SessionSettings {
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    };
    test::init_service(
        App::new()
            .app_data(web::Data::new(memory_state()))
            .wrap(session_middleware(session, Duration::hours(2)))
            .wrap(Trace)
            .configure(configure),
    )
    .await
}

/// The `Location` header of a redirect.
pub fn location<B>(res: &ServiceResponse<B>) -> String {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned()
}

/// The session cookie set by `res`, if any.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
}

/// Submit the registration form.
pub async fn register<S>(app: &S, username: &str, email: &str) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    test::call_service(
        app,
        test::TestRequest::post()
            .uri("/register")
            .set_form([
                ("username", username),
                ("email", email),
                ("password", PASSWORD),
                ("confirm_password", PASSWORD),
            ])
            .to_request(),
    )
    .await
}

/// Register and return the new account's session cookie.
pub async fn signed_up<S>(app: &S, username: &str, email: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = register(app, username, email).await;
    assert_eq!(location(&res), "/", "registration of {username} failed");
    session_cookie(&res).expect("registration sets a session cookie")
}

/// Submit the login form.
pub async fn login<S>(app: &S, name: &str, password: &str) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    test::call_service(
        app,
        test::TestRequest::post()
            .uri("/login")
            .set_form([("name", name), ("password", password)])
            .to_request(),
    )
    .await
}

/// GET `uri`, optionally as the owner of `cookie`.
pub async fn get<S>(app: &S, uri: &str, cookie: Option<&Cookie<'static>>) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let mut req = test::TestRequest::get().uri(uri);
    if let Some(cookie) = cookie {
        req = req.cookie(cookie.clone());
    }
    test::call_service(app, req.to_request()).await
}

/// POST a form to `uri` as the owner of `cookie`.
pub async fn post_form<S>(
    app: &S,
    uri: &str,
    cookie: &Cookie<'static>,
    fields: &[(&str, &str)],
) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    test::call_service(
        app,
        test::TestRequest::post()
            .uri(uri)
            .cookie(cookie.clone())
            .set_form(fields)
            .to_request(),
    )
    .await
}

/// Publish a post as the admin and return its page path.
pub async fn publish<S>(app: &S, admin: &Cookie<'static>, title: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = post_form(
        app,
        "/new-post",
        admin,
        &[
            ("title", title),
            ("subtitle", "A subtitle"),
            ("author", "Alice"),
            ("img_url", "https://images.example.com/cover.png"),
            ("body", "<p>Hello</p>"),
        ],
    )
    .await;
    assert_eq!(location(&res), "/", "publishing {title} failed");
    let home: serde_json::Value = test::read_body_json(get(app, "/", None).await).await;
    let id = home["posts"]
        .as_array()
        .and_then(|posts| posts.iter().find(|post| post["title"] == title))
        .and_then(|post| post["id"].as_i64())
        .expect("published post is listed");
    format!("/post/{id}")
}
