//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, web};
use mockable::DefaultClock;

use std::sync::Arc;

use crate::domain::ports::{
    MockAccountCommand, MockCommentsCommand, MockCommentsQuery, MockContactCommand,
    MockPostsCommand, MockPostsQuery,
};
use crate::outbound::contact::LogContactNotifier;
use crate::outbound::memory::InMemoryBlogStore;
use crate::outbound::password::{Argon2PasswordHasher, Argon2Settings};

use super::state::{HttpState, ServiceAdapters};
use super::session_config::{SESSION_COOKIE_NAME, SessionSettings, session_middleware};

/// Session middleware with a fresh key and the `Secure` flag disabled for
/// plain-HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    session_middleware(
        SessionSettings {
            key: Key::generate(),
            cookie_secure: false,
            same_site: SameSite::Lax,
        },
        actix_web::cookie::time::Duration::hours(2),
    )
}

/// The session cookie set by `res`, if any.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
}

/// The `Location` header of a redirect.
pub fn location<B>(res: &ServiceResponse<B>) -> String {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned()
}

/// State whose ports panic when called; override the ports a test needs.
pub fn unused_ports() -> HttpState {
    HttpState {
        accounts: Arc::new(MockAccountCommand::new()),
        posts_query: Arc::new(MockPostsQuery::new()),
        posts: Arc::new(MockPostsCommand::new()),
        comments_query: Arc::new(MockCommentsQuery::new()),
        comments: Arc::new(MockCommentsCommand::new()),
        contact: Arc::new(MockContactCommand::new()),
    }
}

/// The full page app over `state`, with a test session middleware.
pub fn blog_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .configure(super::configure)
}

/// Real services over an empty in-memory store with cheap Argon2 costs.
pub fn memory_state() -> (HttpState, Arc<InMemoryBlogStore>) {
    let store = Arc::new(InMemoryBlogStore::new());
    let hasher = Argon2PasswordHasher::new(Argon2Settings {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
    })
    .expect("cheap argon2 parameters are valid");
    let state = HttpState::from_adapters(ServiceAdapters {
        users: store.clone(),
        posts: store.clone(),
        comments: store.clone(),
        hasher: Arc::new(hasher),
        notifier: Arc::new(LogContactNotifier),
        clock: Arc::new(DefaultClock),
    });
    (state, store)
}

/// Register an account through `POST /register` and return its session
/// cookie. The first account registered in a store is the admin.
pub async fn register<S, B>(app: &S, username: &str, email: &str) -> Cookie<'static>
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse<B>,
            Error = actix_web::Error,
        >,
{
    let res = actix_web::test::call_service(
        app,
        actix_web::test::TestRequest::post()
            .uri("/register")
            .set_form([
                ("username", username),
                ("email", email),
                ("password", "secret1"),
                ("confirm_password", "secret1"),
            ])
            .to_request(),
    )
    .await;
    assert_eq!(location(&res), "/", "registration of {username} failed");
    session_cookie(&res).expect("registration sets a session cookie")
}
