//! Request-scoped identity resolution.
//!
//! [`Viewer`] turns the session's user id into the signed-in [`User`] once
//! per request. Handlers use it both for authorization and to fill the
//! current-user block of every view.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::ports::AccountCommand;
use crate::domain::policy::{Action, authorize};
use crate::domain::{Error, Identity, User};

use super::session::SessionContext;
use super::state::HttpState;
use super::views::CurrentUserView;

/// The signed-in user, or nobody.
#[derive(Debug, Clone, Default)]
pub struct Viewer {
    user: Option<User>,
}

impl Viewer {
    /// A viewer without a session.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Resolve the session user through the account port.
    ///
    /// A session naming an account that no longer exists is anonymous.
    pub async fn resolve(
        session: &SessionContext,
        accounts: &dyn AccountCommand,
    ) -> Result<Self, Error> {
        let Some(id) = session.user_id() else {
            return Ok(Self::anonymous());
        };
        let user = accounts.current_user(id).await?;
        if user.is_none() {
            warn!(user_id = %id, "session names an unknown user");
        }
        Ok(Self { user })
    }

    /// Signed-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Role and id of the signed-in user, if any.
    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        self.user.as_ref().map(User::identity)
    }

    /// Check the authorization policy for this viewer.
    pub fn authorize(&self, action: Action<'_>) -> Result<(), Error> {
        authorize(self.identity().as_ref(), action).require()
    }

    /// The identity of a signed-in viewer allowed to perform `action`.
    pub fn require(&self, action: Action<'_>) -> Result<Identity, Error> {
        self.authorize(action)?;
        self.identity()
            .ok_or_else(Error::not_found_or_denied)
    }

    /// Current-user block for views.
    #[must_use]
    pub fn current_user(&self) -> Option<CurrentUserView> {
        self.user.as_ref().map(CurrentUserView::from)
    }
}

impl FromRequest for Viewer {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = SessionContext::from_request(req, payload);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let session = session.await?;
            let state = state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            Self::resolve(&session, state.accounts.as_ref()).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockAccountCommand;
    use crate::domain::{DisplayName, EmailAddress, ErrorCode, NewUser, PasswordHash, Role, UserId};
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
    use actix_web::test as actix_test;
    use actix_web::{App, HttpResponse};
    use rstest::rstest;

    fn member() -> User {
        NewUser {
            email: EmailAddress::new("bob@y.org").expect("email"),
            display_name: DisplayName::new("bobby").expect("name"),
            password_hash: PasswordHash::new("hash"),
            avatar_url: "https://gravatar.example/bob".to_owned(),
            role: Role::Member,
        }
        .into_user(UserId::new(2))
    }

    #[rstest]
    fn anonymous_viewers_are_denied_with_not_found() {
        let err = Viewer::anonymous()
            .require(Action::CreateComment)
            .expect_err("anonymous denied");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert!(Viewer::anonymous().authorize(Action::ViewPosts).is_ok());
    }

    #[rstest]
    fn members_may_comment_but_not_post() {
        let viewer = Viewer {
            user: Some(member()),
        };
        assert_eq!(
            viewer.require(Action::CreateComment).expect("allowed").id,
            UserId::new(2)
        );
        assert!(viewer.require(Action::CreatePost).is_err());
        let view = viewer.current_user().expect("signed in");
        assert_eq!(view.display_name, "Bobby");
        assert!(!view.is_admin);
    }

    #[actix_web::test]
    async fn extractor_resolves_the_session_user() {
        let mut accounts = MockAccountCommand::new();
        accounts
            .expect_current_user()
            .returning(|id| Ok((id == UserId::new(2)).then(member)));
        let state = HttpState {
            accounts: std::sync::Arc::new(accounts),
            ..crate::inbound::http::test_utils::unused_ports()
        };
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .wrap(test_session_middleware())
                .route(
                    "/login",
                    web::get().to(|session: SessionContext| async move {
                        session.persist_user(UserId::new(2))?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/whoami",
                    web::get().to(|viewer: Viewer| async move {
                        let name = viewer.user().map_or_else(
                            || "anonymous".to_owned(),
                            |u| u.display_name().to_string(),
                        );
                        HttpResponse::Ok().body(name)
                    }),
                ),
        )
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/login").to_request(),
        )
        .await;
        let cookie = session_cookie(&res).expect("session cookie");
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/whoami")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(actix_test::read_body(res).await, "Bobby");
    }
}
