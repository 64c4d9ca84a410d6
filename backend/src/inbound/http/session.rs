//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix cookie session so handlers deal with domain-level
//! operations: remembering the signed-in user, rotating or purging the
//! session, and queueing one-shot flash messages for the next view.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const FLASHES_KEY: &str = "_flashes";

/// One-shot message shown on the next rendered view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Flash {
    /// Presentation hint such as `info` or `message`.
    pub category: String,
    pub message: String,
}

impl Flash {
    /// Build a flash message for the given category.
    pub fn new(category: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            message: message.into(),
        }
    }
}

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user's id in the session cookie.
    pub fn persist_user(&self, user_id: UserId) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, user_id.get())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current user id from the session, if present.
    ///
    /// A value that does not decode as a user id is treated as absent.
    pub fn user_id(&self) -> Option<UserId> {
        match self.0.get::<i32>(USER_ID_KEY) {
            Ok(id) => id.map(UserId::new),
            Err(error) => {
                warn!(%error, "invalid user id in session cookie");
                None
            }
        }
    }

    /// Issue a fresh session cookie while keeping the session state.
    pub fn renew(&self) {
        self.0.renew();
    }

    /// Drop all session state and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }

    /// Queue a flash message for the next view.
    pub fn push_flash(&self, flash: Flash) -> Result<(), Error> {
        let mut pending = self.pending_flashes();
        pending.push(flash);
        self.0
            .insert(FLASHES_KEY, pending)
            .map_err(|error| Error::internal(format!("failed to persist flash: {error}")))
    }

    /// Drain queued flash messages.
    pub fn take_flashes(&self) -> Vec<Flash> {
        let pending = self.pending_flashes();
        if !pending.is_empty() {
            self.0.remove(FLASHES_KEY);
        }
        pending
    }

    fn pending_flashes(&self) -> Vec<Flash> {
        self.0
            .get::<Vec<Flash>>(FLASHES_KEY)
            .unwrap_or_else(|error| {
                warn!(%error, "discarding undecodable flash messages");
                None
            })
            .unwrap_or_default()
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
