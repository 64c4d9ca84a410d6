//! Builders wiring the driven adapters into the HTTP state.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::warn;

use blog::inbound::http::state::{HttpState, ServiceAdapters};
use blog::outbound::contact::LogContactNotifier;
use blog::outbound::memory::InMemoryBlogStore;
use blog::outbound::password::Argon2PasswordHasher;
use blog::outbound::persistence::{
    DieselCommentRepository, DieselPostRepository, DieselUserRepository,
};

use super::ServerConfig;

/// Build the handler state, using Diesel repositories when a pool is
/// configured and the in-memory store otherwise.
///
/// # Errors
/// Returns [`std::io::Error`] when the Argon2 parameters are rejected.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let hasher = Argon2PasswordHasher::new(config.argon2)
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let hasher = Arc::new(hasher);
    let notifier = Arc::new(LogContactNotifier);
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    let state = match &config.db_pool {
        Some(pool) => HttpState::from_adapters(ServiceAdapters {
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            posts: Arc::new(DieselPostRepository::new(pool.clone())),
            comments: Arc::new(DieselCommentRepository::new(pool.clone())),
            hasher,
            notifier,
            clock,
        }),
        None => {
            warn!("no database configured; content lives in memory and is lost on restart");
            let store = Arc::new(InMemoryBlogStore::new());
            HttpState::from_adapters(ServiceAdapters {
                users: store.clone(),
                posts: store.clone(),
                comments: store,
                hasher,
                notifier,
                clock,
            })
        }
    };
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::{Key, SameSite};
    use blog::inbound::http::session_config::SessionSettings;
    use blog::domain::ports::PostsQuery;
    use blog::outbound::password::Argon2Settings;
    use rstest::rstest;

    fn config(argon2: Argon2Settings) -> ServerConfig {
        ServerConfig::new(
            SessionSettings {
                key: Key::generate(),
                cookie_secure: false,
                same_site: SameSite::Lax,
            },
            "127.0.0.1:0".parse().expect("literal address"),
        )
        .with_argon2(argon2)
    }

    #[rstest]
    fn rejects_unusable_argon2_costs() {
        let result = build_http_state(&config(Argon2Settings {
            memory_kib: 8,
            iterations: 0,
            parallelism: 1,
        }));
        assert!(result.is_err());
    }

    #[actix_web::test]
    async fn memory_state_starts_empty() {
        let state = build_http_state(&config(Argon2Settings {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        }))
        .expect("state");

        let posts = state.posts_query.list_posts().await.expect("list posts");
        assert!(posts.is_empty());
    }
}
