//! Backend entry-point: loads settings, wires persistence and serves the blog.

mod server;

use actix_web::web;
use color_eyre::eyre::eyre;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use blog::inbound::http::health::HealthState;
use blog::inbound::http::session_config::fingerprint::key_fingerprint;
use blog::inbound::http::session_config::{BuildMode, session_settings_from_env};
use blog::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use blog::settings::AppSettings;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| eyre!("failed to load settings: {e}"))?;
    let session =
        session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())?;
    info!(fingerprint = %key_fingerprint(&session.key), "session key loaded");

    let mut config = ServerConfig::new(session, settings.bind_addr()?)
        .with_session_ttl(settings.session_ttl()?)
        .with_argon2(settings.argon2());

    if let Some(url) = settings.database_url() {
        run_migrations(url).await?;
        let pool = DbPool::new(PoolConfig::new(url)).await?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await?;
    Ok(())
}
