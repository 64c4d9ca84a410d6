//! Application configuration loaded via OrthoConfig.
//!
//! Values come from `BLOG_*` environment variables, CLI flags or a config
//! file. Every field has a default, applied either by OrthoConfig or by the
//! accessors.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::outbound::password::Argon2Settings;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Configuration values that cannot be used as given.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// The listen address does not parse as `host:port`.
    #[error("BLOG_BIND_ADDR `{value}` is not a socket address")]
    BindAddr { value: String },
    /// The session lifetime is zero or negative.
    #[error("BLOG_SESSION_TTL_HOURS must be positive, got {value}")]
    SessionTtl { value: i64 },
}

/// Process-wide settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BLOG")]
pub struct AppSettings {
    /// Listen address, `host:port`.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without one the server keeps everything in memory.
    pub database_url: Option<String>,
    /// Lifetime of a session cookie, in hours.
    #[ortho_config(default = 2)]
    pub session_ttl_hours: i64,
    /// Argon2id memory cost in KiB.
    pub argon2_memory_kib: Option<u32>,
    /// Argon2id pass count.
    pub argon2_iterations: Option<u32>,
    /// Argon2id lane count.
    pub argon2_parallelism: Option<u32>,
}

impl AppSettings {
    /// Parsed listen address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|_| SettingsError::BindAddr {
            value: raw.to_owned(),
        })
    }

    /// Configured database URL, ignoring blank values.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Session cookie lifetime.
    pub fn session_ttl(&self) -> Result<actix_web::cookie::time::Duration, SettingsError> {
        let hours = self.session_ttl_hours;
        if hours <= 0 {
            return Err(SettingsError::SessionTtl { value: hours });
        }
        Ok(actix_web::cookie::time::Duration::hours(hours))
    }

    /// Argon2id costs with unset fields taken from the library defaults.
    #[must_use]
    pub fn argon2(&self) -> Argon2Settings {
        let defaults = Argon2Settings::default();
        Argon2Settings {
            memory_kib: self.argon2_memory_kib.unwrap_or(defaults.memory_kib),
            iterations: self.argon2_iterations.unwrap_or(defaults.iterations),
            parallelism: self.argon2_parallelism.unwrap_or(defaults.parallelism),
        }
    }
}
