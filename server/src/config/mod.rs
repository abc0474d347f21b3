use std::env;
use std::net::SocketAddr;
use thiserror::Error;

use crate::view::qr::{DEFAULT_QR_SIZE, MAX_QR_SIZE, MIN_QR_SIZE};
use crate::view::sessions::{DEFAULT_IDLE_TTL, DEFAULT_MAX_SESSIONS};
use crate::view::{PageOptions, ViewSessions};
use std::time::Duration;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::create_security_headers_layer;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3001";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Unset means the in-memory store.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub qr_size: u32,
    pub back_url: String,
    pub cors_allowed_origins: Vec<String>,
    pub session_idle_ttl: Duration,
    pub max_view_sessions: usize,
    /// `RUST_ENV=production`; turns on HSTS.
    pub production: bool,
}

impl Default for Config {
    fn default() -> Self {
        let page = PageOptions::default();
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3001)),
            database_url: None,
            db_max_connections: DEFAULT_MAX_CONNECTIONS,
            qr_size: page.qr_size,
            back_url: page.back_url,
            cors_allowed_origins: cors::split_origins(cors::DEFAULT_ALLOWED_ORIGINS),
            session_idle_ttl: DEFAULT_IDLE_TTL,
            max_view_sessions: DEFAULT_MAX_SESSIONS,
            production: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            bind_addr: parse_var("BIND_ADDR", DEFAULT_BIND_ADDR)?,
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty()),
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", &DEFAULT_MAX_CONNECTIONS.to_string())?,
            qr_size: parse_var::<u32>("QR_CODE_SIZE", &DEFAULT_QR_SIZE.to_string())?
                .clamp(MIN_QR_SIZE, MAX_QR_SIZE),
            back_url: env::var("ADMIN_BACK_URL").unwrap_or_else(|_| PageOptions::default().back_url),
            cors_allowed_origins: cors::split_origins(
                &env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| cors::DEFAULT_ALLOWED_ORIGINS.to_string()),
            ),
            session_idle_ttl: Duration::from_secs(parse_var(
                "SESSION_IDLE_TTL_SECS",
                &DEFAULT_IDLE_TTL.as_secs().to_string(),
            )?),
            max_view_sessions: parse_var("MAX_VIEW_SESSIONS", &DEFAULT_MAX_SESSIONS.to_string())?,
            production: env::var("RUST_ENV")
                .map(|v| v.eq_ignore_ascii_case("production"))
                .unwrap_or(false),
        })
    }

    pub fn view_sessions(&self) -> ViewSessions {
        ViewSessions::with_limits(self.session_idle_ttl, self.max_view_sessions)
    }

    pub fn page_options(&self) -> PageOptions {
        PageOptions {
            back_url: self.back_url.clone(),
            qr_size: self.qr_size,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: &str) -> Result<T, ConfigError> {
    let value = env::var(name).unwrap_or_else(|_| default.to_string());
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}
