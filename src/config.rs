//! Runtime configuration, read from the environment once at startup.
//!
//! Every field has a default so the server starts locally with nothing set
//! (SQLite file in the working directory, admin surface disabled).

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./pledgeboard.sqlite?mode=rwc";

#[derive(Debug, Clone)]
pub struct Config {
    /// Env: `HOST`, default `0.0.0.0`
    pub host: IpAddr,
    /// Env: `PORT`, default 3000
    pub port: u16,
    /// Env: `DATABASE_URL`. Postgres and SQLite URLs are both accepted.
    pub database_url: String,
    /// Env: `ADMIN_SECRET`. `None` means every admin request is refused.
    pub admin_secret: Option<String>,
    /// Env: `FORWARD_URL`. Each recorded donation is POSTed here if set.
    pub forward_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            admin_secret: None,
            forward_url: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. `from_env` passes the process
    /// environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            match host.parse::<IpAddr>() {
                Ok(parsed) => config.host = parsed,
                Err(e) => tracing::warn!(value = %host, error = %e, "Invalid HOST, using default"),
            }
        }

        if let Some(port) = lookup("PORT") {
            match port.parse::<u16>() {
                Ok(parsed) => config.port = parsed,
                Err(e) => tracing::warn!(value = %port, error = %e, "Invalid PORT, using default"),
            }
        }

        if let Some(url) = non_empty(lookup("DATABASE_URL")) {
            config.database_url = url;
        } else {
            tracing::info!("DATABASE_URL not set, using {}", DEFAULT_DATABASE_URL);
        }

        config.admin_secret = non_empty(lookup("ADMIN_SECRET"));
        config.forward_url = non_empty(lookup("FORWARD_URL"));

        config
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
