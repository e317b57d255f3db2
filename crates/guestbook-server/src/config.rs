use std::net::SocketAddr;

use anyhow::{Context, Result};

use guestbook_db::DbConfig;

/// Process configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db: DbConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("GUESTBOOK_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = match lookup("GUESTBOOK_PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("GUESTBOOK_PORT is not a valid port: {}", raw))?,
            None => 3000,
        };
        let db_path = lookup("GUESTBOOK_DB_PATH").unwrap_or_else(|| "guestbook.db".into());

        Ok(Self {
            host,
            port,
            db: DbConfig::new(db_path),
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}
