use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub forum_db: PathBuf,
    pub tournament_db: PathBuf,
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup, falling back to defaults for
    /// missing keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.into());

        let port = var("ARENA_PORT", "3000");
        let port = port
            .parse::<u16>()
            .with_context(|| format!("invalid ARENA_PORT '{}'", port))?;

        Ok(Self {
            forum_db: PathBuf::from(var("ARENA_FORUM_DB", "forum.db")),
            tournament_db: PathBuf::from(var("ARENA_TOURNAMENT_DB", "tournament.db")),
            host: var("ARENA_HOST", "0.0.0.0"),
            port,
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .with_context(|| format!("invalid listen address '{}'", addr))
    }
}
