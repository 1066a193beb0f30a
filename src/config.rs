//! Environment-driven configuration.
//!
//! The database is the only configurable surface. `DATABASE_URL` is used
//! verbatim when set; otherwise the URL is assembled from the individual
//! `DB_HOST` / `DB_USER` / `DB_PASSWORD` / `DB_NAME` variables.

use std::env;

use anyhow::Context;

/// Address the service listens on.
pub const SERVER_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 8080);

/// Default base URL the interactive client talks to.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";

/// Database connection settings, resolved once at process start.
#[derive(Debug, Clone)]
pub struct DbConfig {
    url: String,
}

impl DbConfig {
    /// Reads the connection URL from the environment.
    pub fn from_env() -> anyhow::Result<Self> {
        if let Ok(url) = env::var("DATABASE_URL") {
            return Ok(Self { url });
        }

        let host = env::var("DB_HOST").context("DB_HOST is not set")?;
        let user = env::var("DB_USER").context("DB_USER is not set")?;
        let password = env::var("DB_PASSWORD").unwrap_or_default();
        let name = env::var("DB_NAME").context("DB_NAME is not set")?;

        Ok(Self {
            url: format!("postgres://{user}:{password}@{host}/{name}"),
        })
    }

    /// Builds a config from an explicit URL.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_url_is_used_verbatim() {
        let cfg = DbConfig::from_url("postgres://u:p@localhost/contacts");
        assert_eq!(cfg.url(), "postgres://u:p@localhost/contacts");
    }
}
