//! Database settings sourced from the process environment.

use crate::error::ConfigError;
use sqlx::postgres::PgConnectOptions;
use std::fmt;

pub const DEFAULT_PORT: u16 = 5432;

/// Connection settings for the protein database. Built once at startup.
#[derive(Clone)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
}

impl DatabaseSettings {
    /// Read `DB_HOST`, `DB_PORT`, `DB_NAME`, `DB_USER`, `DB_PASS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| {
            lookup(var)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(var))
        };
        let port = match lookup("DB_PORT").filter(|v| !v.trim().is_empty()) {
            Some(raw) => parse_port(&raw)?,
            None => DEFAULT_PORT,
        };
        Ok(DatabaseSettings {
            host: required("DB_HOST")?,
            port,
            name: required("DB_NAME")?,
            user: required("DB_USER")?,
            password: lookup("DB_PASS").unwrap_or_default(),
        })
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.name)
            .username(&self.user)
            .password(&self.password)
    }
}

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    match raw.trim().parse::<u16>() {
        Ok(0) => Err(ConfigError::Invalid {
            var: "DB_PORT",
            reason: "port must be between 1 and 65535".into(),
        }),
        Ok(port) => Ok(port),
        Err(e) => Err(ConfigError::Invalid {
            var: "DB_PORT",
            reason: e.to_string(),
        }),
    }
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}
