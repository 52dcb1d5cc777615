//! Application settings loaded via OrthoConfig.
//!
//! Values come from `WELLF_*` environment variables, command-line flags or a
//! configuration file, in the precedence order ortho_config applies. Session
//! cookie settings are read separately by
//! [`crate::inbound::http::session_config`].

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Errors raised when settings are present but unusable.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("database URL missing: set WELLF_DATABASE_URL or --database-url")]
    MissingDatabaseUrl,
    #[error("invalid bind address '{value}': {message}")]
    InvalidBindAddr { value: String, message: String },
    #[error("db_max_connections must be at least 1")]
    NoConnections,
}

/// Server and database settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "WELLF")]
pub struct AppSettings {
    /// Socket address the HTTP server listens on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Apply pending schema migrations before serving.
    pub run_migrations: Option<bool>,
}

impl AppSettings {
    /// Configured listen address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .trim()
            .parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                message: err.to_string(),
            })
    }

    /// Configured database URL; blank counts as missing.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// Validated pool size, defaulting to ten connections.
    pub fn max_connections(&self) -> Result<u32, SettingsError> {
        match self.db_max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS) {
            0 => Err(SettingsError::NoConnections),
            size => Ok(size),
        }
    }

    /// Whether migrations run at startup; on unless switched off.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "WELLF_BIND_ADDR",
        "WELLF_DATABASE_URL",
        "WELLF_DB_MAX_CONNECTIONS",
        "WELLF_RUN_MIGRATIONS",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("wellf")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr(),
            Ok(DEFAULT_BIND_ADDR.parse().expect("default address"))
        );
        assert_eq!(settings.max_connections(), Ok(10));
        assert!(settings.run_migrations());
        assert_eq!(
            settings.database_url(),
            Err(SettingsError::MissingDatabaseUrl)
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("WELLF_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "WELLF_DATABASE_URL",
                Some("postgres://wellf@localhost/wellf".to_owned()),
            ),
            ("WELLF_DB_MAX_CONNECTIONS", Some("4".to_owned())),
            ("WELLF_RUN_MIGRATIONS", Some("false".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr(),
            Ok("127.0.0.1:9000".parse().expect("address"))
        );
        assert_eq!(
            settings.database_url(),
            Ok("postgres://wellf@localhost/wellf")
        );
        assert_eq!(settings.max_connections(), Ok(4));
        assert!(!settings.run_migrations());
    }

    #[rstest]
    #[case(Some("   "))]
    #[case(None)]
    fn blank_database_urls_are_missing(#[case] url: Option<&str>) {
        let settings = AppSettings {
            bind_addr: None,
            database_url: url.map(str::to_owned),
            db_max_connections: None,
            run_migrations: None,
        };
        assert_eq!(
            settings.database_url(),
            Err(SettingsError::MissingDatabaseUrl)
        );
    }

    #[test]
    fn malformed_bind_addresses_are_rejected() {
        let settings = AppSettings {
            bind_addr: Some("localhost".to_owned()),
            database_url: None,
            db_max_connections: Some(0),
            run_migrations: Some(false),
        };
        assert!(!settings.run_migrations());
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::InvalidBindAddr { .. })
        ));
        assert_eq!(settings.max_connections(), Err(SettingsError::NoConnections));
    }
}
