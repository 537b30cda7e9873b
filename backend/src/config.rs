//! Server settings read from the environment.
//!
//! | Variable                 | Default          |
//! |--------------------------|------------------|
//! | `ALIAS_HOST`             | `127.0.0.1`      |
//! | `ALIAS_PORT`             | `8080`           |
//! | `ALIAS_DB_PATH`          | `aliases.sqlite` |
//! | `ALIAS_MAX_UPLOAD_BYTES` | `10485760`       |
//! | `ALIAS_OPEN_BROWSER`     | `true`           |
//!
//! A variable that is set but cannot be parsed stops the server at startup.

use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Invalid value '{value}' for {name}")]
pub struct ConfigError {
    name: &'static str,
    value: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    /// Upper bound for one uploaded import file.
    pub max_upload_bytes: usize,
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_path: PathBuf::from("aliases.sqlite"),
            max_upload_bytes: 10 * 1024 * 1024,
            open_browser: true,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            host: lookup("ALIAS_HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "ALIAS_PORT", defaults.port)?,
            database_path: lookup("ALIAS_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            max_upload_bytes: parse_or(&lookup, "ALIAS_MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            open_browser: parse_or(&lookup, "ALIAS_OPEN_BROWSER", defaults.open_browser)?,
        })
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError { name, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = ServerConfig::from_lookup(lookup_in(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_path, PathBuf::from("aliases.sqlite"));
        assert_eq!(config.url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn values_are_read_from_the_environment() {
        let config = ServerConfig::from_lookup(lookup_in(&[
            ("ALIAS_PORT", "9000"),
            ("ALIAS_DB_PATH", "/tmp/a.sqlite"),
            ("ALIAS_OPEN_BROWSER", "false"),
            ("ALIAS_MAX_UPLOAD_BYTES", " 2048 "),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.database_path, PathBuf::from("/tmp/a.sqlite"));
        assert!(!config.open_browser);
        assert_eq!(config.max_upload_bytes, 2048);
    }

    #[test]
    fn unparsable_values_are_errors() {
        let err = ServerConfig::from_lookup(lookup_in(&[("ALIAS_PORT", "eighty")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value 'eighty' for ALIAS_PORT");
    }
}
