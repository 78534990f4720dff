//! # Configuration
//!
//! Runtime settings for the onboarding calendar server, read from environment
//! variables. Every setting has a default so the server starts with no
//! configuration at all; a value that is present but malformed fails startup
//! instead of being silently replaced.
//!
//! | Variable                 | Default                                  |
//! |--------------------------|------------------------------------------|
//! | `ONBOARDING_BIND_ADDR`   | `127.0.0.1:3000`                         |
//! | `ONBOARDING_DATA_DIR`    | `$HOME/Documents/Onboarding Calendar`    |
//! | `ONBOARDING_LOCALE`      | `es`                                     |
//! | `ONBOARDING_CORS_ORIGIN` | `http://localhost:8080`                  |
//! | `RUST_LOG`               | `info`                                   |

use anyhow::{anyhow, Context, Result};
use shared::Locale;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const BIND_ADDR_VAR: &str = "ONBOARDING_BIND_ADDR";
pub const DATA_DIR_VAR: &str = "ONBOARDING_DATA_DIR";
pub const LOCALE_VAR: &str = "ONBOARDING_LOCALE";
pub const CORS_ORIGIN_VAR: &str = "ONBOARDING_CORS_ORIGIN";
pub const LOG_FILTER_VAR: &str = "RUST_LOG";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";
const DEFAULT_LOG_FILTER: &str = "info";
const DEFAULT_DATA_DIR_NAME: &str = "Onboarding Calendar";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Directory holding `sessions.csv` and `events.csv`
    pub data_dir: PathBuf,
    /// Locale used when a request does not name one
    pub default_locale: Locale,
    pub cors_origin: String,
    /// `tracing_subscriber::EnvFilter` directive string
    pub log_filter: String,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(&vars)
    }

    /// Load configuration from an explicit variable map.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let get = |key: &str| {
            vars.get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
        };

        let bind_addr = get(BIND_ADDR_VAR)
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse::<SocketAddr>()
            .with_context(|| format!("{} must be a socket address like 127.0.0.1:3000", BIND_ADDR_VAR))?;

        let data_dir = match get(DATA_DIR_VAR) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir(vars)?,
        };

        let default_locale = match get(LOCALE_VAR) {
            Some(code) => Locale::from_code(code)
                .ok_or_else(|| anyhow!("{} must be `es` or `en`, got `{}`", LOCALE_VAR, code))?,
            None => Locale::default(),
        };

        let cors_origin = get(CORS_ORIGIN_VAR).unwrap_or(DEFAULT_CORS_ORIGIN).to_string();
        let log_filter = get(LOG_FILTER_VAR).unwrap_or(DEFAULT_LOG_FILTER).to_string();

        Ok(Self {
            bind_addr,
            data_dir,
            default_locale,
            cors_origin,
            log_filter,
        })
    }
}

/// ~/Documents/Onboarding Calendar
fn default_data_dir(vars: &HashMap<String, String>) -> Result<PathBuf> {
    let home_dir = vars
        .get("HOME")
        .or_else(|| vars.get("USERPROFILE"))
        .ok_or_else(|| anyhow!("Could not determine home directory; set {}", DATA_DIR_VAR))?;

    Ok(PathBuf::from(home_dir)
        .join("Documents")
        .join(DEFAULT_DATA_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_vars(&vars(&[("HOME", "/home/ana")])).unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(
            config.data_dir,
            PathBuf::from("/home/ana/Documents/Onboarding Calendar")
        );
        assert_eq!(config.default_locale, Locale::Es);
        assert_eq!(config.cors_origin, "http://localhost:8080");
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_vars(&vars(&[
            (BIND_ADDR_VAR, "0.0.0.0:8081"),
            (DATA_DIR_VAR, "/srv/onboarding"),
            (LOCALE_VAR, "en"),
            (CORS_ORIGIN_VAR, "https://hr.example.com"),
            (LOG_FILTER_VAR, "onboarding_backend=debug"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:8081".parse().unwrap());
        assert_eq!(config.data_dir, PathBuf::from("/srv/onboarding"));
        assert_eq!(config.default_locale, Locale::En);
        assert_eq!(config.cors_origin, "https://hr.example.com");
        assert_eq!(config.log_filter, "onboarding_backend=debug");
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = AppConfig::from_vars(&vars(&[
            ("HOME", "/home/ana"),
            (BIND_ADDR_VAR, "  "),
            (LOCALE_VAR, ""),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.default_locale, Locale::Es);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = AppConfig::from_vars(&vars(&[
            (DATA_DIR_VAR, "/tmp/x"),
            (BIND_ADDR_VAR, "not-an-address"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains(BIND_ADDR_VAR));

        let err = AppConfig::from_vars(&vars(&[(DATA_DIR_VAR, "/tmp/x"), (LOCALE_VAR, "fr")]))
            .unwrap_err();
        assert!(err.to_string().contains("fr"));
    }

    #[test]
    fn test_missing_home_without_data_dir_fails() {
        assert!(AppConfig::from_vars(&HashMap::new()).is_err());
    }
}
