//! Application configuration module.
//!
//! Handles loading configuration from environment variables.

use std::env;
use std::fmt::Display;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::constants::{
    DEFAULT_SESSION_TTL_HOURS, DEFAULT_SHORT_CODE_LENGTH, MAX_SESSION_TTL_HOURS,
};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Base URL for generating short links
    pub base_url: String,
    /// Length of generated short codes
    pub short_code_length: usize,
    /// Secret used to sign session cookies
    pub session_secret: Option<String>,
    /// Session cookie lifetime in hours
    pub session_ttl_hours: i64,
    /// Enable Prometheus metrics endpoint
    pub metrics_enabled: bool,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// # Environment Variables
    /// - `HOST`: Server host (default: "127.0.0.1")
    /// - `PORT`: Server port (default: 8080)
    /// - `BASE_URL`: Base URL for short links (default: "http://{HOST}:{PORT}")
    /// - `SHORT_CODE_LENGTH`: Length of generated codes (default: 6)
    /// - `SESSION_SECRET`: Cookie signing secret, at least 64 bytes (default: random per process)
    /// - `SESSION_TTL_HOURS`: Session cookie lifetime, 1 to 8760 (default: 24)
    /// - `METRICS_ENABLED`: Enable Prometheus metrics endpoint (default: true)
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = parse_var("PORT", 8080);

        let base_url =
            env::var("BASE_URL").unwrap_or_else(|_| format!("http://{}:{}", host, port));

        Self {
            host,
            port,
            base_url: base_url.trim_end_matches('/').to_string(),
            short_code_length: parse_var("SHORT_CODE_LENGTH", DEFAULT_SHORT_CODE_LENGTH),
            session_secret: env::var("SESSION_SECRET").ok().filter(|s| !s.is_empty()),
            session_ttl_hours: parse_ranged_var(
                "SESSION_TTL_HOURS",
                DEFAULT_SESSION_TTL_HOURS,
                1..=MAX_SESSION_TTL_HOURS,
            ),
            metrics_enabled: parse_var("METRICS_ENABLED", true),
        }
    }
}

/// Read and parse an environment variable, falling back to `default` when it
/// is unset or unparseable.
fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("{} has an invalid value '{}', using the default", name, raw);
            default
        }),
        Err(_) => default,
    }
}

/// Like [`parse_var`], but values outside `range` also fall back to `default`.
fn parse_ranged_var<T>(name: &str, default: T, range: RangeInclusive<T>) -> T
where
    T: FromStr + PartialOrd + Display + Copy,
{
    let value = parse_var(name, default);
    if range.contains(&value) {
        value
    } else {
        log::warn!(
            "{} must be between {} and {}, got {}; using the default",
            name,
            range.start(),
            range.end(),
            value
        );
        default
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            base_url: "http://localhost:8080".to_string(),
            short_code_length: DEFAULT_SHORT_CODE_LENGTH,
            session_secret: None,
            session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
            metrics_enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.short_code_length, 6);
        assert_eq!(config.session_ttl_hours, 24);
        assert!(config.session_secret.is_none());
    }

    #[test]
    fn test_parse_var_falls_back_on_garbage() {
        env::set_var("TINYAPP_TEST_GARBAGE_PORT", "not-a-number");
        let port: u16 = parse_var("TINYAPP_TEST_GARBAGE_PORT", 8080);
        assert_eq!(port, 8080);
        env::remove_var("TINYAPP_TEST_GARBAGE_PORT");
    }

    #[test]
    fn test_parse_var_reads_value() {
        env::set_var("TINYAPP_TEST_CODE_LENGTH", " 9 ");
        let length: usize = parse_var("TINYAPP_TEST_CODE_LENGTH", 6);
        assert_eq!(length, 9);
        env::remove_var("TINYAPP_TEST_CODE_LENGTH");
    }

    #[test]
    fn test_parse_ranged_var_rejects_out_of_range() {
        env::set_var("TINYAPP_TEST_TTL_HUGE", i64::MAX.to_string());
        let ttl: i64 = parse_ranged_var("TINYAPP_TEST_TTL_HUGE", 24, 1..=MAX_SESSION_TTL_HOURS);
        assert_eq!(ttl, 24);
        env::remove_var("TINYAPP_TEST_TTL_HUGE");

        env::set_var("TINYAPP_TEST_TTL_NEGATIVE", "-5");
        let ttl: i64 =
            parse_ranged_var("TINYAPP_TEST_TTL_NEGATIVE", 24, 1..=MAX_SESSION_TTL_HOURS);
        assert_eq!(ttl, 24);
        env::remove_var("TINYAPP_TEST_TTL_NEGATIVE");

        env::set_var("TINYAPP_TEST_TTL_ZERO", "0");
        let ttl: i64 = parse_ranged_var("TINYAPP_TEST_TTL_ZERO", 24, 1..=MAX_SESSION_TTL_HOURS);
        assert_eq!(ttl, 24);
        env::remove_var("TINYAPP_TEST_TTL_ZERO");
    }

    #[test]
    fn test_parse_ranged_var_accepts_in_range() {
        env::set_var("TINYAPP_TEST_TTL_WEEK", "168");
        let ttl: i64 = parse_ranged_var("TINYAPP_TEST_TTL_WEEK", 24, 1..=MAX_SESSION_TTL_HOURS);
        assert_eq!(ttl, 168);
        env::remove_var("TINYAPP_TEST_TTL_WEEK");
    }

    #[test]
    fn test_parse_var_missing_uses_default() {
        let enabled: bool = parse_var("TINYAPP_TEST_DEFINITELY_UNSET", true);
        assert!(enabled);
    }
}
