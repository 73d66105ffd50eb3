use std::str::FromStr;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Resume text shorter than this (in UTF-16 code units) is not analyzed.
    pub min_resume_chars: usize,
    pub search_debounce_ms: u64,
    pub max_upload_bytes: usize,
    /// Analysis sessions untouched for this long are evicted.
    pub session_ttl_secs: u64,
    /// Search clients that stop typing and polling are evicted after this long.
    pub search_client_ttl_secs: u64,
    /// Bookmarks persist to Redis when set, otherwise to process memory.
    pub redis_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            min_resume_chars: 50,
            search_debounce_ms: 300,
            max_upload_bytes: 5 * 1024 * 1024,
            session_ttl_secs: 60 * 60,
            search_client_ttl_secs: 10 * 60,
            redis_url: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            min_resume_chars: parse_env("MIN_RESUME_CHARS", defaults.min_resume_chars)?,
            search_debounce_ms: parse_env("SEARCH_DEBOUNCE_MS", defaults.search_debounce_ms)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            session_ttl_secs: parse_env("SESSION_TTL_SECS", defaults.session_ttl_secs)?,
            search_client_ttl_secs: parse_env(
                "SEARCH_CLIENT_TTL_SECS",
                defaults.search_client_ttl_secs,
            )?,
            redis_url: std::env::var("REDIS_URL").ok().filter(|v| !v.trim().is_empty()),
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u64 = parse_env("COACH_API_TEST_UNSET_VAR", 300).unwrap();
        assert_eq!(value, 300);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("COACH_API_TEST_BAD_PORT", "eighty");
        let result: Result<u16> = parse_env("COACH_API_TEST_BAD_PORT", 8080);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_env_trims() {
        std::env::set_var("COACH_API_TEST_MIN_CHARS", " 75 ");
        let value: usize = parse_env("COACH_API_TEST_MIN_CHARS", 50).unwrap();
        assert_eq!(value, 75);
    }
}
