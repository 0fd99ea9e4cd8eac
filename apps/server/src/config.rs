use std::fmt::Display;
use std::str::FromStr;
use std::{net::SocketAddr, time::Duration};

use pricewatch_core::constants::{
    DEFAULT_FETCH_INTERVAL_SECS, DEFAULT_RETRY_BASE_MS, DEFAULT_RETRY_MAX_ATTEMPTS,
};
use pricewatch_market_data::provider::coinpaprika::DEFAULT_BASE_URL;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid {name}={value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub coinpaprika_url: String,
    pub rate_limit_per_sec: f64,
    pub fetch_interval: Duration,
    pub retry_max_attempts: u32,
    pub retry_base: Duration,
    /// Used when `RUST_LOG` is not set.
    pub log_level: String,
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            db_path: "./db/pricewatch.db".into(),
            cors_allow: vec!["*".into()],
            request_timeout: Duration::from_millis(30_000),
            coinpaprika_url: DEFAULT_BASE_URL.into(),
            rate_limit_per_sec: 1.0,
            fetch_interval: Duration::from_secs(DEFAULT_FETCH_INTERVAL_SECS),
            retry_max_attempts: DEFAULT_RETRY_MAX_ATTEMPTS,
            retry_base: Duration::from_millis(DEFAULT_RETRY_BASE_MS),
            log_level: "info".into(),
            log_json: false,
        }
    }
}

impl Config {
    /// Reads `PW_*` variables, after loading `.env` if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let env = Env(lookup);

        let rate_limit_per_sec: f64 = env.parse("PW_RATE_LIMIT_PER_SEC", defaults.rate_limit_per_sec)?;
        if !rate_limit_per_sec.is_finite() || rate_limit_per_sec <= 0.0 {
            return Err(invalid("PW_RATE_LIMIT_PER_SEC", rate_limit_per_sec, "must be > 0"));
        }

        let fetch_interval_secs: u64 =
            env.parse("PW_FETCH_INTERVAL_SECS", defaults.fetch_interval.as_secs())?;
        if fetch_interval_secs == 0 {
            return Err(invalid("PW_FETCH_INTERVAL_SECS", 0, "must be > 0"));
        }

        let retry_max_attempts: u32 =
            env.parse("PW_RETRY_MAX_ATTEMPTS", defaults.retry_max_attempts)?;
        if retry_max_attempts == 0 {
            return Err(invalid("PW_RETRY_MAX_ATTEMPTS", 0, "must be >= 1"));
        }

        let timeout_ms: u64 = env.parse(
            "PW_REQUEST_TIMEOUT_MS",
            defaults.request_timeout.as_millis() as u64,
        )?;
        let retry_base_ms: u64 =
            env.parse("PW_RETRY_BASE_MS", defaults.retry_base.as_millis() as u64)?;

        let cors_allow = env
            .string("PW_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            listen_addr: env.parse("PW_LISTEN_ADDR", defaults.listen_addr)?,
            db_path: env.string("PW_DB_PATH", &defaults.db_path),
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            coinpaprika_url: env.string("PW_COINPAPRIKA_URL", &defaults.coinpaprika_url),
            rate_limit_per_sec,
            fetch_interval: Duration::from_secs(fetch_interval_secs),
            retry_max_attempts,
            retry_base: Duration::from_millis(retry_base_ms),
            log_level: env.string("PW_LOG_LEVEL", &defaults.log_level),
            log_json: env
                .string("PW_LOG_FORMAT", "text")
                .eq_ignore_ascii_case("json"),
        })
    }
}

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn string(&self, name: &str, default: &str) -> String {
        (self.0)(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string())
    }

    fn parse<T>(&self, name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        match (self.0)(name).map(|v| v.trim().to_string()) {
            Some(raw) if !raw.is_empty() => raw
                .parse()
                .map_err(|e: T::Err| invalid(name, &raw, e)),
            _ => Ok(default),
        }
    }
}

fn invalid(name: &'static str, value: impl Display, reason: impl Display) -> ConfigError {
    ConfigError::Invalid {
        name,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = from_pairs(&[]).unwrap();
        assert_eq!(config.listen_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.db_path, "./db/pricewatch.db");
        assert_eq!(config.cors_allow, vec!["*"]);
        assert_eq!(config.fetch_interval, Duration::from_secs(60));
        assert_eq!(config.retry_max_attempts, 3);
        assert_eq!(config.retry_base, Duration::from_secs(2));
        assert_eq!(config.rate_limit_per_sec, 1.0);
        assert!(!config.log_json);
    }

    #[test]
    fn test_overrides() {
        let config = from_pairs(&[
            ("PW_LISTEN_ADDR", "127.0.0.1:9000"),
            ("PW_RATE_LIMIT_PER_SEC", "0.5"),
            ("PW_FETCH_INTERVAL_SECS", "300"),
            ("PW_CORS_ALLOW_ORIGINS", "http://a.test, http://b.test,"),
            ("PW_LOG_FORMAT", "JSON"),
        ])
        .unwrap();

        assert_eq!(config.listen_addr.port(), 9000);
        assert_eq!(config.rate_limit_per_sec, 0.5);
        assert_eq!(config.fetch_interval, Duration::from_secs(300));
        assert_eq!(config.cors_allow, vec!["http://a.test", "http://b.test"]);
        assert!(config.log_json);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        for (name, value) in [
            ("PW_LISTEN_ADDR", "nowhere"),
            ("PW_RATE_LIMIT_PER_SEC", "0"),
            ("PW_RATE_LIMIT_PER_SEC", "fast"),
            ("PW_FETCH_INTERVAL_SECS", "0"),
            ("PW_RETRY_MAX_ATTEMPTS", "0"),
            ("PW_RETRY_BASE_MS", "-5"),
        ] {
            let err = from_pairs(&[(name, value)]).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { name: n, .. } if n == name),
                "{name}={value} gave {err}"
            );
        }
    }
}
