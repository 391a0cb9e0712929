use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Placeholder JWT secrets that MUST NOT be used.
const PLACEHOLDER_SECRETS: &[&str] = &["change-me-to-a-random-string", "dev-secret-change-me"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("SHUK_JWT_SECRET is unset or still a placeholder; it must match the identity provider's signing secret")]
    MissingSecret,

    #[error("{key} has invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub db_path: PathBuf,
    pub jwt_secret: String,
    pub request_timeout: Duration,
    /// Insert the sample listings when the database has none.
    pub seed_sample: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let jwt_secret = lookup("SHUK_JWT_SECRET").unwrap_or_default();
        if jwt_secret.is_empty() || PLACEHOLDER_SECRETS.contains(&jwt_secret.as_str()) {
            return Err(ConfigError::MissingSecret);
        }

        let host = lookup("SHUK_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse(&lookup, "SHUK_PORT", 3000u16)?;
        let addr = format!("{}:{}", host, port)
            .parse()
            .map_err(|_| ConfigError::Invalid { key: "SHUK_HOST", value: host })?;

        let timeout_ms = parse(&lookup, "SHUK_REQUEST_TIMEOUT_MS", 5000u64)?;
        if timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "SHUK_REQUEST_TIMEOUT_MS",
                value: "0".into(),
            });
        }

        Ok(Self {
            addr,
            db_path: lookup("SHUK_DB_PATH").unwrap_or_else(|| "shuk.db".into()).into(),
            jwt_secret,
            request_timeout: Duration::from_millis(timeout_ms),
            seed_sample: parse(&lookup, "SHUK_SEED_SAMPLE", false)?,
        })
    }
}

fn parse<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
