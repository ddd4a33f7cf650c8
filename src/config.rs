use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenvy::dotenv;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    /// Root of the payroll backend API, e.g. `http://localhost:8000/api`
    pub backend_url: String,
    /// Off unless set
    pub backend_timeout: Option<Duration>,
    pub session_ttl: Duration,
    pub confirmation_ttl: Duration,

    // Rate limiting
    pub rate_login_per_min: u32,
    pub rate_protected_per_min: u32,

    pub api_prefix: String,
    pub cookie_secure: bool,
}

fn var_or<T>(key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .with_context(|| format!("{} must be a valid value", key))
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let backend_timeout = match env::var("BACKEND_TIMEOUT_SECS") {
            Ok(raw) if !raw.trim().is_empty() => Some(Duration::from_secs(
                raw.trim()
                    .parse()
                    .context("BACKEND_TIMEOUT_SECS must be a number of seconds")?,
            )),
            _ => None,
        };

        Ok(Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
            backend_url: env::var("BACKEND_URL").context("BACKEND_URL must be set")?,
            backend_timeout,
            // default 8 hours idle
            session_ttl: Duration::from_secs(var_or("SESSION_TTL", "28800")?),
            confirmation_ttl: Duration::from_secs(var_or("CONFIRMATION_TTL", "120")?),

            rate_login_per_min: var_or("RATE_LOGIN_PER_MIN", "60")?,
            rate_protected_per_min: var_or("RATE_PROTECTED_PER_MIN", "1000")?,

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
            cookie_secure: var_or("COOKIE_SECURE", "false")?,
        })
    }

    #[cfg(test)]
    pub fn for_tests(backend_url: &str) -> Self {
        Self {
            server_addr: "127.0.0.1:0".to_string(),
            backend_url: backend_url.to_string(),
            backend_timeout: None,
            session_ttl: Duration::from_secs(600),
            confirmation_ttl: Duration::from_secs(5),
            rate_login_per_min: 1000,
            rate_protected_per_min: 10_000,
            api_prefix: "/api".to_string(),
            cookie_secure: false,
        }
    }
}
