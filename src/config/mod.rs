use std::env;
use std::fmt;

use thiserror::Error;
use url::Url;

pub const DEFAULT_APP_NAME: &str = "My FastAPI Supabase App";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_STORE_TIMEOUT_SECS: u64 = 10;

/// Configuration problems; any of these stops the process at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app_name: String,
    pub server: ServerConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

/// Where the table store lives and how to authenticate against it
#[derive(Clone)]
pub struct StoreConfig {
    pub url: Url,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("url", &self.url.as_str())
            .field("api_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl AppConfig {
    /// Read configuration from the process environment (call `dotenvy::dotenv()` first)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Ok(Self {
            app_name: value("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            server: ServerConfig {
                port: match value("APP_PORT").or_else(|| value("PORT")) {
                    Some(v) => parse_number("APP_PORT", &v)?,
                    None => DEFAULT_PORT,
                },
            },
            store: StoreConfig {
                url: parse_store_url(value("SUPABASE_URL").ok_or(ConfigError::Missing("SUPABASE_URL"))?)?,
                api_key: value("SUPABASE_ANON_KEY").ok_or(ConfigError::Missing("SUPABASE_ANON_KEY"))?,
                timeout_secs: match value("SUPABASE_TIMEOUT_SECS") {
                    Some(v) => parse_number("SUPABASE_TIMEOUT_SECS", &v)?,
                    None => DEFAULT_STORE_TIMEOUT_SECS,
                },
            },
        })
    }
}

fn parse_store_url(raw: String) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        var: "SUPABASE_URL",
        reason,
    };

    let url = Url::parse(&raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot carry a path".to_string()));
    }
    Ok(url)
}

fn parse_number<N>(var: &'static str, raw: &str) -> Result<N, ConfigError>
where
    N: std::str::FromStr,
    N::Err: fmt::Display,
{
    raw.parse().map_err(|e: N::Err| ConfigError::Invalid {
        var,
        reason: e.to_string(),
    })
}
