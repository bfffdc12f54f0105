//! Connection settings read from the environment

use crate::error::ApiError;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const URL_VAR: &str = "ZABBIX_URL";
const TOKEN_VAR: &str = "ZABBIX_TOKEN";
const TIMEOUT_VAR: &str = "ZABBIX_TIMEOUT";
const RPC_PATH: &str = "api_jsonrpc.php";

/// Where and how to reach the Zabbix API
#[derive(Clone)]
pub struct ApiConfig {
    /// Frontend base URL, with or without the `api_jsonrpc.php` suffix
    pub url: String,
    /// API token sent as a bearer credential
    pub token: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: token.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Load from process environment, reading `.env` in the working directory first
    pub fn from_env() -> Result<Self, ApiError> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(?path, "loaded environment file"),
            Err(e) if e.not_found() => {}
            Err(e) => warn!(error = %e, "ignoring unreadable .env file"),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token = non_empty(TOKEN_VAR)
            .ok_or_else(|| ApiError::Config(format!("{TOKEN_VAR} is not set")))?;
        let url = non_empty(URL_VAR).unwrap_or_else(|| DEFAULT_URL.to_string());
        let timeout = match non_empty(TIMEOUT_VAR) {
            Some(raw) => raw.trim().parse::<u64>().map(Duration::from_secs).map_err(|_| {
                ApiError::Config(format!("{TIMEOUT_VAR} must be a number of seconds, got {raw:?}"))
            })?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            url,
            token,
            timeout,
        })
    }

    /// JSON-RPC endpoint derived from `url`
    pub fn endpoint(&self) -> String {
        let base = self.url.trim_end_matches('/');
        if base.ends_with(RPC_PATH) {
            base.to_string()
        } else {
            format!("{base}/{RPC_PATH}")
        }
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("url", &self.url)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}
