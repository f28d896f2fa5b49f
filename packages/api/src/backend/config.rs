//! External API configuration from environment variables.

use std::time::Duration;

use super::BackendError;

const DEFAULT_API_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the external Job/Account API lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl BackendConfig {
    /// Read `DEMANDWORK_API_URL` and `DEMANDWORK_API_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, BackendError> {
        dotenvy::dotenv().ok();

        let base_url =
            std::env::var("DEMANDWORK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let timeout_secs = match std::env::var("DEMANDWORK_API_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
                BackendError::Config(format!("DEMANDWORK_API_TIMEOUT_SECS is not a number: {raw}"))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Self::new(base_url, Duration::from_secs(timeout_secs))
    }

    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(BackendError::Config(format!(
                "API URL must start with http:// or https://, got {base_url:?}"
            )));
        }
        Ok(Self { base_url, timeout })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
