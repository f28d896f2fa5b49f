use thiserror::Error;

/// Everything that can go wrong talking to the external API.
///
/// The `Display` output is exactly what the user sees.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Network error occurred")]
    Network(#[source] reqwest::Error),

    #[error("{0}")]
    InvalidResponse(String),

    #[error("Backend misconfigured: {0}")]
    Config(String),
}

impl BackendError {
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            BackendError::InvalidResponse(format!("Unexpected response from server: {e}"))
        } else {
            BackendError::Network(e)
        }
    }
}

/// Pick the user-facing message out of an error response body.
///
/// Prefers the JSON `error` (or `message`) field, then any non-empty plain-text body,
/// then `fallback`.
pub fn extract_error_message(body: &str, fallback: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return fallback.to_string();
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(map)) => ["error", "message"]
            .iter()
            .find_map(|key| map.get(*key).and_then(|v| v.as_str()))
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(fallback)
            .to_string(),
        Ok(serde_json::Value::String(s)) if !s.trim().is_empty() => s,
        Ok(_) => fallback.to_string(),
        Err(_) => trimmed.to_string(),
    }
}
