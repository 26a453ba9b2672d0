//! Error types for the inventory server client.

/// Result type alias using [`ApiError`].
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors raised while talking to the inventory server.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status. The message is the
    /// server's own wording and is shown to the user verbatim.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// No usable response was received (DNS, connect, timeout, ...).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be decoded.
    #[error("Invalid response: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    /// Single-line text for the notification overlay.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Pull a human-readable message out of an error response body.
///
/// The server wraps validation errors as `{"message": "..."}`; anything
/// else falls back to the raw body, then to the status code.
pub(crate) fn extract_server_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(msg) = value.get("message").and_then(|m| m.as_str()) {
            return msg.to_string();
        }
        if let Some(msg) = value.get("error").and_then(|m| m.as_str()) {
            return msg.to_string();
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("Server error (HTTP {status})")
    } else {
        trimmed.to_string()
    }
}
