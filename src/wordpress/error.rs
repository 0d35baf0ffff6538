use serde_json::{json, Value};

#[derive(Debug, thiserror::Error)]
pub enum WordPressError {
    #[error("config error: {0}")]
    Config(String),
    #[error("request failed: {0}")]
    Request(String),
    #[error("request timeout: {0}")]
    Timeout(String),
    #[error("wordpress returned status {status}")]
    Api { status: u16, body: Value },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl WordPressError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Request(_) => "request",
            Self::Timeout(_) => "timeout",
            Self::Api { .. } => "api",
            Self::InvalidResponse(_) => "invalid_response",
        }
    }

    /// The `message` field of an upstream error body, if WordPress sent one.
    pub fn upstream_message(&self) -> Option<&str> {
        match self {
            Self::Api { body, .. } => body
                .get("message")
                .and_then(Value::as_str)
                .filter(|message| !message.is_empty()),
            _ => None,
        }
    }

    /// Structured detail for a failed operation: the upstream error body when
    /// there is one, otherwise the error kind and description.
    pub fn detail(&self) -> Value {
        match self {
            Self::Api { body, .. } => body.clone(),
            other => json!({
                "kind": other.kind(),
                "detail": other.to_string(),
            }),
        }
    }
}

impl From<reqwest::Error> for WordPressError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            return Self::Timeout(value.to_string());
        }
        if value.is_decode() {
            return Self::InvalidResponse(value.to_string());
        }
        Self::Request(value.to_string())
    }
}
