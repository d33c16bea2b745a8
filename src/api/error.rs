//! Failures of backend calls, normalised to a single message.

use serde_json::Value;
use thiserror::Error;

const UNEXPECTED: &str = "An unexpected error occurred";

/// Every variant displays as exactly its message so callers can treat any
/// failure as "an error occurred with this text".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (connection, DNS, timeout).
    #[error("{0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Generation finished with a status other than completed.
    #[error("{0}")]
    Generation(String),

    /// A success response whose body did not match the expected shape.
    #[error("{0}")]
    Decode(String),
}

impl ApiError {
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Builds a server error, preferring the body's `detail`, then its
    /// `message`, then a generic status line.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = message_from_body(body)
            .unwrap_or_else(|| format!("Request failed with status code {}", status));
        Self::Server { status, message }
    }

    pub fn network(err: impl std::fmt::Display) -> Self {
        let message = err.to_string();
        if message.is_empty() {
            Self::Network(UNEXPECTED.to_string())
        } else {
            Self::Network(message)
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Extracts a human readable message from an error payload.
pub(crate) fn message_from_body(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    ["detail", "message"]
        .iter()
        .find_map(|key| value.get(key).and_then(render_field))
}

fn render_field(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        // FastAPI request validation: [{"loc": [...], "msg": "...", ...}]
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                Some(value.to_string())
            } else {
                Some(messages.join("; "))
            }
        }
        other => Some(other.to_string()),
    }
}
