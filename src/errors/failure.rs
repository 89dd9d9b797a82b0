use serde::Deserialize;
use std::any::Any;
use std::fmt;
use thiserror::Error;

/// Message used when a failed envelope carries no message of its own
pub const DEFAULT_API_FAILURE: &str = "API request failed";

/// The single failure shape that leaves the service layer.
///
/// Hooks and callers only ever see the message; no status codes or
/// transport details survive normalization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RequestFailed {
    message: String,
}

impl RequestFailed {
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            return Self {
                message: DEFAULT_API_FAILURE.to_string(),
            };
        }
        Self { message }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn into_message(self) -> String {
        self.message
    }
}

/// Structured body of a non-2xx response, when the backend sent one
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub status_code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Everything that can go wrong before a payload is decoded.
///
/// Only [`crate::errors::normalize`] looks inside this type.
#[derive(Error)]
pub enum ClientFailure {
    /// Non-2xx response, or no response at all (connection refused, timeout)
    #[error(
        "transport failure (status {}): {}",
        .status.map(|s| s.to_string()).unwrap_or_else(|| "none".to_string()),
        .message.as_deref().unwrap_or("no message")
    )]
    Transport {
        status: Option<u16>,
        body: Option<ErrorBody>,
        message: Option<String>,
    },

    /// Any other error that carries a message
    #[error("{message}")]
    Generic { message: String },

    /// A value that is not an error at all, e.g. a panic payload
    #[error("non-error failure value")]
    Unknown(Box<dyn Any + Send>),
}

impl ClientFailure {
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Connection-level failure with no response
    pub fn network(message: impl Into<String>) -> Self {
        Self::Transport {
            status: None,
            body: None,
            message: Some(message.into()),
        }
    }

    /// Metric label for the failure origin
    pub fn origin(&self) -> &'static str {
        match self {
            Self::Transport { status: Some(_), .. } => "http_status",
            Self::Transport { status: None, .. } => "network",
            Self::Generic { .. } => "generic",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl fmt::Debug for ClientFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport {
                status,
                body,
                message,
            } => f
                .debug_struct("Transport")
                .field("status", status)
                .field("body", body)
                .field("message", message)
                .finish(),
            Self::Generic { message } => f.debug_struct("Generic").field("message", message).finish(),
            Self::Unknown(payload) => match describe_payload(&**payload) {
                Some(text) => f.debug_tuple("Unknown").field(&text).finish(),
                None => f.write_str("Unknown(..)"),
            },
        }
    }
}

/// Best-effort text of an opaque payload, for logs only
pub(crate) fn describe_payload(payload: &(dyn Any + Send)) -> Option<&str> {
    payload
        .downcast_ref::<&'static str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
}

impl From<RequestFailed> for ClientFailure {
    fn from(err: RequestFailed) -> Self {
        Self::Generic {
            message: err.into_message(),
        }
    }
}

impl From<serde_json::Error> for ClientFailure {
    fn from(err: serde_json::Error) -> Self {
        Self::Generic {
            message: format!("Failed to parse API response: {}", err),
        }
    }
}

impl From<reqwest::Error> for ClientFailure {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() || err.is_builder() {
            return Self::Generic {
                message: err.to_string(),
            };
        }

        match err.status() {
            Some(status) => Self::Transport {
                status: Some(status.as_u16()),
                body: None,
                message: Some(format!(
                    "Request failed with status code {}",
                    status.as_u16()
                )),
            },
            None if err.is_timeout() => Self::network("Request timed out"),
            None => Self::network(err.to_string()),
        }
    }
}
