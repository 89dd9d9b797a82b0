//! The `{status_code, message, data}` envelope every backend response uses.

use serde::{Deserialize, Serialize};

use crate::errors::{RequestFailed, DEFAULT_API_FAILURE};

/// Response envelope.
///
/// Missing keys and explicit `null`s both deserialize to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub status_code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "absent")]
    pub data: Option<T>,
}

fn absent<T>() -> Option<T> {
    None
}

impl<T> Envelope<T> {
    /// Envelope of an empty body; the transport status decides the outcome
    pub fn empty() -> Self {
        Self {
            status_code: None,
            message: None,
            data: None,
        }
    }

    pub fn success(status_code: i64, data: Option<T>) -> Self {
        Self {
            status_code: Some(status_code),
            message: None,
            data,
        }
    }

    pub fn failure(status_code: i64, message: impl Into<String>) -> Self {
        Self {
            status_code: Some(status_code),
            message: Some(message.into()),
            data: None,
        }
    }
}

pub fn is_success_status(status: i64) -> bool {
    (200..300).contains(&status)
}

/// Extract the payload of an envelope.
///
/// The envelope's own `status_code` takes precedence over `transport_status`.
/// On success the payload is returned as-is, or `default` when there is none.
/// Anything else fails with the envelope message, or "API request failed".
pub fn decode<T>(envelope: Envelope<T>, transport_status: u16, default: T) -> Result<T, RequestFailed> {
    let status = envelope
        .status_code
        .unwrap_or_else(|| i64::from(transport_status));

    if is_success_status(status) {
        return Ok(envelope.data.unwrap_or(default));
    }

    let message = envelope
        .message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_FAILURE.to_string());

    Err(RequestFailed::new(message))
}

/// A list payload that arrives either bare or wrapped in an object.
///
/// Both `[..]` and `{"internships": [..], "total": 3}` decode to the same
/// list; an object without any known list key decodes to an empty list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Bare(Vec<T>),
    Wrapped(WrappedList<T>),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WrappedList<T> {
    #[serde(
        default = "Vec::new",
        alias = "results",
        alias = "fields",
        alias = "internships",
        alias = "applications",
        alias = "notifications",
        alias = "tasks",
        alias = "courses",
        alias = "units",
        alias = "candidates"
    )]
    items: Vec<T>,
}

impl<T> ListPayload<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Bare(items) => items,
            Self::Wrapped(wrapped) => wrapped.items,
        }
    }
}

impl<T> Default for ListPayload<T> {
    fn default() -> Self {
        Self::Bare(Vec::new())
    }
}
