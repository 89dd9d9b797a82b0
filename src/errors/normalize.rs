use tracing::{debug, warn};

use super::failure::{describe_payload, ClientFailure, RequestFailed, DEFAULT_API_FAILURE};
use crate::metrics::registry::API_FAILURES_TOTAL;

/// Collapse any failure into a [`RequestFailed`].
///
/// Message priority: structured body message, then the transport message,
/// then `default_message`. Generic failures keep their own message; values
/// that are not errors at all always get `default_message`.
///
/// There is no success output: call sites return `Err(normalize(..))`.
pub fn normalize(failure: impl Into<ClientFailure>, default_message: &str) -> RequestFailed {
    let failure = failure.into();
    let origin = failure.origin();

    warn!(origin, error = ?failure, "API call failed");
    API_FAILURES_TOTAL.with_label_values(&[origin]).inc();

    let fallback = if default_message.trim().is_empty() {
        DEFAULT_API_FAILURE
    } else {
        default_message
    };

    let message = match failure {
        ClientFailure::Transport { body, message, .. } => body
            .and_then(|body| body.message)
            .and_then(non_empty)
            .or_else(|| message.and_then(non_empty))
            .unwrap_or_else(|| fallback.to_string()),
        ClientFailure::Generic { message } => {
            non_empty(message).unwrap_or_else(|| fallback.to_string())
        }
        ClientFailure::Unknown(payload) => {
            if let Some(text) = describe_payload(payload.as_ref()) {
                debug!(payload = text, "Discarding non-error failure payload");
            }
            fallback.to_string()
        }
    };

    RequestFailed::new(message)
}

fn non_empty(message: String) -> Option<String> {
    if message.trim().is_empty() {
        None
    } else {
        Some(message)
    }
}
