//! Backend API access: envelope decoding, transport and outbound throttling

pub mod client;
pub mod envelope;
pub mod rate_limiter;

pub use client::{ApiClient, ApiRequest, HttpTransport, RawResponse, Transport};
pub use envelope::{decode, Envelope, ListPayload};
