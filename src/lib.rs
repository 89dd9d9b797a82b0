// Library exports for the binary and integration tests
pub mod api;
pub mod cache;
pub mod config;
pub mod errors;
pub mod hooks;
pub mod metrics;
pub mod models;
pub mod realtime;
pub mod services;
pub mod session;
pub mod stores;
pub mod utils;

pub use errors::RequestFailed;
