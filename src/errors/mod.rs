//! Failure normalization shared by every service call

pub mod failure;
pub mod normalize;

pub use failure::{ClientFailure, ErrorBody, RequestFailed, DEFAULT_API_FAILURE};
pub use normalize::normalize;
