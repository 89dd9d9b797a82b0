//! Client-side query cache keyed by composite query keys

pub mod key;
pub mod store;

pub use key::QueryKey;
pub use store::QueryCache;
