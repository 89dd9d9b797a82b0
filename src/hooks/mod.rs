//! Data hooks: service calls bound to the query cache.
//!
//! Queries resolve through [`QueryCache`](crate::cache::QueryCache) under a
//! composite key and are skipped while a required parameter is missing.
//! Mutations invalidate the keys they affect once they succeed.

pub mod keys;
pub mod query;
pub mod resources;
pub mod state;

pub use query::{run_query, watch_query, Mutation};
pub use resources::Hooks;
pub use state::{QueryState, QueryStatus};
