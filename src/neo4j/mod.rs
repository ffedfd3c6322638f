//! Neo4j query execution and result models

pub mod client;
pub mod models;
pub mod traits;

pub use client::Neo4jClient;
pub use models::*;
pub use traits::{QueryError, QueryExecutor};

#[cfg(test)]
pub(crate) mod mock;
