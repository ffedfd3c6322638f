//! HTTP API for running graph queries

pub mod handlers;
pub mod routes;

pub use routes::create_router;
