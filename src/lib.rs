// Library exports for the community hub server
// This allows integration tests to build the router in-process

pub mod auth;
pub mod autoreply;
pub mod config;
pub mod error;
pub mod extractors;
pub mod notify;
pub mod routes;
pub mod state;
pub mod store;
