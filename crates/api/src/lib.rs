//! orgboard API server library.
//!
//! Exposes the building blocks (config, state, error handling, GraphQL schema,
//! routes, tenant-context extraction) so integration tests and the binary
//! entrypoint can both access them.

pub mod app;
pub mod config;
pub mod error;
pub mod graphql;
pub mod middleware;
pub mod routes;
pub mod state;
