//! Client-side data layer for the orgboard GraphQL API.
//!
//! - [`client::GraphqlClient`] -- typed operations over HTTP.
//! - [`cache::NormalizedCache`] -- entity store keyed by kind and id.
//! - [`store::Store`] -- client plus cache, with refetch after mutations.
//! - [`dashboard`] and [`board`] -- view-models for the project dashboard
//!   and the task board.

pub mod board;
pub mod cache;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod operations;
pub mod store;
