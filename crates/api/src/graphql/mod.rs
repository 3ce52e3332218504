//! GraphQL schema: object types, queries, and mutations over the four
//! tenant tables.
//!
//! Reads fail with request-level errors carrying `extensions.code`; writes
//! always succeed at the transport level and report failure through their
//! payload's `success` and `errors` fields.

pub mod access;
pub mod mutation;
pub mod payload;
pub mod query;
pub mod types;

use async_graphql::extensions::Tracing;
use async_graphql::{EmptySubscription, Schema};
use orgboard_db::DbPool;

pub use access::TenantScope;
pub use mutation::MutationRoot;
pub use query::QueryRoot;

/// The executable schema type served at `/graphql`.
pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema with the pool attached as context data.
///
/// Per-request data (the [`TenantScope`]) is attached by the HTTP handler.
pub fn build_schema(pool: DbPool) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(pool)
        .extension(Tracing)
        .finish()
}
