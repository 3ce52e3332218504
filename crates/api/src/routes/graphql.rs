//! GraphQL transport: `POST /graphql` executes, `GET /graphql` serves GraphiQL.

use async_graphql::http::GraphiQLSource;
use axum::extract::State;
use axum::response::Html;
use axum::routing::post;
use axum::{Json, Router};

use crate::graphql::TenantScope;
use crate::middleware::tenant::OrganizationContext;
use crate::state::AppState;

/// Path the schema is served on.
pub const GRAPHQL_PATH: &str = "/graphql";

/// POST /graphql -- execute one GraphQL request in the caller's organization scope.
async fn execute(
    State(state): State<AppState>,
    OrganizationContext(slug): OrganizationContext,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    if let Some(slug) = slug.as_deref() {
        tracing::debug!(organization = slug, "Scoped GraphQL request");
    }
    let request = request.data(TenantScope::new(slug));
    Json(state.schema.execute(request).await)
}

/// GET /graphql -- interactive GraphiQL IDE pointed at this endpoint.
async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

/// Mount the GraphQL routes, with and without a trailing slash.
pub fn router(graphiql_enabled: bool) -> Router<AppState> {
    let method_router = if graphiql_enabled {
        post(execute).get(graphiql)
    } else {
        post(execute)
    };

    Router::new()
        .route(GRAPHQL_PATH, method_router.clone())
        .route("/graphql/", method_router)
}
