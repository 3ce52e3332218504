#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use orgboard_api::app::build_router;
use orgboard_api::config::ServerConfig;
use orgboard_api::middleware::tenant::ORGANIZATION_HEADER;
use orgboard_api::state::AppState;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        graphiql_enabled: true,
        db_max_connections: 5,
    }
}

/// Build the full application router, with the production middleware stack,
/// around the given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_router(AppState::new(pool, test_config()))
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read response body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("response body is not JSON")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a GraphQL document, optionally scoped to one organization.
pub async fn post_graphql_raw(
    app: Router,
    query: &str,
    variables: Value,
    organization: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/graphql")
        .header("content-type", "application/json");
    if let Some(slug) = organization {
        builder = builder.header(ORGANIZATION_HEADER, slug);
    }
    let body = json!({ "query": query, "variables": variables });
    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a GraphQL document and return the decoded response body.
pub async fn graphql(app: &Router, query: &str, variables: Value) -> Value {
    body_json(post_graphql_raw(app.clone(), query, variables, None).await).await
}

pub async fn graphql_scoped(
    app: &Router,
    organization: &str,
    query: &str,
    variables: Value,
) -> Value {
    body_json(post_graphql_raw(app.clone(), query, variables, Some(organization)).await).await
}

/// First error's `extensions.code`, if the response carries errors.
pub fn error_code(body: &Value) -> Option<&str> {
    body["errors"][0]["extensions"]["code"].as_str()
}

// ---------------------------------------------------------------------------
// Seeding through the API
// ---------------------------------------------------------------------------

pub async fn create_organization(app: &Router, name: &str, slug: &str) -> Value {
    let body = graphql(
        app,
        r#"mutation($name: String!, $slug: String!, $email: String!) {
            createOrganization(name: $name, slug: $slug, contactEmail: $email) {
                success errors organization { id name slug contactEmail }
            }
        }"#,
        json!({ "name": name, "slug": slug, "email": format!("team@{slug}.test") }),
    )
    .await;
    let payload = body["data"]["createOrganization"].clone();
    assert_eq!(payload["success"], true, "createOrganization failed: {body}");
    payload["organization"].clone()
}

/// Returns the new project's id.
pub async fn create_project(app: &Router, organization_slug: &str, name: &str) -> String {
    let body = graphql(
        app,
        r#"mutation($slug: String!, $name: String!) {
            createProject(organizationSlug: $slug, name: $name) {
                success errors project { id }
            }
        }"#,
        json!({ "slug": organization_slug, "name": name }),
    )
    .await;
    let payload = &body["data"]["createProject"];
    assert_eq!(payload["success"], true, "createProject failed: {body}");
    payload["project"]["id"].as_str().unwrap().to_string()
}

/// Returns the new task's id.
pub async fn create_task(app: &Router, project_id: &str, title: &str, status: &str) -> String {
    let body = graphql(
        app,
        r#"mutation($projectId: ID!, $title: String!, $status: TaskStatus) {
            createTask(projectId: $projectId, title: $title, status: $status) {
                success errors task { id }
            }
        }"#,
        json!({ "projectId": project_id, "title": title, "status": status }),
    )
    .await;
    let payload = &body["data"]["createTask"];
    assert_eq!(payload["success"], true, "createTask failed: {body}");
    payload["task"]["id"].as_str().unwrap().to_string()
}
