//! Organization scoping through the `x-organization-slug` header.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_organization, create_project, create_task, error_code, graphql_scoped,
    post_graphql_raw,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn scoped_listing_shows_only_own_organization(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_organization(&app, "Acme", "acme").await;
    create_organization(&app, "Globex", "globex").await;

    let body = graphql_scoped(&app, "acme", "{ organizations { slug } }", json!({})).await;

    assert_eq!(body["data"]["organizations"], json!([{ "slug": "acme" }]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn foreign_entities_read_as_not_found(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_organization(&app, "Acme", "acme").await;
    create_organization(&app, "Globex", "globex").await;
    let project_id = create_project(&app, "globex", "Secret").await;
    let task_id = create_task(&app, &project_id, "Plan", "TODO").await;

    let reads = [
        (r#"{ organization(slug: "globex") { id } }"#, json!({})),
        (r#"{ projects(organizationSlug: "globex") { id } }"#, json!({})),
        ("query($id: ID!) { project(id: $id) { id } }", json!({ "id": project_id })),
        ("query($id: ID!) { tasks(projectId: $id) { id } }", json!({ "id": project_id })),
        ("query($id: ID!) { task(id: $id) { id } }", json!({ "id": task_id })),
    ];
    for (query, variables) in reads {
        let body = graphql_scoped(&app, "acme", query, variables).await;
        assert_eq!(error_code(&body), Some("NOT_FOUND"), "{query} -> {body}");
    }

    let body = graphql_scoped(
        &app,
        "acme",
        "query($id: ID!) { taskComments(taskId: $id) { id } }",
        json!({ "id": task_id }),
    )
    .await;
    assert_eq!(body["data"]["taskComments"], json!([]));

    // The owner still sees everything.
    let body = graphql_scoped(
        &app,
        "globex",
        "query($id: ID!) { task(id: $id) { title } }",
        json!({ "id": task_id }),
    )
    .await;
    assert_eq!(body["data"]["task"]["title"], "Plan");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn foreign_mutations_fail_as_not_found(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    create_organization(&app, "Acme", "acme").await;
    create_organization(&app, "Globex", "globex").await;
    let project_id = create_project(&app, "globex", "Secret").await;

    let body = graphql_scoped(
        &app,
        "acme",
        r#"mutation($id: ID!) {
            updateProject(projectId: $id, name: "Hijacked") { success errors }
        }"#,
        json!({ "id": project_id }),
    )
    .await;
    let payload = &body["data"]["updateProject"];
    assert_eq!(payload["success"], false);
    assert_eq!(
        payload["errors"],
        json!([format!("Project with ID '{project_id}' not found")])
    );

    let body = graphql_scoped(
        &app,
        "acme",
        r#"mutation { deleteOrganization(slug: "globex") { success } }"#,
        json!({}),
    )
    .await;
    assert_eq!(body["data"]["deleteOrganization"]["success"], false);

    let name: String = sqlx::query_scalar("SELECT name FROM projects WHERE id = $1")
        .bind(project_id.parse::<i64>().unwrap())
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(name, "Secret");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn scoped_request_cannot_create_organizations(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_organization(&app, "Acme", "acme").await;

    let body = graphql_scoped(
        &app,
        "acme",
        r#"mutation { createOrganization(name: "New", slug: "new", contactEmail: "a@new.test") {
            success errors
        } }"#,
        json!({}),
    )
    .await;

    let payload = &body["data"]["createOrganization"];
    assert_eq!(payload["success"], false);
    assert_eq!(payload["errors"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_header_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_graphql_raw(
        app,
        "{ organizations { id } }",
        json!({}),
        Some("not a slug"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}
