//! Write-path tests: payload shapes, validation, partial updates, cascades.

mod common;

use common::{create_organization, create_project, create_task, graphql};
use serde_json::json;
use sqlx::PgPool;

const CREATE_ORG: &str = r#"mutation($name: String!, $slug: String!, $email: String!) {
    createOrganization(name: $name, slug: $slug, contactEmail: $email) {
        success errors organization { id slug }
    }
}"#;

async fn organization_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM organizations")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_organization_returns_entity(pool: PgPool) {
    let app = common::build_test_app(pool);

    let org = create_organization(&app, "Acme", "acme").await;

    assert_eq!(org["name"], "Acme");
    assert_eq!(org["slug"], "acme");
    assert_eq!(org["contactEmail"], "team@acme.test");
    assert!(org["id"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_slug_fails_without_creating_a_row(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    create_organization(&app, "Acme", "acme").await;

    let body = graphql(
        &app,
        CREATE_ORG,
        json!({ "name": "Acme Again", "slug": "acme", "email": "other@acme.test" }),
    )
    .await;

    let payload = &body["data"]["createOrganization"];
    assert_eq!(payload["success"], false);
    assert!(payload["organization"].is_null());
    assert_eq!(
        payload["errors"],
        json!(["Organization with slug 'acme' already exists"])
    );
    assert!(body.get("errors").is_none(), "no request-level error: {body}");
    assert_eq!(organization_count(&pool).await, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_input_reports_every_field(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let body = graphql(
        &app,
        CREATE_ORG,
        json!({ "name": "  ", "slug": "has spaces", "email": "not-an-email" }),
    )
    .await;

    let payload = &body["data"]["createOrganization"];
    assert_eq!(payload["success"], false);
    let errors = payload["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 3, "{errors:?}");
    assert_eq!(errors[0], "name is required");
    assert_eq!(organization_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_project_applies_defaults(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_organization(&app, "Acme", "acme").await;

    let body = graphql(
        &app,
        r#"mutation {
            createProject(organizationSlug: "acme", name: "Website", dueDate: "2030-06-30") {
                success errors project { name description status dueDate organization { slug } }
            }
        }"#,
        json!({}),
    )
    .await;

    let payload = &body["data"]["createProject"];
    assert_eq!(payload["success"], true, "{body}");
    assert_eq!(payload["project"]["description"], "");
    assert_eq!(payload["project"]["status"], "ACTIVE");
    assert_eq!(payload["project"]["dueDate"], "2030-06-30");
    assert_eq!(payload["project"]["organization"]["slug"], "acme");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_project_in_unknown_organization_fails(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = graphql(
        &app,
        r#"mutation { createProject(organizationSlug: "ghost", name: "Website") {
            success errors project { id }
        } }"#,
        json!({}),
    )
    .await;

    let payload = &body["data"]["createProject"];
    assert_eq!(payload["success"], false);
    assert!(payload["project"].is_null());
    assert_eq!(
        payload["errors"],
        json!(["Organization with slug 'ghost' not found"])
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_task_status_leaves_other_fields_unchanged(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_organization(&app, "Acme", "acme").await;
    let project_id = create_project(&app, "acme", "Website").await;

    let body = graphql(
        &app,
        r#"mutation($projectId: ID!) {
            createTask(projectId: $projectId, title: "Ship", description: "Go live",
                       assigneeEmail: "dev@acme.test", dueDate: "2030-01-01T12:00:00Z") {
                task { id }
            }
        }"#,
        json!({ "projectId": project_id }),
    )
    .await;
    let task_id = body["data"]["createTask"]["task"]["id"].as_str().unwrap().to_string();

    let body = graphql(
        &app,
        r#"mutation($id: ID!) { updateTask(taskId: $id, status: DONE) { success errors } }"#,
        json!({ "id": task_id }),
    )
    .await;
    assert_eq!(body["data"]["updateTask"]["success"], true, "{body}");

    let body = graphql(
        &app,
        "query($id: ID!) { task(id: $id) { title description status assigneeEmail dueDate } }",
        json!({ "id": task_id }),
    )
    .await;
    let task = &body["data"]["task"];
    assert_eq!(task["status"], "DONE");
    assert_eq!(task["title"], "Ship");
    assert_eq!(task["description"], "Go live");
    assert_eq!(task["assigneeEmail"], "dev@acme.test");
    assert!(task["dueDate"].as_str().unwrap().starts_with("2030-01-01T12:00:00"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_organization_keeps_slug(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_organization(&app, "Acme", "acme").await;

    let body = graphql(
        &app,
        r#"mutation { updateOrganization(slug: "acme", name: "Acme Corp") {
            success organization { name slug contactEmail }
        } }"#,
        json!({}),
    )
    .await;

    let payload = &body["data"]["updateOrganization"];
    assert_eq!(payload["success"], true, "{body}");
    assert_eq!(payload["organization"]["name"], "Acme Corp");
    assert_eq!(payload["organization"]["slug"], "acme");
    assert_eq!(payload["organization"]["contactEmail"], "team@acme.test");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn comment_requires_content_and_valid_author(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_organization(&app, "Acme", "acme").await;
    let project_id = create_project(&app, "acme", "Website").await;
    let task_id = create_task(&app, &project_id, "Design", "TODO").await;

    let body = graphql(
        &app,
        r#"mutation($taskId: ID!) {
            createTaskComment(taskId: $taskId, content: "", authorEmail: "nobody") {
                success errors comment { id }
            }
        }"#,
        json!({ "taskId": task_id }),
    )
    .await;

    let payload = &body["data"]["createTaskComment"];
    assert_eq!(payload["success"], false);
    assert!(payload["comment"].is_null());
    assert_eq!(payload["errors"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_organization_cascades(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    create_organization(&app, "Acme", "acme").await;
    let project_id = create_project(&app, "acme", "Website").await;
    let task_id = create_task(&app, &project_id, "Design", "TODO").await;
    let body = graphql(
        &app,
        r#"mutation($taskId: ID!) {
            createTaskComment(taskId: $taskId, content: "hi", authorEmail: "dev@acme.test") {
                success
            }
        }"#,
        json!({ "taskId": task_id }),
    )
    .await;
    assert_eq!(body["data"]["createTaskComment"]["success"], true);

    let body = graphql(
        &app,
        r#"mutation { deleteOrganization(slug: "acme") { success errors } }"#,
        json!({}),
    )
    .await;
    assert_eq!(body["data"]["deleteOrganization"], json!({ "success": true, "errors": [] }));

    for table in ["organizations", "projects", "tasks", "task_comments"] {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0, "{table} should be empty");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_task_then_lookup_is_not_found(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_organization(&app, "Acme", "acme").await;
    let project_id = create_project(&app, "acme", "Website").await;
    let task_id = create_task(&app, &project_id, "Design", "TODO").await;

    let delete = r#"mutation($id: ID!) { deleteTask(taskId: $id) { success errors } }"#;

    let body = graphql(&app, delete, json!({ "id": task_id })).await;
    assert_eq!(body["data"]["deleteTask"]["success"], true);

    let body = graphql(&app, delete, json!({ "id": task_id })).await;
    assert_eq!(body["data"]["deleteTask"]["success"], false);
    assert_eq!(
        body["data"]["deleteTask"]["errors"],
        json!([format!("Task with ID '{task_id}' not found")])
    );
}
