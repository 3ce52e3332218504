//! Overlapping fetches of one list against a server that answers out of order.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use orgboard_client::config::ClientConfig;
use orgboard_client::models::Project;
use orgboard_client::store::{ListQuery, Store};
use serde_json::{json, Value};

fn project(name: &str) -> Value {
    json!({
        "id": "1",
        "name": name,
        "description": "",
        "status": "ACTIVE",
        "dueDate": null,
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z",
        "taskCount": 0,
        "completedTasks": 0,
        "completionRate": 0.0
    })
}

/// The first request is answered after 200 ms as "Old", every later one
/// after 1000 ms as "New".
async fn answer(State(hits): State<Arc<AtomicUsize>>) -> Json<Value> {
    let (delay, name) = match hits.fetch_add(1, Ordering::SeqCst) {
        0 => (200, "Old"),
        _ => (1000, "New"),
    };
    tokio::time::sleep(Duration::from_millis(delay)).await;
    Json(json!({ "data": { "projects": [project(name)] } }))
}

async fn spawn_slow_server() -> String {
    let app = Router::new()
        .route("/graphql", post(answer))
        .with_state(Arc::new(AtomicUsize::new(0)));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/graphql")
}

fn names(projects: &[Project]) -> Vec<&str> {
    projects.iter().map(|p| p.name.as_str()).collect()
}

#[tokio::test]
async fn superseded_fetch_returns_its_own_rows() {
    let url = spawn_slow_server().await;
    let store = Store::from_config(&ClientConfig {
        api_url: url,
        ..ClientConfig::default()
    })
    .unwrap();

    let first = {
        let store = store.clone();
        tokio::spawn(async move { store.projects("acme", None).await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    let second = {
        let store = store.clone();
        tokio::spawn(async move { store.projects("acme", None).await })
    };

    let first = first.await.unwrap().unwrap();
    assert_eq!(names(&first), vec!["Old"]);

    // The overtaken response never reached the cache.
    let query = ListQuery::Projects {
        organization_slug: "acme".into(),
        status: None,
    };
    assert_eq!(store.cached_list::<Project>(&query), None);

    let second = second.await.unwrap().unwrap();
    assert_eq!(names(&second), vec!["New"]);
    let cached: Vec<Project> = store.cached_list(&query).unwrap();
    assert_eq!(names(&cached), vec!["New"]);
}
