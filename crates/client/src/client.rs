//! HTTP client for the orgboard GraphQL endpoint.
//!
//! Wraps `POST /graphql` using [`reqwest`] and exposes one typed method per
//! query and mutation.

use std::time::Duration;

use orgboard_core::status::{ProjectStatus, TaskStatus};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::models::{
    DeleteOutcome, MutationOutcome, NewOrganization, NewProject, NewTask, Organization,
    OrganizationChanges, Project, ProjectChanges, Task, TaskChanges, TaskComment,
};
use crate::operations;

/// Header naming the organization a request acts on behalf of.
pub const ORGANIZATION_HEADER: &str = "x-organization-slug";

/// GraphQL client for a single API server.
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    http: reqwest::Client,
    endpoint: String,
    organization_slug: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlErrorBody>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorBody {
    message: String,
    #[serde(default)]
    extensions: Option<Value>,
}

impl GraphqlClient {
    /// Build a client from configuration.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self::with_client(
            http,
            config.api_url.clone(),
            config.organization_slug.clone(),
        ))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        http: reqwest::Client,
        endpoint: String,
        organization_slug: Option<String>,
    ) -> Self {
        Self {
            http,
            endpoint,
            organization_slug,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn organization_slug(&self) -> Option<&str> {
        self.organization_slug.as_deref()
    }

    /// Execute a document and return its raw `data` object.
    pub async fn execute(&self, query: &str, variables: Value) -> ClientResult<Value> {
        let mut request = self
            .http
            .post(&self.endpoint)
            .json(&json!({ "query": query, "variables": variables }));
        if let Some(slug) = &self.organization_slug {
            request = request.header(ORGANIZATION_HEADER, slug);
        }

        let response = Self::ensure_success(request.send().await?).await?;
        let body: GraphqlResponse = response.json().await?;

        if !body.errors.is_empty() {
            let code = body.errors[0]
                .extensions
                .as_ref()
                .and_then(|ext| ext.get("code"))
                .and_then(Value::as_str)
                .map(str::to_string);
            let messages: Vec<String> = body.errors.into_iter().map(|e| e.message).collect();
            tracing::debug!(?code, ?messages, "GraphQL request failed");
            return Err(ClientError::Graphql { messages, code });
        }

        body.data
            .ok_or_else(|| ClientError::Decode("response has neither data nor errors".into()))
    }

    /// Execute a document and decode the single root field `field`.
    pub async fn execute_field<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
        field: &str,
    ) -> ClientResult<T> {
        let data = self.execute(query, variables).await?;
        decode_field(data, field)
    }

    // ---- queries ----

    pub async fn organizations(&self) -> ClientResult<Vec<Organization>> {
        self.execute_field(operations::ORGANIZATIONS, json!({}), "organizations")
            .await
    }

    pub async fn organization(&self, slug: &str) -> ClientResult<Organization> {
        self.execute_field(operations::ORGANIZATION, json!({ "slug": slug }), "organization")
            .await
    }

    pub async fn projects(
        &self,
        organization_slug: &str,
        status: Option<ProjectStatus>,
    ) -> ClientResult<Vec<Project>> {
        self.execute_field(
            operations::PROJECTS,
            json!({ "organizationSlug": organization_slug, "status": status }),
            "projects",
        )
        .await
    }

    pub async fn project(&self, id: &str) -> ClientResult<Project> {
        self.execute_field(operations::PROJECT, json!({ "id": id }), "project")
            .await
    }

    pub async fn tasks(
        &self,
        project_id: &str,
        status: Option<TaskStatus>,
    ) -> ClientResult<Vec<Task>> {
        self.execute_field(
            operations::TASKS,
            json!({ "projectId": project_id, "status": status }),
            "tasks",
        )
        .await
    }

    pub async fn task(&self, id: &str) -> ClientResult<Task> {
        self.execute_field(operations::TASK, json!({ "id": id }), "task")
            .await
    }

    pub async fn task_comments(&self, task_id: &str) -> ClientResult<Vec<TaskComment>> {
        self.execute_field(
            operations::TASK_COMMENTS,
            json!({ "taskId": task_id }),
            "taskComments",
        )
        .await
    }

    // ---- mutations ----

    pub async fn create_organization(
        &self,
        input: &NewOrganization,
    ) -> ClientResult<MutationOutcome<Organization>> {
        self.mutate(
            operations::CREATE_ORGANIZATION,
            serde_json::to_value(input)?,
            "createOrganization",
            "organization",
        )
        .await
    }

    pub async fn update_organization(
        &self,
        slug: &str,
        changes: &OrganizationChanges,
    ) -> ClientResult<MutationOutcome<Organization>> {
        self.mutate(
            operations::UPDATE_ORGANIZATION,
            with_key(changes, "slug", slug)?,
            "updateOrganization",
            "organization",
        )
        .await
    }

    pub async fn delete_organization(&self, slug: &str) -> ClientResult<DeleteOutcome> {
        self.execute_field(
            operations::DELETE_ORGANIZATION,
            json!({ "slug": slug }),
            "deleteOrganization",
        )
        .await
    }

    pub async fn create_project(
        &self,
        input: &NewProject,
    ) -> ClientResult<MutationOutcome<Project>> {
        self.mutate(
            operations::CREATE_PROJECT,
            serde_json::to_value(input)?,
            "createProject",
            "project",
        )
        .await
    }

    pub async fn update_project(
        &self,
        project_id: &str,
        changes: &ProjectChanges,
    ) -> ClientResult<MutationOutcome<Project>> {
        self.mutate(
            operations::UPDATE_PROJECT,
            with_key(changes, "projectId", project_id)?,
            "updateProject",
            "project",
        )
        .await
    }

    pub async fn delete_project(&self, project_id: &str) -> ClientResult<DeleteOutcome> {
        self.execute_field(
            operations::DELETE_PROJECT,
            json!({ "projectId": project_id }),
            "deleteProject",
        )
        .await
    }

    pub async fn create_task(&self, input: &NewTask) -> ClientResult<MutationOutcome<Task>> {
        self.mutate(
            operations::CREATE_TASK,
            serde_json::to_value(input)?,
            "createTask",
            "task",
        )
        .await
    }

    pub async fn update_task(
        &self,
        task_id: &str,
        changes: &TaskChanges,
    ) -> ClientResult<MutationOutcome<Task>> {
        self.mutate(
            operations::UPDATE_TASK,
            with_key(changes, "taskId", task_id)?,
            "updateTask",
            "task",
        )
        .await
    }

    pub async fn delete_task(&self, task_id: &str) -> ClientResult<DeleteOutcome> {
        self.execute_field(
            operations::DELETE_TASK,
            json!({ "taskId": task_id }),
            "deleteTask",
        )
        .await
    }

    pub async fn create_task_comment(
        &self,
        task_id: &str,
        content: &str,
        author_email: &str,
    ) -> ClientResult<MutationOutcome<TaskComment>> {
        self.mutate(
            operations::CREATE_TASK_COMMENT,
            json!({ "taskId": task_id, "content": content, "authorEmail": author_email }),
            "createTaskComment",
            "comment",
        )
        .await
    }

    // ---- private helpers ----

    /// Run a mutation and decode its `{<entity>, success, errors}` payload.
    async fn mutate<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
        field: &str,
        entity_field: &str,
    ) -> ClientResult<MutationOutcome<T>> {
        let payload: Value = self.execute_field(query, variables, field).await?;
        decode_payload(payload, entity_field)
    }

    /// Ensure the response has a success status code, or turn the status and
    /// body into [`ClientError::Network`].
    async fn ensure_success(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ClientError::Network {
                status: Some(status.as_u16()),
                message: format!("API responded with {status}: {body}"),
            });
        }
        Ok(response)
    }
}

fn decode_field<T: DeserializeOwned>(mut data: Value, field: &str) -> ClientResult<T> {
    let value = data
        .get_mut(field)
        .map(Value::take)
        .ok_or_else(|| ClientError::Decode(format!("missing field '{field}' in data")))?;
    Ok(serde_json::from_value(value)?)
}

fn decode_payload<T: DeserializeOwned>(
    mut payload: Value,
    entity_field: &str,
) -> ClientResult<MutationOutcome<T>> {
    let success = payload
        .get("success")
        .and_then(Value::as_bool)
        .ok_or_else(|| ClientError::Decode("mutation payload without 'success'".into()))?;
    let errors: Vec<String> = match payload.get_mut("errors").map(Value::take) {
        Some(errors) => serde_json::from_value(errors)?,
        None => Vec::new(),
    };
    let entity = match payload.get_mut(entity_field).map(Value::take) {
        Some(Value::Null) | None => None,
        Some(value) => Some(serde_json::from_value(value)?),
    };
    Ok(MutationOutcome {
        entity,
        success,
        errors,
    })
}

/// Serialize a changes struct and add the identifying argument.
fn with_key<S: serde::Serialize>(changes: &S, key: &str, value: &str) -> ClientResult<Value> {
    let mut variables = serde_json::to_value(changes)?;
    match variables.as_object_mut() {
        Some(map) => {
            map.insert(key.to_string(), Value::String(value.to_string()));
            Ok(variables)
        }
        None => Err(ClientError::Decode("changes must serialize to an object".into())),
    }
}
