//! Client plus normalized cache.
//!
//! List reads go through ticketed fetches so a slow, superseded response
//! never overwrites a newer one. Every mutation that succeeds re-runs the
//! watched list queries it affects; there is no field-level invalidation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use orgboard_core::status::{ProjectStatus, TaskStatus};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::board::TaskBoard;
use crate::cache::{EntityKind, ListKey, NormalizedCache};
use crate::client::GraphqlClient;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::models::{
    DeleteOutcome, MutationOutcome, NewOrganization, NewProject, NewTask, Organization,
    OrganizationChanges, Project, ProjectChanges, Task, TaskChanges, TaskComment,
};
use crate::operations;

// ---------------------------------------------------------------------------
// List queries
// ---------------------------------------------------------------------------

/// A list query the store can fetch, cache and refetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListQuery {
    Organizations,
    Projects {
        organization_slug: String,
        status: Option<ProjectStatus>,
    },
    Tasks {
        project_id: String,
        status: Option<TaskStatus>,
    },
    TaskComments {
        task_id: String,
    },
}

impl ListQuery {
    fn field(&self) -> &'static str {
        match self {
            Self::Organizations => "organizations",
            Self::Projects { .. } => "projects",
            Self::Tasks { .. } => "tasks",
            Self::TaskComments { .. } => "taskComments",
        }
    }

    fn document(&self) -> &'static str {
        match self {
            Self::Organizations => operations::ORGANIZATIONS,
            Self::Projects { .. } => operations::PROJECTS,
            Self::Tasks { .. } => operations::TASKS,
            Self::TaskComments { .. } => operations::TASK_COMMENTS,
        }
    }

    fn kind(&self) -> EntityKind {
        match self {
            Self::Organizations => EntityKind::Organization,
            Self::Projects { .. } => EntityKind::Project,
            Self::Tasks { .. } => EntityKind::Task,
            Self::TaskComments { .. } => EntityKind::TaskComment,
        }
    }

    fn variables(&self) -> Value {
        match self {
            Self::Organizations => json!({}),
            Self::Projects {
                organization_slug,
                status,
            } => json!({ "organizationSlug": organization_slug, "status": status }),
            Self::Tasks { project_id, status } => {
                json!({ "projectId": project_id, "status": status })
            }
            Self::TaskComments { task_id } => json!({ "taskId": task_id }),
        }
    }

    pub fn key(&self) -> ListKey {
        ListKey::new(self.field(), &self.variables())
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct StoreState {
    cache: NormalizedCache,
    watched: HashMap<ListKey, ListQuery>,
}

/// Shared handle to the client and its cache. Clones share the cache.
#[derive(Debug, Clone)]
pub struct Store {
    client: GraphqlClient,
    state: Arc<Mutex<StoreState>>,
}

impl Store {
    pub fn new(client: GraphqlClient) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(StoreState::default())),
        }
    }

    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::new(GraphqlClient::new(config)?))
    }

    pub fn client(&self) -> &GraphqlClient {
        &self.client
    }

    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ---- cache access ----

    /// Cached result of a list query, without touching the network.
    pub fn cached_list<T: DeserializeOwned>(&self, query: &ListQuery) -> Option<Vec<T>> {
        self.state().cache.read_list_as(&query.key())?.ok()
    }

    pub fn cached_entity<T: DeserializeOwned>(&self, kind: EntityKind, id: &str) -> Option<T> {
        self.state().cache.read_entity_as(kind, id)?.ok()
    }

    /// Number of list queries that will be refetched after mutations.
    pub fn watched_count(&self) -> usize {
        self.state().watched.len()
    }

    fn write_entity<T: serde::Serialize>(&self, kind: EntityKind, entity: &T) {
        match serde_json::to_value(entity) {
            Ok(value) => {
                self.state().cache.write_entity(kind, &value);
            }
            Err(err) => {
                tracing::warn!(error = %err, kind = kind.as_str(), "Failed to cache entity")
            }
        }
    }

    // ---- list fetches ----

    /// Fetch a list query, store it and return what the server sent. A
    /// response superseded by a newer fetch of the same list is not cached,
    /// but the caller still gets its rows.
    pub async fn fetch_list<T: DeserializeOwned>(
        &self,
        query: &ListQuery,
    ) -> ClientResult<Vec<T>> {
        let key = query.key();
        let ticket = {
            let mut state = self.state();
            state.watched.insert(key.clone(), query.clone());
            state.cache.begin_list(key.clone())
        };

        let items: Vec<Value> = self
            .client
            .execute_field(query.document(), query.variables(), query.field())
            .await?;

        let values = {
            let mut state = self.state();
            if state.cache.commit_list(ticket, query.kind(), &items) {
                state.cache.read_list(&key).unwrap_or(items)
            } else {
                items
            }
        };

        values
            .into_iter()
            .map(|v| serde_json::from_value(v).map_err(ClientError::from))
            .collect()
    }

    pub async fn organizations(&self) -> ClientResult<Vec<Organization>> {
        self.fetch_list(&ListQuery::Organizations).await
    }

    pub async fn projects(
        &self,
        organization_slug: &str,
        status: Option<ProjectStatus>,
    ) -> ClientResult<Vec<Project>> {
        self.fetch_list(&ListQuery::Projects {
            organization_slug: organization_slug.to_string(),
            status,
        })
        .await
    }

    pub async fn tasks(
        &self,
        project_id: &str,
        status: Option<TaskStatus>,
    ) -> ClientResult<Vec<Task>> {
        self.fetch_list(&ListQuery::Tasks {
            project_id: project_id.to_string(),
            status,
        })
        .await
    }

    pub async fn task_comments(&self, task_id: &str) -> ClientResult<Vec<TaskComment>> {
        self.fetch_list(&ListQuery::TaskComments {
            task_id: task_id.to_string(),
        })
        .await
    }

    /// The board for one project, built from its full task list.
    pub async fn board(&self, project_id: &str) -> ClientResult<TaskBoard> {
        Ok(TaskBoard::from_tasks(self.tasks(project_id, None).await?))
    }

    // ---- single entities ----

    pub async fn organization(&self, slug: &str) -> ClientResult<Organization> {
        let org = self.client.organization(slug).await?;
        self.write_entity(EntityKind::Organization, &org);
        Ok(org)
    }

    pub async fn project(&self, id: &str) -> ClientResult<Project> {
        let project = self.client.project(id).await?;
        self.write_entity(EntityKind::Project, &project);
        Ok(project)
    }

    pub async fn task(&self, id: &str) -> ClientResult<Task> {
        let task = self.client.task(id).await?;
        self.write_entity(EntityKind::Task, &task);
        Ok(task)
    }

    /// A task with its comment thread, oldest comment first.
    pub async fn task_detail(&self, task_id: &str) -> ClientResult<TaskDetail> {
        let task = self.task(task_id).await?;
        let comments = self.task_comments(task_id).await?;
        Ok(TaskDetail { task, comments })
    }

    // ---- mutations ----

    pub async fn create_organization(
        &self,
        input: &NewOrganization,
    ) -> ClientResult<MutationOutcome<Organization>> {
        let outcome = self.client.create_organization(input).await?;
        if outcome.success {
            self.refetch_where(|q| matches!(q, ListQuery::Organizations)).await;
        }
        Ok(outcome)
    }

    pub async fn update_organization(
        &self,
        slug: &str,
        changes: &OrganizationChanges,
    ) -> ClientResult<MutationOutcome<Organization>> {
        let outcome = self.client.update_organization(slug, changes).await?;
        if let Some(org) = outcome.entity.as_ref().filter(|_| outcome.success) {
            self.write_entity(EntityKind::Organization, org);
            self.refetch_where(|q| matches!(q, ListQuery::Organizations)).await;
        }
        Ok(outcome)
    }

    pub async fn delete_organization(&self, slug: &str) -> ClientResult<DeleteOutcome> {
        let outcome = self.client.delete_organization(slug).await?;
        if outcome.success {
            self.forget(|q| {
                matches!(q, ListQuery::Projects { organization_slug: s, .. } if s == slug)
            });
            self.refetch_where(|q| matches!(q, ListQuery::Organizations)).await;
        }
        Ok(outcome)
    }

    pub async fn create_project(
        &self,
        input: &NewProject,
    ) -> ClientResult<MutationOutcome<Project>> {
        let outcome = self.client.create_project(input).await?;
        if outcome.success {
            let slug = input.organization_slug.as_str();
            self.refetch_where(|q| {
                matches!(q, ListQuery::Projects { organization_slug: s, .. } if s == slug)
            })
            .await;
        }
        Ok(outcome)
    }

    pub async fn update_project(
        &self,
        project_id: &str,
        changes: &ProjectChanges,
    ) -> ClientResult<MutationOutcome<Project>> {
        let outcome = self.client.update_project(project_id, changes).await?;
        if let Some(project) = outcome.entity.as_ref().filter(|_| outcome.success) {
            self.write_entity(EntityKind::Project, project);
            self.refetch_where(|q| matches!(q, ListQuery::Projects { .. })).await;
        }
        Ok(outcome)
    }

    pub async fn delete_project(&self, project_id: &str) -> ClientResult<DeleteOutcome> {
        let outcome = self.client.delete_project(project_id).await?;
        if outcome.success {
            self.state().cache.evict(EntityKind::Project, project_id);
            self.forget(|q| matches!(q, ListQuery::Tasks { project_id: p, .. } if p == project_id));
            self.refetch_where(|q| matches!(q, ListQuery::Projects { .. })).await;
        }
        Ok(outcome)
    }

    pub async fn create_task(&self, input: &NewTask) -> ClientResult<MutationOutcome<Task>> {
        let outcome = self.client.create_task(input).await?;
        if outcome.success {
            self.after_task_change(Some(&input.project_id)).await;
        }
        Ok(outcome)
    }

    pub async fn update_task(
        &self,
        task_id: &str,
        changes: &TaskChanges,
    ) -> ClientResult<MutationOutcome<Task>> {
        let outcome = self.client.update_task(task_id, changes).await?;
        if let Some(task) = outcome.entity.as_ref().filter(|_| outcome.success) {
            self.write_entity(EntityKind::Task, task);
            self.after_task_change(None).await;
        }
        Ok(outcome)
    }

    pub async fn delete_task(&self, task_id: &str) -> ClientResult<DeleteOutcome> {
        let outcome = self.client.delete_task(task_id).await?;
        if outcome.success {
            self.state().cache.evict(EntityKind::Task, task_id);
            self.forget(|q| matches!(q, ListQuery::TaskComments { task_id: t } if t == task_id));
            self.after_task_change(None).await;
        }
        Ok(outcome)
    }

    /// Apply a board drop: issue the `updateTask` it maps to, then refetch the
    /// project and its task lists. `Ok(None)` when the drop is a no-op.
    pub async fn drop_task(
        &self,
        project_id: &str,
        board: &TaskBoard,
        task_id: &str,
        target: TaskStatus,
    ) -> ClientResult<Option<MutationOutcome<Task>>> {
        let Some(mv) = board.on_drop(task_id, target) else {
            return Ok(None);
        };
        tracing::debug!(
            task_id = %mv.task_id,
            from = mv.from.as_str(),
            to = mv.to.as_str(),
            "Task dropped"
        );

        let outcome = self.client.update_task(&mv.task_id, &mv.changes()).await?;
        if let Some(task) = outcome.entity.as_ref().filter(|_| outcome.success) {
            self.write_entity(EntityKind::Task, task);
            self.after_task_change(Some(project_id)).await;
            if let Err(err) = self.project(project_id).await {
                tracing::warn!(error = %err, project_id, "Failed to refetch project after drop");
            }
        }
        Ok(Some(outcome))
    }

    /// Post a comment and refetch the task's thread.
    pub async fn add_comment(
        &self,
        task_id: &str,
        content: &str,
        author_email: &str,
    ) -> ClientResult<MutationOutcome<TaskComment>> {
        let outcome = self
            .client
            .create_task_comment(task_id, content, author_email)
            .await?;
        if outcome.success {
            self.refetch_where(|q| {
                matches!(q, ListQuery::TaskComments { task_id: t } if t == task_id)
            })
            .await;
        }
        Ok(outcome)
    }

    // ---- refetch ----

    /// Task writes change task lists and the derived counts on projects.
    async fn after_task_change(&self, project_id: Option<&str>) {
        self.refetch_where(|q| match q {
            ListQuery::Tasks { project_id: p, .. } => project_id.map_or(true, |id| id == p),
            ListQuery::Projects { .. } => true,
            _ => false,
        })
        .await;
    }

    /// Re-run every watched list query matching `affected`. Failures are
    /// logged; the mutation that triggered the refetch has already committed.
    pub async fn refetch_where(&self, affected: impl Fn(&ListQuery) -> bool) {
        let queries: Vec<ListQuery> = self
            .state()
            .watched
            .values()
            .filter(|q| affected(q))
            .cloned()
            .collect();

        for query in queries {
            if let Err(err) = self.fetch_list::<Value>(&query).await {
                tracing::warn!(error = %err, operation = query.field(), "Refetch failed");
            }
        }
    }

    /// Stop watching lists matching `gone` and drop them from the cache along
    /// with the entities they referenced.
    fn forget(&self, gone: impl Fn(&ListQuery) -> bool) {
        let mut state = self.state();
        let keys: Vec<ListKey> = state
            .watched
            .iter()
            .filter(|(_, q)| gone(q))
            .map(|(key, _)| key.clone())
            .collect();
        for key in keys {
            state.watched.remove(&key);
            for entity in state.cache.remove_list(&key) {
                state.cache.evict(entity.kind, &entity.id);
            }
        }
    }
}

/// A task with its comment thread.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDetail {
    pub task: Task,
    pub comments: Vec<TaskComment>,
}
