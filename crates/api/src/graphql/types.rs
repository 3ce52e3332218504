//! GraphQL object types wrapping the database row models.
//!
//! Derived fields (`taskCount`, `completedTasks`, `completionRate`,
//! `isOverdue`, `commentCount`) are computed on every read from the current
//! child rows. Nested relations are resolved lazily and inherit the scope
//! check already performed on their parent.

use async_graphql::{Context, Enum, Object, ID};
use chrono::Utc;
use orgboard_core::error::CoreError;
use orgboard_core::progress;
use orgboard_core::status::{ProjectStatus, TaskStatus};
use orgboard_core::types::{Date, Timestamp};
use orgboard_db::models::organization::Organization;
use orgboard_db::models::project::Project;
use orgboard_db::models::task::Task;
use orgboard_db::models::task_comment::TaskComment;
use orgboard_db::repositories::{OrganizationRepo, ProjectRepo, TaskCommentRepo, TaskRepo};

use crate::error::{AppError, GqlResultExt};
use crate::graphql::access::pool;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Project lifecycle status as exposed over GraphQL.
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
#[graphql(name = "ProjectStatus")]
pub enum GqlProjectStatus {
    Active,
    Completed,
    OnHold,
}

impl From<ProjectStatus> for GqlProjectStatus {
    fn from(value: ProjectStatus) -> Self {
        match value {
            ProjectStatus::Active => Self::Active,
            ProjectStatus::Completed => Self::Completed,
            ProjectStatus::OnHold => Self::OnHold,
        }
    }
}

impl From<GqlProjectStatus> for ProjectStatus {
    fn from(value: GqlProjectStatus) -> Self {
        match value {
            GqlProjectStatus::Active => Self::Active,
            GqlProjectStatus::Completed => Self::Completed,
            GqlProjectStatus::OnHold => Self::OnHold,
        }
    }
}

/// Task workflow status as exposed over GraphQL.
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
#[graphql(name = "TaskStatus")]
pub enum GqlTaskStatus {
    Todo,
    InProgress,
    Done,
}

impl From<TaskStatus> for GqlTaskStatus {
    fn from(value: TaskStatus) -> Self {
        match value {
            TaskStatus::Todo => Self::Todo,
            TaskStatus::InProgress => Self::InProgress,
            TaskStatus::Done => Self::Done,
        }
    }
}

impl From<GqlTaskStatus> for TaskStatus {
    fn from(value: GqlTaskStatus) -> Self {
        match value {
            GqlTaskStatus::Todo => Self::Todo,
            GqlTaskStatus::InProgress => Self::InProgress,
            GqlTaskStatus::Done => Self::Done,
        }
    }
}

fn gql_id(id: i64) -> ID {
    ID(id.to_string())
}

/// A parent row vanished between loading a child and resolving the relation.
fn missing_parent(entity: &'static str, id: i64) -> AppError {
    AppError::Core(CoreError::not_found_id(entity, id))
}

// ---------------------------------------------------------------------------
// Organization
// ---------------------------------------------------------------------------

pub struct OrganizationObject(pub Organization);

#[Object(name = "Organization")]
impl OrganizationObject {
    async fn id(&self) -> ID {
        gql_id(self.0.id)
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    /// URL-friendly tenant identifier; immutable after creation.
    async fn slug(&self) -> &str {
        &self.0.slug
    }

    async fn contact_email(&self) -> &str {
        &self.0.contact_email
    }

    async fn created_at(&self) -> Timestamp {
        self.0.created_at
    }

    /// The organization's projects, most recently created first.
    async fn projects(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<ProjectObject>> {
        let pool = pool(ctx)?;
        let projects = ProjectRepo::list_by_organization(pool, self.0.id, None)
            .await
            .gql()?;
        Ok(projects.into_iter().map(ProjectObject).collect())
    }
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

pub struct ProjectObject(pub Project);

#[Object(name = "Project")]
impl ProjectObject {
    async fn id(&self) -> ID {
        gql_id(self.0.id)
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn description(&self) -> &str {
        &self.0.description
    }

    async fn status(&self) -> GqlProjectStatus {
        self.0.status.into()
    }

    async fn due_date(&self) -> Option<Date> {
        self.0.due_date
    }

    async fn created_at(&self) -> Timestamp {
        self.0.created_at
    }

    async fn updated_at(&self) -> Timestamp {
        self.0.updated_at
    }

    async fn organization(&self, ctx: &Context<'_>) -> async_graphql::Result<OrganizationObject> {
        let pool = pool(ctx)?;
        let org = OrganizationRepo::find_by_id(pool, self.0.organization_id)
            .await
            .gql()?
            .ok_or_else(|| missing_parent("Organization", self.0.organization_id))
            .gql()?;
        Ok(OrganizationObject(org))
    }

    /// The project's tasks, most recently created first.
    async fn tasks(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<TaskObject>> {
        let pool = pool(ctx)?;
        let tasks = TaskRepo::list_by_project(pool, self.0.id, None).await.gql()?;
        Ok(tasks.into_iter().map(TaskObject).collect())
    }

    /// Total number of tasks in this project.
    async fn task_count(&self, ctx: &Context<'_>) -> async_graphql::Result<i64> {
        let counts = TaskRepo::counts_for_project(pool(ctx)?, self.0.id).await.gql()?;
        Ok(counts.total)
    }

    /// Number of tasks in `DONE`.
    async fn completed_tasks(&self, ctx: &Context<'_>) -> async_graphql::Result<i64> {
        let counts = TaskRepo::counts_for_project(pool(ctx)?, self.0.id).await.gql()?;
        Ok(counts.completed)
    }

    /// Percentage of tasks completed (0-100); 0 when the project has no tasks.
    async fn completion_rate(&self, ctx: &Context<'_>) -> async_graphql::Result<f64> {
        let counts = TaskRepo::counts_for_project(pool(ctx)?, self.0.id).await.gql()?;
        Ok(counts.completion_rate())
    }
}

// ---------------------------------------------------------------------------
// Task
// ---------------------------------------------------------------------------

pub struct TaskObject(pub Task);

#[Object(name = "Task")]
impl TaskObject {
    async fn id(&self) -> ID {
        gql_id(self.0.id)
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    async fn description(&self) -> &str {
        &self.0.description
    }

    async fn status(&self) -> GqlTaskStatus {
        self.0.status.into()
    }

    /// Empty when unassigned.
    async fn assignee_email(&self) -> &str {
        &self.0.assignee_email
    }

    async fn due_date(&self) -> Option<Timestamp> {
        self.0.due_date
    }

    async fn created_at(&self) -> Timestamp {
        self.0.created_at
    }

    async fn updated_at(&self) -> Timestamp {
        self.0.updated_at
    }

    async fn project(&self, ctx: &Context<'_>) -> async_graphql::Result<ProjectObject> {
        let pool = pool(ctx)?;
        let project = ProjectRepo::find_by_id(pool, self.0.project_id)
            .await
            .gql()?
            .ok_or_else(|| missing_parent("Project", self.0.project_id))
            .gql()?;
        Ok(ProjectObject(project))
    }

    /// Comments on this task, oldest first.
    async fn comments(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<TaskCommentObject>> {
        let comments = TaskCommentRepo::list_by_task(pool(ctx)?, self.0.id)
            .await
            .gql()?;
        Ok(comments.into_iter().map(TaskCommentObject).collect())
    }

    /// Past its due date and not yet done.
    async fn is_overdue(&self) -> bool {
        progress::is_overdue(self.0.due_date, self.0.status, Utc::now())
    }

    async fn comment_count(&self, ctx: &Context<'_>) -> async_graphql::Result<i64> {
        TaskCommentRepo::count_by_task(pool(ctx)?, self.0.id)
            .await
            .gql()
    }
}

// ---------------------------------------------------------------------------
// TaskComment
// ---------------------------------------------------------------------------

pub struct TaskCommentObject(pub TaskComment);

#[Object(name = "TaskComment")]
impl TaskCommentObject {
    async fn id(&self) -> ID {
        gql_id(self.0.id)
    }

    async fn content(&self) -> &str {
        &self.0.content
    }

    async fn author_email(&self) -> &str {
        &self.0.author_email
    }

    async fn created_at(&self) -> Timestamp {
        self.0.created_at
    }

    async fn task(&self, ctx: &Context<'_>) -> async_graphql::Result<TaskObject> {
        let pool = pool(ctx)?;
        let task = TaskRepo::find_by_id(pool, self.0.task_id)
            .await
            .gql()?
            .ok_or_else(|| missing_parent("Task", self.0.task_id))
            .gql()?;
        Ok(TaskObject(task))
    }
}
