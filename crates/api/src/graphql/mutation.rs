//! Root mutation type.
//!
//! Each mutation writes exactly one row (deletes cascade in the database)
//! and commits immediately. Partial updates apply only the arguments that
//! were provided; omitted or `null` arguments leave the stored value as is.

use async_graphql::{Context, Object, ID};
use orgboard_core::error::CoreError;
use orgboard_core::types::{Date, DbId, Timestamp};
use orgboard_core::validation::{
    validate_comment_content, validate_email, validate_name, validate_optional_email,
    validate_slug, MAX_ORGANIZATION_NAME_LEN, MAX_PROJECT_NAME_LEN, MAX_TASK_TITLE_LEN,
};
use orgboard_db::models::organization::{CreateOrganization, UpdateOrganization};
use orgboard_db::models::project::{CreateProject, UpdateProject};
use orgboard_db::models::task::{CreateTask, UpdateTask};
use orgboard_db::models::task_comment::CreateTaskComment;
use orgboard_db::repositories::{OrganizationRepo, ProjectRepo, TaskCommentRepo, TaskRepo};
use orgboard_db::DbPool;

use crate::error::{validate_all, AppError, AppResult};
use crate::graphql::access::{self, parse_id, pool, scope, TenantScope};
use crate::graphql::payload::{
    DeletePayload, OrganizationPayload, ProjectPayload, TaskCommentPayload, TaskPayload,
};
use crate::graphql::types::{
    GqlProjectStatus, GqlTaskStatus, OrganizationObject, ProjectObject, TaskCommentObject,
    TaskObject,
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create a new organization. Fails when the slug is already taken.
    async fn create_organization(
        &self,
        ctx: &Context<'_>,
        name: String,
        slug: String,
        contact_email: String,
    ) -> async_graphql::Result<OrganizationPayload> {
        let input = CreateOrganization {
            name,
            slug,
            contact_email,
        };
        Ok(create_organization(pool(ctx)?, scope(ctx), input).await.into())
    }

    /// Rename an organization or change its contact email. The slug is fixed.
    async fn update_organization(
        &self,
        ctx: &Context<'_>,
        slug: String,
        name: Option<String>,
        contact_email: Option<String>,
    ) -> async_graphql::Result<OrganizationPayload> {
        let input = UpdateOrganization {
            name,
            contact_email,
        };
        Ok(update_organization(pool(ctx)?, scope(ctx), &slug, input).await.into())
    }

    /// Delete an organization with all of its projects, tasks and comments.
    async fn delete_organization(
        &self,
        ctx: &Context<'_>,
        slug: String,
    ) -> async_graphql::Result<DeletePayload> {
        Ok(delete_organization(pool(ctx)?, scope(ctx), &slug).await.into())
    }

    async fn create_project(
        &self,
        ctx: &Context<'_>,
        organization_slug: String,
        name: String,
        description: Option<String>,
        status: Option<GqlProjectStatus>,
        due_date: Option<Date>,
    ) -> async_graphql::Result<ProjectPayload> {
        let pool = pool(ctx)?;
        let result = async {
            validate_all([validate_name("name", &name, MAX_PROJECT_NAME_LEN)])?;
            let org = access::organization_by_slug(pool, scope(ctx), &organization_slug).await?;
            let input = CreateProject {
                organization_id: org.id,
                name,
                description,
                status: status.map(Into::into),
                due_date,
            };
            let project = ProjectRepo::create(pool, &input).await?;
            tracing::info!(project_id = project.id, organization_id = org.id, "Project created");
            Ok::<_, AppError>(ProjectObject(project))
        }
        .await;
        Ok(result.into())
    }

    async fn update_project(
        &self,
        ctx: &Context<'_>,
        project_id: ID,
        name: Option<String>,
        description: Option<String>,
        status: Option<GqlProjectStatus>,
        due_date: Option<Date>,
    ) -> async_graphql::Result<ProjectPayload> {
        let input = UpdateProject {
            name,
            description,
            status: status.map(Into::into),
            due_date,
        };
        Ok(update_project(pool(ctx)?, scope(ctx), &project_id, input).await.into())
    }

    /// Delete a project with its tasks and their comments.
    async fn delete_project(
        &self,
        ctx: &Context<'_>,
        project_id: ID,
    ) -> async_graphql::Result<DeletePayload> {
        let pool = pool(ctx)?;
        let result = async {
            let id = parse_id("Project", &project_id)?;
            let project = access::project_by_id(pool, scope(ctx), id).await?;
            ProjectRepo::delete(pool, project.id).await?;
            tracing::info!(project_id = project.id, "Project deleted");
            Ok::<_, AppError>(())
        }
        .await;
        Ok(result.into())
    }

    async fn create_task(
        &self,
        ctx: &Context<'_>,
        project_id: ID,
        title: String,
        description: Option<String>,
        status: Option<GqlTaskStatus>,
        assignee_email: Option<String>,
        due_date: Option<Timestamp>,
    ) -> async_graphql::Result<TaskPayload> {
        let pool = pool(ctx)?;
        let result = async {
            let project_id = parse_id("Project", &project_id)?;
            let input = CreateTask {
                project_id,
                title,
                description,
                status: status.map(Into::into),
                assignee_email,
                due_date,
            };
            create_task(pool, scope(ctx), input).await
        }
        .await;
        Ok(result.into())
    }

    async fn update_task(
        &self,
        ctx: &Context<'_>,
        task_id: ID,
        title: Option<String>,
        description: Option<String>,
        status: Option<GqlTaskStatus>,
        assignee_email: Option<String>,
        due_date: Option<Timestamp>,
    ) -> async_graphql::Result<TaskPayload> {
        let input = UpdateTask {
            title,
            description,
            status: status.map(Into::into),
            assignee_email,
            due_date,
        };
        Ok(update_task(pool(ctx)?, scope(ctx), &task_id, input).await.into())
    }

    /// Delete a task with its comments.
    async fn delete_task(
        &self,
        ctx: &Context<'_>,
        task_id: ID,
    ) -> async_graphql::Result<DeletePayload> {
        let pool = pool(ctx)?;
        let result = async {
            let id = parse_id("Task", &task_id)?;
            let task = access::task_by_id(pool, scope(ctx), id).await?;
            TaskRepo::delete(pool, task.id).await?;
            tracing::info!(task_id = task.id, "Task deleted");
            Ok::<_, AppError>(())
        }
        .await;
        Ok(result.into())
    }

    async fn create_task_comment(
        &self,
        ctx: &Context<'_>,
        task_id: ID,
        content: String,
        author_email: String,
    ) -> async_graphql::Result<TaskCommentPayload> {
        let pool = pool(ctx)?;
        let result = async {
            validate_all([
                validate_comment_content(&content),
                validate_email("authorEmail", &author_email),
            ])?;
            let task_id = parse_id("Task", &task_id)?;
            let task = access::task_by_id(pool, scope(ctx), task_id).await?;
            let input = CreateTaskComment {
                task_id: task.id,
                content,
                author_email,
            };
            let comment = TaskCommentRepo::create(pool, &input).await?;
            tracing::info!(comment_id = comment.id, task_id = task.id, "Comment added");
            Ok::<_, AppError>(TaskCommentObject(comment))
        }
        .await;
        Ok(result.into())
    }
}

// ---------------------------------------------------------------------------
// Write helpers
// ---------------------------------------------------------------------------

async fn create_organization(
    pool: &DbPool,
    scope: &TenantScope,
    input: CreateOrganization,
) -> AppResult<OrganizationObject> {
    validate_all([
        validate_name("name", &input.name, MAX_ORGANIZATION_NAME_LEN),
        validate_slug(&input.slug),
        validate_email("contactEmail", &input.contact_email),
    ])?;

    // A scoped caller acts for one existing organization and cannot mint others.
    if let Some(own) = scope.slug() {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Requests scoped to organization '{own}' cannot create organizations"
        ))));
    }

    if OrganizationRepo::find_by_slug(pool, &input.slug).await?.is_some() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Organization with slug '{}' already exists",
            input.slug
        ))));
    }

    // The unique constraint still guards against a concurrent insert.
    let org = OrganizationRepo::create(pool, &input).await?;
    tracing::info!(organization_id = org.id, slug = %org.slug, "Organization created");
    Ok(OrganizationObject(org))
}

async fn update_organization(
    pool: &DbPool,
    scope: &TenantScope,
    slug: &str,
    input: UpdateOrganization,
) -> AppResult<OrganizationObject> {
    validate_all([
        input
            .name
            .as_deref()
            .map_or(Ok(()), |n| validate_name("name", n, MAX_ORGANIZATION_NAME_LEN)),
        input
            .contact_email
            .as_deref()
            .map_or(Ok(()), |e| validate_email("contactEmail", e)),
    ])?;

    let org = access::organization_by_slug(pool, scope, slug).await?;
    let org = OrganizationRepo::update(pool, &org.slug, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found_slug("Organization", slug)))?;
    tracing::info!(organization_id = org.id, "Organization updated");
    Ok(OrganizationObject(org))
}

async fn delete_organization(pool: &DbPool, scope: &TenantScope, slug: &str) -> AppResult<()> {
    let org = access::organization_by_slug(pool, scope, slug).await?;
    if !OrganizationRepo::delete_by_slug(pool, &org.slug).await? {
        return Err(AppError::Core(CoreError::not_found_slug("Organization", slug)));
    }
    tracing::info!(organization_id = org.id, slug = %org.slug, "Organization deleted");
    Ok(())
}

async fn update_project(
    pool: &DbPool,
    scope: &TenantScope,
    project_id: &ID,
    input: UpdateProject,
) -> AppResult<ProjectObject> {
    validate_all([input
        .name
        .as_deref()
        .map_or(Ok(()), |n| validate_name("name", n, MAX_PROJECT_NAME_LEN))])?;

    let id = parse_id("Project", project_id)?;
    let existing = access::project_by_id(pool, scope, id).await?;
    let project = ProjectRepo::update(pool, existing.id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found_id("Project", id)))?;
    tracing::info!(project_id = project.id, status = project.status.as_str(), "Project updated");
    Ok(ProjectObject(project))
}

async fn create_task(
    pool: &DbPool,
    scope: &TenantScope,
    input: CreateTask,
) -> AppResult<TaskObject> {
    validate_all([
        validate_name("title", &input.title, MAX_TASK_TITLE_LEN),
        input
            .assignee_email
            .as_deref()
            .map_or(Ok(()), |e| validate_optional_email("assigneeEmail", e)),
    ])?;

    let project = access::project_by_id(pool, scope, input.project_id).await?;
    let task = TaskRepo::create(pool, &input).await?;
    tracing::info!(task_id = task.id, project_id = project.id, "Task created");
    Ok(TaskObject(task))
}

async fn update_task(
    pool: &DbPool,
    scope: &TenantScope,
    task_id: &ID,
    input: UpdateTask,
) -> AppResult<TaskObject> {
    validate_all([
        input
            .title
            .as_deref()
            .map_or(Ok(()), |t| validate_name("title", t, MAX_TASK_TITLE_LEN)),
        input
            .assignee_email
            .as_deref()
            .map_or(Ok(()), |e| validate_optional_email("assigneeEmail", e)),
    ])?;

    let id: DbId = parse_id("Task", task_id)?;
    let existing = access::task_by_id(pool, scope, id).await?;
    let task = TaskRepo::update(pool, existing.id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found_id("Task", id)))?;
    tracing::info!(task_id = task.id, status = task.status.as_str(), "Task updated");
    Ok(TaskObject(task))
}
