//! Root query type.

use async_graphql::{Context, Object, ID};
use orgboard_db::repositories::{OrganizationRepo, ProjectRepo, TaskCommentRepo, TaskRepo};

use crate::error::GqlResultExt;
use crate::graphql::access::{self, parse_id, pool, scope};
use crate::graphql::types::{
    GqlProjectStatus, GqlTaskStatus, OrganizationObject, ProjectObject, TaskCommentObject,
    TaskObject,
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All organizations visible to the caller, ordered by name.
    async fn organizations(
        &self,
        ctx: &Context<'_>,
    ) -> async_graphql::Result<Vec<OrganizationObject>> {
        let scope = scope(ctx);
        let orgs = OrganizationRepo::list(pool(ctx)?).await.gql()?;
        Ok(orgs
            .into_iter()
            .filter(|org| scope.permits_slug(&org.slug))
            .map(OrganizationObject)
            .collect())
    }

    /// Look up one organization by slug.
    async fn organization(
        &self,
        ctx: &Context<'_>,
        slug: String,
    ) -> async_graphql::Result<OrganizationObject> {
        let org = access::organization_by_slug(pool(ctx)?, scope(ctx), &slug)
            .await
            .gql()?;
        Ok(OrganizationObject(org))
    }

    /// Projects of one organization, most recent first. The slug is required;
    /// it is the tenant boundary for project listing.
    async fn projects(
        &self,
        ctx: &Context<'_>,
        organization_slug: String,
        status: Option<GqlProjectStatus>,
    ) -> async_graphql::Result<Vec<ProjectObject>> {
        let pool = pool(ctx)?;
        let org = access::organization_by_slug(pool, scope(ctx), &organization_slug)
            .await
            .gql()?;
        let projects = ProjectRepo::list_by_organization(pool, org.id, status.map(Into::into))
            .await
            .gql()?;
        Ok(projects.into_iter().map(ProjectObject).collect())
    }

    /// One project; its tasks are available through `tasks`.
    async fn project(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<ProjectObject> {
        let id = parse_id("Project", &id).gql()?;
        let project = access::project_by_id(pool(ctx)?, scope(ctx), id)
            .await
            .gql()?;
        Ok(ProjectObject(project))
    }

    /// Tasks of one project, most recent first.
    async fn tasks(
        &self,
        ctx: &Context<'_>,
        project_id: ID,
        status: Option<GqlTaskStatus>,
    ) -> async_graphql::Result<Vec<TaskObject>> {
        let pool = pool(ctx)?;
        let project_id = parse_id("Project", &project_id).gql()?;
        let project = access::project_by_id(pool, scope(ctx), project_id)
            .await
            .gql()?;
        let tasks = TaskRepo::list_by_project(pool, project.id, status.map(Into::into))
            .await
            .gql()?;
        Ok(tasks.into_iter().map(TaskObject).collect())
    }

    /// One task; its comments are available through `comments`.
    async fn task(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<TaskObject> {
        let id = parse_id("Task", &id).gql()?;
        let task = access::task_by_id(pool(ctx)?, scope(ctx), id).await.gql()?;
        Ok(TaskObject(task))
    }

    /// Comments on a task, oldest first. An unknown task has no comments.
    async fn task_comments(
        &self,
        ctx: &Context<'_>,
        task_id: ID,
    ) -> async_graphql::Result<Vec<TaskCommentObject>> {
        let pool = pool(ctx)?;
        let Ok(task_id) = parse_id("Task", &task_id) else {
            return Ok(Vec::new());
        };

        let scope = scope(ctx);
        if scope.slug().is_some() {
            let visible = match TaskRepo::organization_id(pool, task_id).await.gql()? {
                Some(owner) => scope.permits_organization(pool, owner).await.gql()?,
                None => false,
            };
            if !visible {
                return Ok(Vec::new());
            }
        }

        let comments = TaskCommentRepo::list_by_task(pool, task_id).await.gql()?;
        Ok(comments.into_iter().map(TaskCommentObject).collect())
    }
}
