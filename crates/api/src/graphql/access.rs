//! Entity lookup with tenant scoping.
//!
//! Every top-level read and every mutation resolves its target through these
//! helpers, so a scoped request can only see rows owned by its organization.
//! Rows outside the scope are reported as not found.

use async_graphql::{Context, ID};
use orgboard_core::error::CoreError;
use orgboard_core::types::DbId;
use orgboard_db::models::organization::Organization;
use orgboard_db::models::project::Project;
use orgboard_db::models::task::Task;
use orgboard_db::repositories::{OrganizationRepo, ProjectRepo, TaskRepo};
use orgboard_db::DbPool;

use crate::error::{AppError, AppResult};

/// Organization scope of a single GraphQL request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TenantScope {
    slug: Option<String>,
}

static UNSCOPED: TenantScope = TenantScope { slug: None };

impl TenantScope {
    pub fn new(slug: Option<String>) -> Self {
        Self { slug }
    }

    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }

    /// Whether a request in this scope may address the organization `slug`.
    pub fn permits_slug(&self, slug: &str) -> bool {
        self.slug.as_deref().map_or(true, |own| own == slug)
    }

    /// Whether rows owned by `organization_id` are visible in this scope.
    pub async fn permits_organization(
        &self,
        pool: &DbPool,
        organization_id: DbId,
    ) -> AppResult<bool> {
        let Some(slug) = self.slug.as_deref() else {
            return Ok(true);
        };
        let own = OrganizationRepo::find_by_slug(pool, slug).await?;
        Ok(own.is_some_and(|org| org.id == organization_id))
    }
}

/// The pool attached at schema build time.
pub fn pool<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a DbPool> {
    ctx.data::<DbPool>()
}

/// The request's scope; unscoped when the handler attached none.
pub fn scope<'a>(ctx: &Context<'a>) -> &'a TenantScope {
    ctx.data_opt::<TenantScope>().unwrap_or(&UNSCOPED)
}

/// Parse a GraphQL `ID` into a database id. Unparseable ids cannot match any
/// row, so they are reported as not found.
pub fn parse_id(entity: &'static str, id: &ID) -> AppResult<DbId> {
    id.parse::<DbId>().map_err(|_| {
        AppError::Core(CoreError::NotFound {
            entity,
            key: format!("ID '{}'", id.as_str()),
        })
    })
}

pub async fn organization_by_slug(
    pool: &DbPool,
    scope: &TenantScope,
    slug: &str,
) -> AppResult<Organization> {
    let not_found = || AppError::Core(CoreError::not_found_slug("Organization", slug));
    if !scope.permits_slug(slug) {
        return Err(not_found());
    }
    OrganizationRepo::find_by_slug(pool, slug)
        .await?
        .ok_or_else(not_found)
}

pub async fn project_by_id(pool: &DbPool, scope: &TenantScope, id: DbId) -> AppResult<Project> {
    let not_found = || AppError::Core(CoreError::not_found_id("Project", id));
    let project = ProjectRepo::find_by_id(pool, id).await?.ok_or_else(not_found)?;
    if !scope.permits_organization(pool, project.organization_id).await? {
        return Err(not_found());
    }
    Ok(project)
}

pub async fn task_by_id(pool: &DbPool, scope: &TenantScope, id: DbId) -> AppResult<Task> {
    let not_found = || AppError::Core(CoreError::not_found_id("Task", id));
    let task = TaskRepo::find_by_id(pool, id).await?.ok_or_else(not_found)?;
    if scope.slug().is_some() {
        let owner = TaskRepo::organization_id(pool, id).await?.ok_or_else(not_found)?;
        if !scope.permits_organization(pool, owner).await? {
            return Err(not_found());
        }
    }
    Ok(task)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn unscoped_permits_any_slug() {
        assert!(TenantScope::default().permits_slug("acme"));
    }

    #[test]
    fn scoped_permits_only_own_slug() {
        let scope = TenantScope::new(Some("acme".into()));
        assert!(scope.permits_slug("acme"));
        assert!(!scope.permits_slug("globex"));
    }

    #[test]
    fn numeric_ids_parse() {
        assert_eq!(parse_id("Project", &ID::from("17")).unwrap(), 17);
    }

    #[test]
    fn non_numeric_ids_are_not_found() {
        let err = parse_id("Project", &ID::from("nonexistent")).unwrap_err();
        assert_matches!(
            err,
            AppError::Core(CoreError::NotFound { entity: "Project", ref key })
                if key == "ID 'nonexistent'"
        );
    }
}
