//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod organization_repo;
pub mod project_repo;
pub mod task_comment_repo;
pub mod task_repo;

pub use organization_repo::OrganizationRepo;
pub use project_repo::ProjectRepo;
pub use task_comment_repo::TaskCommentRepo;
pub use task_repo::TaskRepo;
