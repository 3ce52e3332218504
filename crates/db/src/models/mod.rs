//! Row models and input DTOs, one module per table.

pub mod organization;
pub mod project;
pub mod task;
pub mod task_comment;
