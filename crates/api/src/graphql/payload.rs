//! Mutation result payloads.
//!
//! Every mutation returns `{<entity>, success, errors}` so callers can render
//! inline form errors without a failed-request code path.

use async_graphql::SimpleObject;

use crate::error::{AppError, AppResult};
use crate::graphql::types::{OrganizationObject, ProjectObject, TaskCommentObject, TaskObject};

macro_rules! define_payload {
    (
        $(#[$meta:meta])*
        $name:ident { $field:ident: $ty:ty }
    ) => {
        $(#[$meta])*
        #[derive(SimpleObject)]
        pub struct $name {
            /// `null` when the mutation failed.
            pub $field: Option<$ty>,
            pub success: bool,
            /// Human-readable failure messages; empty on success.
            pub errors: Vec<String>,
        }

        impl $name {
            pub fn ok(value: $ty) -> Self {
                Self {
                    $field: Some(value),
                    success: true,
                    errors: Vec::new(),
                }
            }

            pub fn failed(err: &AppError) -> Self {
                Self {
                    $field: None,
                    success: false,
                    errors: err.public_messages(),
                }
            }
        }

        impl From<AppResult<$ty>> for $name {
            fn from(result: AppResult<$ty>) -> Self {
                match result {
                    Ok(value) => Self::ok(value),
                    Err(err) => {
                        tracing::debug!(error = %err, code = err.code(), "Mutation rejected");
                        Self::failed(&err)
                    }
                }
            }
        }
    };
}

define_payload! {
    /// Result of `createOrganization` / `updateOrganization`.
    OrganizationPayload { organization: OrganizationObject }
}

define_payload! {
    /// Result of `createProject` / `updateProject`.
    ProjectPayload { project: ProjectObject }
}

define_payload! {
    /// Result of `createTask` / `updateTask`.
    TaskPayload { task: TaskObject }
}

define_payload! {
    /// Result of `createTaskComment`.
    TaskCommentPayload { comment: TaskCommentObject }
}

/// Result of a delete mutation.
#[derive(SimpleObject)]
pub struct DeletePayload {
    pub success: bool,
    pub errors: Vec<String>,
}

impl From<AppResult<()>> for DeletePayload {
    fn from(result: AppResult<()>) -> Self {
        match result {
            Ok(()) => Self {
                success: true,
                errors: Vec::new(),
            },
            Err(err) => {
                tracing::debug!(error = %err, code = err.code(), "Delete rejected");
                Self {
                    success: false,
                    errors: err.public_messages(),
                }
            }
        }
    }
}
