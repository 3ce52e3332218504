#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with {key} not found")]
    NotFound { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Not-found error for a lookup by numeric id.
    pub fn not_found_id(entity: &'static str, id: crate::types::DbId) -> Self {
        Self::NotFound {
            entity,
            key: format!("ID '{id}'"),
        }
    }

    /// Not-found error for a lookup by organization slug.
    pub fn not_found_slug(entity: &'static str, slug: &str) -> Self {
        Self::NotFound {
            entity,
            key: format!("slug '{slug}'"),
        }
    }
}
