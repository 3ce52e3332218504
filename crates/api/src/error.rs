use async_graphql::ErrorExtensions;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use orgboard_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers and GraphQL resolvers.
///
/// Wraps [`CoreError`] for domain errors and adds transport-specific variants.
/// Implements [`IntoResponse`] for plain HTTP routes and [`ErrorExtensions`]
/// for GraphQL, so both surfaces report the same codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `orgboard_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// One or more field-level validation failures, reported together.
    #[error("Validation failed: {}", .0.join("; "))]
    Invalid(Vec<String>),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler and resolver return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Classify into an HTTP status, a stable error code, and a client-safe message.
    pub fn classify(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(core) => match core {
                CoreError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", core.to_string())
                }
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::Invalid(messages) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                messages.join("; "),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        }
    }

    /// Error code only (`NOT_FOUND`, `VALIDATION_ERROR`, ...).
    pub fn code(&self) -> &'static str {
        self.classify().1
    }

    /// Client-safe messages for a mutation payload's `errors` list.
    pub fn public_messages(&self) -> Vec<String> {
        match self {
            AppError::Invalid(messages) => messages.clone(),
            other => vec![other.classify().2],
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.classify();

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

impl ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        let (_, code, message) = self.classify();
        async_graphql::Error::new(message).extend_with(|_, e| e.set("code", code))
    }
}

/// Convert any error that maps into [`AppError`] into a GraphQL error with
/// an `extensions.code`, keeping internal details out of the response.
pub trait GqlResultExt<T> {
    fn gql(self) -> async_graphql::Result<T>;
}

impl<T, E> GqlResultExt<T> for Result<T, E>
where
    E: Into<AppError>,
{
    fn gql(self) -> async_graphql::Result<T> {
        self.map_err(|e| e.into().extend())
    }
}

/// Run a batch of validation checks, collecting every failure message.
pub fn validate_all<I>(checks: I) -> AppResult<()>
where
    I: IntoIterator<Item = Result<(), CoreError>>,
{
    let messages: Vec<String> = checks
        .into_iter()
        .filter_map(Result::err)
        .map(|err| match err {
            CoreError::Validation(msg) => msg,
            other => other.to_string(),
        })
        .collect();

    if messages.is_empty() {
        Ok(())
    } else {
        Err(AppError::Invalid(messages))
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 400 validation.
/// - Foreign key and check violations map to 400 validation.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                // PostgreSQL unique_violation
                Some("23505") if constraint == "uq_organizations_slug" => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    "Organization with this slug already exists".to_string(),
                ),
                Some("23505") if constraint.starts_with("uq_") => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                ),
                // foreign_key_violation
                Some("23503") => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    "Referenced record does not exist".to_string(),
                ),
                // check_violation
                Some("23514") => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    format!("Value violates check constraint: {constraint}"),
                ),
                _ => {
                    tracing::error!(error = %db_err, "Database error");
                    internal()
                }
            }
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn not_found_keeps_entity_and_key_in_message() {
        let err = AppError::Core(CoreError::not_found_id("Project", 42));
        let (status, code, message) = err.classify();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "NOT_FOUND");
        assert_eq!(message, "Project with ID '42' not found");
    }

    #[test]
    fn internal_errors_are_sanitized() {
        let err = AppError::Core(CoreError::Internal("secret detail".into()));
        let (_, code, message) = err.classify();
        assert_eq!(code, "INTERNAL_ERROR");
        assert!(!message.contains("secret"));
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert_eq!(AppError::Database(sqlx::Error::RowNotFound).code(), "NOT_FOUND");
    }

    #[test]
    fn validate_all_collects_every_failure() {
        let err = validate_all([
            Err(CoreError::Validation("name is required".into())),
            Ok(()),
            Err(CoreError::Validation("slug is required".into())),
        ])
        .unwrap_err();
        assert_matches!(&err, AppError::Invalid(msgs) if msgs.len() == 2);
        assert_eq!(
            err.public_messages(),
            vec!["name is required".to_string(), "slug is required".to_string()]
        );
    }

    #[test]
    fn validate_all_passes_when_clean() {
        assert!(validate_all([Ok(()), Ok(())]).is_ok());
    }

    #[test]
    fn graphql_extension_carries_code() {
        let gql = AppError::BadRequest("nope".into()).extend();
        assert_eq!(gql.message, "nope");
        let code = gql
            .extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .cloned();
        assert_eq!(code, Some(async_graphql::Value::from("BAD_REQUEST")));
    }
}
