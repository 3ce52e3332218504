//! Organization-context extractor for tenant scoping.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use orgboard_core::validation::validate_slug;

use crate::error::AppError;

/// Header naming the organization a request acts on behalf of.
pub const ORGANIZATION_HEADER: &str = "x-organization-slug";

/// Organization slug taken from the [`ORGANIZATION_HEADER`] header, if any.
///
/// Absent header means the request is unscoped. A present but malformed
/// header is rejected with 400 rather than silently ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationContext(pub Option<String>);

impl<S> FromRequestParts<S> for OrganizationContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(ORGANIZATION_HEADER) else {
            return Ok(Self(None));
        };

        let slug = value.to_str().map_err(|_| {
            AppError::BadRequest(format!("{ORGANIZATION_HEADER} must be valid ASCII"))
        })?;
        let slug = slug.trim();

        validate_slug(slug)
            .map_err(|e| AppError::BadRequest(format!("Invalid {ORGANIZATION_HEADER}: {e}")))?;

        Ok(Self(Some(slug.to_string())))
    }
}
