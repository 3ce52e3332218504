//! Input validation for create and update operations.
//!
//! Limits mirror the column sizes in the initial migration.

use std::sync::LazyLock;

use regex::Regex;
use validator::ValidateEmail;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of an organization name.
pub const MAX_ORGANIZATION_NAME_LEN: usize = 100;

/// Maximum length of an organization slug.
pub const MAX_SLUG_LEN: usize = 100;

/// Maximum length of a project name.
pub const MAX_PROJECT_NAME_LEN: usize = 200;

/// Maximum length of a task title.
pub const MAX_TASK_TITLE_LEN: usize = 200;

/// Maximum length of any stored email address.
pub const MAX_EMAIL_LEN: usize = 254;

static SLUG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]+$").unwrap_or_else(|e| panic!("invalid slug pattern: {e}"))
});

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Require a non-blank value no longer than `max` characters.
pub fn validate_name(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    if value.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Slugs are URL-friendly: letters, digits, underscores and hyphens.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    validate_name("slug", slug, MAX_SLUG_LEN)?;
    if !SLUG_RE.is_match(slug) {
        return Err(CoreError::Validation(format!(
            "Invalid slug '{slug}'. Use only letters, numbers, underscores or hyphens"
        )));
    }
    Ok(())
}

/// Require a syntactically valid email address.
pub fn validate_email(field: &str, email: &str) -> Result<(), CoreError> {
    if email.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    if email.len() > MAX_EMAIL_LEN || !email.validate_email() {
        return Err(CoreError::Validation(format!(
            "Enter a valid email address for {field}"
        )));
    }
    Ok(())
}

/// Like [`validate_email`] but an empty value is accepted (unassigned).
pub fn validate_optional_email(field: &str, email: &str) -> Result<(), CoreError> {
    if email.is_empty() {
        return Ok(());
    }
    validate_email(field, email)
}

/// Comments must carry some text.
pub fn validate_comment_content(content: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation("content is required".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn blank_name_rejected() {
        assert_matches!(
            validate_name("name", "   ", MAX_PROJECT_NAME_LEN),
            Err(CoreError::Validation(msg)) if msg == "name is required"
        );
    }

    #[test]
    fn long_name_rejected() {
        let name = "x".repeat(MAX_ORGANIZATION_NAME_LEN + 1);
        assert!(validate_name("name", &name, MAX_ORGANIZATION_NAME_LEN).is_err());
    }

    #[test]
    fn name_at_limit_accepted() {
        let name = "x".repeat(MAX_TASK_TITLE_LEN);
        assert!(validate_name("title", &name, MAX_TASK_TITLE_LEN).is_ok());
    }

    #[test]
    fn slug_accepts_url_safe_characters() {
        assert!(validate_slug("acme-corp_2").is_ok());
    }

    #[test]
    fn slug_rejects_spaces_and_punctuation() {
        assert!(validate_slug("acme corp").is_err());
        assert!(validate_slug("acme/corp").is_err());
        assert!(validate_slug("").is_err());
    }

    #[test]
    fn email_must_be_well_formed() {
        assert!(validate_email("contactEmail", "ops@acme.test").is_ok());
        assert!(validate_email("contactEmail", "not-an-email").is_err());
        assert!(validate_email("contactEmail", "").is_err());
    }

    #[test]
    fn optional_email_accepts_empty() {
        assert!(validate_optional_email("assigneeEmail", "").is_ok());
        assert!(validate_optional_email("assigneeEmail", "nope").is_err());
    }

    #[test]
    fn comment_content_required() {
        assert!(validate_comment_content("").is_err());
        assert!(validate_comment_content("Looks good").is_ok());
    }
}
