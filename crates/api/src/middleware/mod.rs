//! Request extractors shared across routes.
//!
//! - [`tenant::OrganizationContext`] -- Optional organization scope from the
//!   `x-organization-slug` header.

pub mod tenant;
