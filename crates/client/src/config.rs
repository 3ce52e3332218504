/// Default GraphQL endpoint of a locally running API server.
pub const DEFAULT_API_URL: &str = "http://localhost:3000/graphql";

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Full URL of the GraphQL endpoint.
    pub api_url: String,
    /// When set, every request is scoped to this organization.
    pub organization_slug: Option<String>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            organization_slug: None,
            request_timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                        | Default                         |
    /// |--------------------------------|---------------------------------|
    /// | `ORGBOARD_API_URL`             | `http://localhost:3000/graphql` |
    /// | `ORGBOARD_ORGANIZATION_SLUG`   | unset (unscoped)                |
    /// | `ORGBOARD_REQUEST_TIMEOUT_SECS`| `30`                            |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_url = std::env::var("ORGBOARD_API_URL").unwrap_or(defaults.api_url);

        let organization_slug = std::env::var("ORGBOARD_ORGANIZATION_SLUG")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let request_timeout_secs = std::env::var("ORGBOARD_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.request_timeout_secs);

        Self {
            api_url,
            organization_slug,
            request_timeout_secs,
        }
    }

    /// Same endpoint, scoped to another organization.
    pub fn scoped_to(mut self, organization_slug: impl Into<String>) -> Self {
        self.organization_slug = Some(organization_slug.into());
        self
    }
}
