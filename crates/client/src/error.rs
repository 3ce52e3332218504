/// Errors from the GraphQL client layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a usable HTTP response, or the server
    /// answered with a non-2xx status.
    #[error("Network error: {message}")]
    Network {
        /// HTTP status code, when the server answered at all.
        status: Option<u16>,
        message: String,
    },

    /// The server executed the request and reported request-level errors.
    #[error("GraphQL error: {}", .messages.join("; "))]
    Graphql {
        messages: Vec<String>,
        /// `extensions.code` of the first error (`NOT_FOUND`, ...).
        code: Option<String>,
    },

    /// The response did not have the expected shape.
    #[error("Unexpected response payload: {0}")]
    Decode(String),
}

impl ClientError {
    /// Whether the server reported the requested entity as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Graphql { code: Some(code), .. } if code == "NOT_FOUND")
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return ClientError::Decode(err.to_string());
        }
        ClientError::Network {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_detected_by_code() {
        let err = ClientError::Graphql {
            messages: vec!["Project with ID '9' not found".into()],
            code: Some("NOT_FOUND".into()),
        };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "GraphQL error: Project with ID '9' not found");
    }

    #[test]
    fn other_errors_are_not_not_found() {
        let err = ClientError::Network {
            status: Some(502),
            message: "bad gateway".into(),
        };
        assert!(!err.is_not_found());
    }
}
