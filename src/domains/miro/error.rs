//! Miro API error types.

use serde_json::Value;
use thiserror::Error;

/// Errors returned by the Miro API boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No access token was configured at startup.
    #[error("MIRO_ACCESS_TOKEN environment variable is required")]
    MissingToken,

    /// The configured base URL cannot carry path segments.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Network or HTTP-level failure before a response was received.
    #[error("Request to Miro failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The remote rejected the request. `body` is the remote error document.
    #[error("Miro API returned {status}")]
    Status { status: u16, body: Value },

    /// The response body was not valid JSON.
    #[error("Failed to decode Miro response: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_error_names_the_status() {
        let err = ApiError::Status {
            status: 404,
            body: json!({ "code": "notFound" }),
        };
        assert_eq!(err.to_string(), "Miro API returned 404");
    }

    #[test]
    fn test_missing_token_names_the_variable() {
        assert!(ApiError::MissingToken.to_string().contains("MIRO_ACCESS_TOKEN"));
    }
}
