//! Typed errors for gateway operations
//!
//! Distinguishes the failure modes the session cares about: transport
//! problems, HTTP error classes, and responses that arrive but fail the
//! structural contract (empty body, unparseable recipe payload). A failed
//! analysis is surfaced once to the user; there is no automatic retry.

use thiserror::Error;

/// Inference gateway errors with typed variants
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Authentication key is missing, expired, or invalid (HTTP 401/403)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Rate limit exceeded (HTTP 429)
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Malformed request (HTTP 400); indicates a bug on our side
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Server-side error (HTTP 5xx)
    #[error("Service error: {0}")]
    ServiceError(String),

    /// Network connectivity issue (connection refused, timeout, etc.)
    #[error("Network error: {0}")]
    Network(String),

    /// The gateway responded, but with no content to parse
    #[error("Empty response from gateway")]
    EmptyResponse,

    /// The response body failed structural validation against the recipe shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Other errors not fitting the above categories
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl GatewayError {
    /// Whether a later manual retry could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GatewayError::RateLimited(_)
                | GatewayError::ServiceError(_)
                | GatewayError::Network(_)
                | GatewayError::EmptyResponse
        )
    }

    /// Convert HTTP status code and error text into a typed error
    pub fn from_http_status(status: reqwest::StatusCode, error_text: String) -> Self {
        match status.as_u16() {
            401 | 403 => GatewayError::Unauthorized(error_text),
            429 => GatewayError::RateLimited(error_text),
            400 => GatewayError::BadRequest(error_text),
            500..=599 => GatewayError::ServiceError(error_text),
            _ => GatewayError::Other(anyhow::anyhow!("HTTP {}: {}", status, error_text)),
        }
    }

    /// Convert network/connection errors into a typed error
    pub fn from_network_error(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GatewayError::Network(format!("Request timeout: {}", e))
        } else if e.is_connect() {
            GatewayError::Network(format!("Connection failed: {}", e))
        } else if let Some(status) = e.status() {
            Self::from_http_status(status, e.to_string())
        } else {
            GatewayError::Other(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_http_status() {
        let err = GatewayError::from_http_status(
            reqwest::StatusCode::UNAUTHORIZED,
            "Invalid key".to_string(),
        );
        assert!(matches!(err, GatewayError::Unauthorized(_)));
        assert!(!err.is_retryable());

        let err = GatewayError::from_http_status(
            reqwest::StatusCode::TOO_MANY_REQUESTS,
            "Quota exceeded".to_string(),
        );
        assert!(matches!(err, GatewayError::RateLimited(_)));
        assert!(err.is_retryable());

        let err = GatewayError::from_http_status(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            "Server error".to_string(),
        );
        assert!(matches!(err, GatewayError::ServiceError(_)));
    }

    #[test]
    fn test_structural_failures_display() {
        assert_eq!(
            GatewayError::EmptyResponse.to_string(),
            "Empty response from gateway"
        );
        let err = GatewayError::MalformedResponse("missing recipes field".to_string());
        assert!(err.to_string().contains("missing recipes field"));
        assert!(!err.is_retryable());
    }
}
