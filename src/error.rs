use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Main error type for Asana API operations
#[derive(Debug, Error)]
pub enum RestError {
    /// The payload's own validation rejected it before any request was made
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A default, filter or options value could not be turned into query parameters
    #[error("unable to marshal {stage} to query parameters: {message}")]
    Query { stage: &'static str, message: String },

    /// The JSON request body could not be serialized
    #[error("unable to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Request building error
    #[error("failed to build request: {0}")]
    RequestBuild(String),

    /// The network call itself failed (DNS, connection, timeout, body read)
    #[error("{method} {path} error: {source}")]
    Transport {
        method: Method,
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body is not a valid `{data, next_page, errors}` envelope
    #[error("{method} {path}: invalid response envelope (HTTP {status}): {source}")]
    Decode {
        method: Method,
        path: String,
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// Successful status but the envelope carries no `data`
    #[error("{method} {path}: missing data from response")]
    MissingData { method: Method, path: String },

    /// The `data` field does not match the requested type
    #[error("{method} {path}: unable to decode response data: {source}")]
    DataDecode {
        method: Method,
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A listing answered with a `next_page` cursor whose offset is empty
    #[error("next page cursor has an empty offset")]
    EmptyCursor,

    /// Error reported by the API
    #[error(transparent)]
    Api(#[from] ApiError),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl RestError {
    /// Check if this error is a not found error (404)
    pub fn is_not_found(&self) -> bool {
        matches!(self, RestError::Api(e) if e.kind == ErrorKind::NotFound)
    }

    /// Check if this error is a forbidden error (403)
    pub fn is_forbidden(&self) -> bool {
        matches!(self, RestError::Api(e) if e.kind == ErrorKind::Forbidden)
    }

    /// Check if the API refused the call because of rate limiting (429)
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, RestError::Api(e) if e.kind == ErrorKind::RateLimitEnforced)
    }

    /// Get the HTTP status code if the server answered
    pub fn status_code(&self) -> Option<u16> {
        match self {
            RestError::Api(e) => Some(e.status),
            RestError::Decode { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Raised by [`Validate`](crate::request::Validate) implementations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    /// Create a validation error with the given message
    pub fn new(message: impl Into<String>) -> Self {
        ValidationError(message.into())
    }
}

/// One entry of the `errors` array of an error envelope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Message describing the problem
    #[serde(default)]
    pub message: String,

    /// Additional help text, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    /// Unique phrase identifying server errors (5xx)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phrase: Option<String>,
}

/// Known failure reasons, keyed on the HTTP status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidRequest,
    NoAuthorization,
    PaymentRequired,
    Forbidden,
    NotFound,
    PreconditionFailed,
    RateLimitEnforced,
    ServerError,
    Unknown,
}

impl ErrorKind {
    /// Classify an HTTP status
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ErrorKind::InvalidRequest,
            401 => ErrorKind::NoAuthorization,
            402 => ErrorKind::PaymentRequired,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            412 => ErrorKind::PreconditionFailed,
            429 => ErrorKind::RateLimitEnforced,
            500..=599 => ErrorKind::ServerError,
            _ => ErrorKind::Unknown,
        }
    }

    /// Snake-case name of the kind, as used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidRequest => "invalid_request",
            ErrorKind::NoAuthorization => "no_authorization",
            ErrorKind::PaymentRequired => "payment_required",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::NotFound => "not_found",
            ErrorKind::PreconditionFailed => "precondition_failed",
            ErrorKind::RateLimitEnforced => "rate_limit_enforced",
            ErrorKind::ServerError => "server_error",
            ErrorKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by the API for any status other than 200 or 201.
///
/// The `errors` list is exactly what the service sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Method of the failed call
    pub method: Method,
    /// API path of the failed call
    pub path: String,
    /// HTTP status code
    pub status: u16,
    /// Failure reason derived from `status`
    pub kind: ErrorKind,
    /// Errors reported by the service
    pub errors: Vec<ErrorDetail>,
    /// Seconds to wait, from the `Retry-After` header of a 429
    pub retry_after: Option<u64>,
}

impl ApiError {
    /// Build the error for a call to `method` `path` that answered `status`
    pub fn new(
        method: Method,
        path: impl Into<String>,
        status: u16,
        errors: Vec<ErrorDetail>,
        retry_after: Option<u64>,
    ) -> Self {
        ApiError {
            method,
            path: path.into(),
            status,
            kind: ErrorKind::from_status(status),
            errors,
            retry_after,
        }
    }

    /// Message of the first reported error, if the service sent one
    pub fn message(&self) -> Option<&str> {
        self.errors.first().map(|e| e.message.as_str())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {} ({})", self.method, self.path, self.kind, self.status)?;
        let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
        if !messages.is_empty() {
            write!(f, ": {}", messages.join("; "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Result type for Asana API operations
pub type Result<T> = std::result::Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(message: &str) -> ErrorDetail {
        ErrorDetail {
            message: message.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_error_not_found() {
        let error = RestError::from(ApiError::new(Method::GET, "/projects/1", 404, vec![detail("not found")], None));
        assert!(error.is_not_found());
        assert!(!error.is_forbidden());
        assert_eq!(error.status_code(), Some(404));
    }

    #[test]
    fn test_error_rate_limited() {
        let error = RestError::from(ApiError::new(Method::GET, "/workspaces", 429, vec![], Some(30)));
        assert!(error.is_rate_limited());
        match error {
            RestError::Api(api) => assert_eq!(api.retry_after, Some(30)),
            other => panic!("expected RestError::Api, got {:?}", other),
        }
    }

    #[test]
    fn test_kind_catalog() {
        assert_eq!(ErrorKind::from_status(400), ErrorKind::InvalidRequest);
        assert_eq!(ErrorKind::from_status(401), ErrorKind::NoAuthorization);
        assert_eq!(ErrorKind::from_status(402), ErrorKind::PaymentRequired);
        assert_eq!(ErrorKind::from_status(412), ErrorKind::PreconditionFailed);
        assert_eq!(ErrorKind::from_status(503), ErrorKind::ServerError);
        assert_eq!(ErrorKind::from_status(418), ErrorKind::Unknown);
    }

    #[test]
    fn test_api_error_display() {
        let error = ApiError::new(
            Method::POST,
            "/projects",
            400,
            vec![detail("bad name"), detail("bad team")],
            None,
        );
        assert_eq!(
            error.to_string(),
            "POST /projects: invalid_request (400): bad name; bad team"
        );
        assert_eq!(error.message(), Some("bad name"));
    }

    #[test]
    fn test_envelope_errors_name_the_call() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = RestError::Decode {
            method: Method::GET,
            path: "/projects/1".to_string(),
            status: 502,
            source,
        };
        assert!(error.to_string().starts_with("GET /projects/1: invalid response envelope (HTTP 502)"));
        assert_eq!(error.status_code(), Some(502));

        let error = RestError::MissingData {
            method: Method::PUT,
            path: "/sections/9".to_string(),
        };
        assert_eq!(error.to_string(), "PUT /sections/9: missing data from response");
    }
}
