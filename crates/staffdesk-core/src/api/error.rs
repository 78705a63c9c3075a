use std::fmt;

use thiserror::Error;

/// Diagnostic error for a non-success backend response.
///
/// Never returned to callers of `ApiClient`; it travels inside the
/// `anyhow` chain that gets logged before being replaced by a `ClientError`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            401 => ApiError::Unauthorized(truncated),
            403 => ApiError::AccessDenied(truncated),
            404 => ApiError::NotFound(truncated),
            429 => ApiError::RateLimited,
            500..=599 => ApiError::ServerError(truncated),
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, truncated)),
        }
    }
}

/// Which read operation a `ClientError::FetchFailed` came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTarget {
    Employees,
    EmployeeDetails,
}

impl fmt::Display for FetchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchTarget::Employees => write!(f, "employees"),
            FetchTarget::EmployeeDetails => write!(f, "employee details"),
        }
    }
}

/// Error returned by every `ApiClient` operation.
///
/// Messages are fixed per operation. The underlying cause (status code,
/// response body, transport error) is logged, not carried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("Failed to login. Check your credentials.")]
    AuthenticationFailed,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Failed to fetch {0}")]
    FetchFailed(FetchTarget),

    #[error("Failed to add employee")]
    CreateFailed,

    #[error("Failed to delete employee")]
    DeleteFailed,
}
