use reqwest::StatusCode;
use thiserror::Error;

pub const CONNECTIVITY_FAILURE_MESSAGE: &str =
    "Network error. Please check your connection and try again.";
pub const SERVER_FAULT_MESSAGE: &str = "Server error. Please try again later.";
pub const NOT_FOUND_MESSAGE: &str = "Resource not found.";
pub const INVALID_REQUEST_MESSAGE: &str = "Invalid request. Please check your input.";
pub const AUTH_EXPIRED_MESSAGE: &str = "Session expired. Please log in again.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid arguments: {0}")]
    Usage(String),

    #[error("{0}")]
    Precondition(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Failure of a single marketplace API call.
///
/// Known status classes carry a message ready to show to a user; anything
/// else is passed through as [`ApiError::Unclassified`] for the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received.
    #[error("{}", CONNECTIVITY_FAILURE_MESSAGE)]
    ConnectivityFailure(#[source] reqwest::Error),

    /// 401. The session has already been torn down when this is returned.
    #[error("{}", .message.as_deref().unwrap_or(AUTH_EXPIRED_MESSAGE))]
    AuthExpired { message: Option<String> },

    /// 500.
    #[error("{}", SERVER_FAULT_MESSAGE)]
    ServerFault,

    /// 400 or 404.
    #[error("{message}")]
    ClientRequest { status: StatusCode, message: String },

    #[error("HTTP {status}: {body}")]
    Unclassified { status: StatusCode, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Not logged in")]
    NoSession,
}

impl ApiError {
    /// HTTP status that produced this error, if one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::AuthExpired { .. } => Some(StatusCode::UNAUTHORIZED),
            ApiError::ServerFault => Some(StatusCode::INTERNAL_SERVER_ERROR),
            ApiError::ClientRequest { status, .. } | ApiError::Unclassified { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// Whether the same call may succeed if the user tries again later.
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::ConnectivityFailure(_) | ApiError::ServerFault)
    }

    pub fn is_auth_expired(&self) -> bool {
        matches!(self, ApiError::AuthExpired { .. })
    }
}
