use crate::core::error::{ApiError, INVALID_REQUEST_MESSAGE, NOT_FOUND_MESSAGE};
use reqwest::StatusCode;
use serde_json::Value;

/// Map a non-2xx response to the error the caller sees.
///
/// Only 400, 401, 404 and 500 are rewritten; every other status is passed
/// through with its body untouched.
pub fn classify_failure(status: StatusCode, body: &str) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED => ApiError::AuthExpired {
            message: server_message(body, &["message", "error"]),
        },
        StatusCode::INTERNAL_SERVER_ERROR => ApiError::ServerFault,
        StatusCode::NOT_FOUND => ApiError::ClientRequest {
            status,
            message: server_message(body, &["message"])
                .unwrap_or_else(|| NOT_FOUND_MESSAGE.to_string()),
        },
        StatusCode::BAD_REQUEST => ApiError::ClientRequest {
            status,
            message: server_message(body, &["message", "error"])
                .unwrap_or_else(|| INVALID_REQUEST_MESSAGE.to_string()),
        },
        _ => ApiError::Unclassified {
            status,
            body: body.to_string(),
        },
    }
}

/// A reqwest failure before any status line arrived.
pub fn transport_failure(e: reqwest::Error) -> ApiError {
    if e.is_builder() {
        ApiError::Client(e)
    } else {
        ApiError::ConnectivityFailure(e)
    }
}

/// First non-empty string among `fields` of a JSON object body.
fn server_message(body: &str, fields: &[&str]) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    fields.iter().find_map(|field| {
        value
            .get(field)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}
