//! API error taxonomy.
//!
//! Four user-relevant failure kinds plus a parse bucket. Callers convert
//! every kind into either a session teardown (`Auth`) or a transient notice
//! string; no `ApiError` propagates past the application layer unhandled.

use std::fmt;

use serde_json::Value;

/// Classified failure of an API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No response received. The user is told to check connectivity.
    Network(String),
    /// HTTP 401. Forces session teardown and a redirect to login; the
    /// message is never shown as a form error.
    Auth { message: Option<String> },
    /// 4xx with a structured message body. The first message is surfaced
    /// verbatim.
    Validation { messages: Vec<String> },
    /// Any other HTTP failure.
    Server {
        status: u16,
        message: Option<String>,
    },
    /// Malformed success body. Treated like `Server` by callers.
    Parse(String),
}

impl ApiError {
    /// Classifies a non-success HTTP response from its status and body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let (messages, message) = extract_messages(body);

        if status == 401 {
            return ApiError::Auth { message };
        }

        if (400..500).contains(&status) {
            if !messages.is_empty() {
                return ApiError::Validation { messages };
            }
            if let Some(message) = message {
                return ApiError::Validation {
                    messages: vec![message],
                };
            }
        }

        ApiError::Server { status, message }
    }

    /// Returns the first structured validation message, if any.
    pub fn first_validation_message(&self) -> Option<&str> {
        match self {
            ApiError::Validation { messages } => messages.first().map(String::as_str),
            _ => None,
        }
    }

    /// Returns true for the 401 kind.
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth { .. })
    }

    /// Returns the server-supplied message, if the response carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Auth { message } | ApiError::Server { message, .. } => message.as_deref(),
            ApiError::Validation { messages } => messages.first().map(String::as_str),
            _ => None,
        }
    }
}

/// Mines `{errors:[{msg}]}` and `{message}` shapes out of an error body.
fn extract_messages(body: &str) -> (Vec<String>, Option<String>) {
    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return (Vec::new(), None);
    };

    let messages: Vec<String> = json
        .get("errors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let message = json
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string);

    (messages, message)
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(detail) => write!(f, "network error: {detail}"),
            ApiError::Auth { message } => match message {
                Some(message) => write!(f, "unauthorized: {message}"),
                None => write!(f, "unauthorized"),
            },
            ApiError::Validation { messages } => match messages.first() {
                Some(message) => write!(f, "{message}"),
                None => write!(f, "validation failed"),
            },
            ApiError::Server { status, message } => match message {
                Some(message) => write!(f, "HTTP {status}: {message}"),
                None => write!(f, "HTTP {status}"),
            },
            ApiError::Parse(detail) => write!(f, "malformed response: {detail}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return ApiError::Parse(err.to_string());
        }
        // Everything else reaching here never produced a usable response:
        // connect/timeout/request construction failures.
        ApiError::Network(err.to_string())
    }
}

/// Result type for API operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
