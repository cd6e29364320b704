use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum ApiError {
    Network(String),
    /// Non-2xx status that is not a mapped conflict.
    Status { status: u16, body: String },
    /// HTTP 409 with machine-readable violation tokens from the body.
    Conflict(Vec<String>),
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Network error: {msg}"),
            ApiError::Status { status, body } => write!(f, "HTTP {status}: {body}"),
            ApiError::Conflict(tokens) => write!(f, "Conflict: {}", tokens.join(", ")),
            ApiError::Decode(msg) => write!(f, "Decode error: {msg}"),
        }
    }
}

impl Error for ApiError {}
