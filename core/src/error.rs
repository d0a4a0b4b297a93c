//! Error types for the food API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because a record deleted by another
//! client is the common stale-cache case. All other non-2xx responses land in
//! `HttpError` with the raw status code and body. `Transport` carries failures
//! reported by the host before any response existed.

use std::fmt;

/// Errors returned by `FoodClient` and `Dashboard`.
#[derive(Debug)]
pub enum ApiError {
    /// The server returned 404.
    NotFound,

    /// The server returned a non-2xx status other than 404.
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    SerializationError(String),

    /// The host could not complete the round-trip (connection refused, DNS, ...).
    Transport(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound => write!(f, "resource not found"),
            ApiError::HttpError { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ApiError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::SerializationError(msg) => {
                write!(f, "serialization failed: {msg}")
            }
            ApiError::Transport(msg) => write!(f, "transport failed: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}
