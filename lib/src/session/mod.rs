use serde_json::Value;
use thiserror::Error;

/// An authenticated handle to the workspace platform's private API.
///
/// Implementations own the credential and any transport state. Callers only
/// ever post JSON payloads and read the ambient default space.
pub trait Session {
    /// Post `payload` to `endpoint` and return the decoded JSON response body.
    fn post(&self, endpoint: &str, payload: &Value) -> Result<Value, ApiError>;

    /// The space used when the account cannot enumerate its spaces.
    fn current_space_id(&self) -> Result<String, ApiError>;
}

impl<S: Session + ?Sized> Session for &S {
    fn post(&self, endpoint: &str, payload: &Value) -> Result<Value, ApiError> {
        (**self).post(endpoint, payload)
    }

    fn current_space_id(&self) -> Result<String, ApiError> {
        (**self).current_space_id()
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),

    #[error("api responded with {status}: {message}")]
    Status { status: u16, message: String },

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),

    #[error("token is not a valid cookie value")]
    InvalidToken,

    #[error("no default space available for this account")]
    NoDefaultSpace,

    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
}

mod client;
pub use client::*;

#[cfg(test)]
pub(crate) mod testing;
