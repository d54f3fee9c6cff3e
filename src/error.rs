//! Error handling for rreq

use reqwest::{Response, StatusCode};
use thiserror::Error;

/// Main error type for rreq operations
#[derive(Error, Debug)]
pub enum RreqError {
    /// The request could not be built from the configured method, URL,
    /// headers or body.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request cancelled")]
    Cancelled,

    /// The server answered with a status above 399. The response is kept
    /// so its headers and body remain inspectable.
    #[error("status is {status}")]
    Status {
        status: StatusCode,
        response: Option<Box<Response>>,
    },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RreqError {
    pub(crate) fn status(response: Response) -> Self {
        RreqError::Status {
            status: response.status(),
            response: Some(Box::new(response)),
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            RreqError::Status { status, .. } => Some(*status),
            RreqError::Http(err) => err.status(),
            _ => None,
        }
    }

    /// Take the response out of a status error.
    pub fn into_response(self) -> Option<Response> {
        match self {
            RreqError::Status { response, .. } => response.map(|r| *r),
            _ => None,
        }
    }

    /// True for network-level failures: connection, dispatch, body reads
    /// and cancellation. Body read failures happen after a response was
    /// received, so a `true` here does not mean no response existed.
    pub fn is_transport(&self) -> bool {
        matches!(self, RreqError::Http(_) | RreqError::Cancelled)
    }
}

/// Result type alias for rreq operations
pub type Result<T> = std::result::Result<T, RreqError>;
