//! rreq - fluent single HTTP requests on top of reqwest
//!
//! Configure method, URL, query arguments, headers, cookies, credentials and
//! body on a [`RequestBuilder`], then take the response as a raw
//! `reqwest::Response`, an open body stream, buffered bytes, a status and
//! body pair, or a decoded JSON value.

pub mod config;
pub mod error;
pub mod http;
pub mod logging;

pub use error::{Result, RreqError};
pub use http::{BodyStream, Cookie, RequestBuilder, StatusBody};
pub use tokio_util::sync::CancellationToken;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
