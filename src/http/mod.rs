//! HTTP request module
//!
//! A fluent builder for single requests on a shared `reqwest::Client`.
//! Connection reuse, retries, redirects and TLS stay with the client.

pub mod auth;
pub mod cookie;
pub mod request;
pub mod response;

pub use cookie::Cookie;
pub use request::RequestBuilder;
pub use response::{BodyStream, StatusBody};
