//! HTTP request handling

use std::collections::HashMap;

use bytes::Bytes;
use log::Level;
use reqwest::header::{HeaderName, HeaderValue, AUTHORIZATION, COOKIE};
use reqwest::{Body, Client, Method, Response};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::error::{Result, RreqError};
use crate::http::auth::Credentials;
use crate::http::cookie::{cookies_to_header, Cookie};
use crate::http::response::{BodyStream, StatusBody};
use crate::logging::{SharedLogger, Sink};

/// Request body as configured on the builder
#[derive(Debug)]
enum BodySource {
    /// Sent again on every execution.
    Buffered(Bytes),
    /// Sent once; `None` after it has been consumed.
    Streaming(Option<Body>),
}

/// Fluent builder for a single HTTP request.
///
/// Setters take and return the builder by value. Terminal operations borrow
/// it mutably, so one configured builder can be executed more than once:
/// buffered bodies are re-sent each time, while a streaming body
/// (`Body::wrap_stream`) is sent once and later executions fail with
/// [`RreqError::InvalidRequest`].
///
/// Configured headers override the client's default headers of the same
/// name. A client-level default `User-Agent` cannot be removed from here:
/// reqwest adds it at dispatch when the request has none, so the request
/// carries no identifying header only when the client sets none
/// (see [`ClientConfig::user_agent`](crate::config::ClientConfig::user_agent)).
#[derive(Debug)]
pub struct RequestBuilder {
    client: Client,
    url: String,
    method: String,
    credentials: Credentials,
    headers: HashMap<String, String>,
    args: HashMap<String, String>,
    cookies: Vec<Cookie>,
    body: Option<BodySource>,
    logger: Sink,
}

impl RequestBuilder {
    /// Create a GET request on a shared client.
    ///
    /// Without a logger, outcomes go to the `log` facade.
    pub fn new(client: &Client, logger: Option<SharedLogger>) -> Self {
        Self {
            client: client.clone(),
            url: String::new(),
            method: Method::GET.to_string(),
            credentials: Credentials::default(),
            headers: HashMap::new(),
            args: HashMap::new(),
            cookies: Vec::new(),
            body: None,
            logger: Sink::new(logger),
        }
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn post(self) -> Self {
        self.method(Method::POST.as_str())
    }

    pub fn put(self) -> Self {
        self.method(Method::PUT.as_str())
    }

    /// Bearer token; takes precedence over basic auth.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.credentials.token = Some(token.into());
        self
    }

    /// Basic auth credentials
    pub fn auth(mut self, login: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials.login = Some(login.into());
        self.credentials.password = Some(password.into());
        self
    }

    /// Replace all configured headers
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn cookie(mut self, cookie: Cookie) -> Self {
        self.cookies.push(cookie);
        self
    }

    /// Replace all query arguments
    pub fn args(mut self, args: HashMap<String, String>) -> Self {
        self.args = args;
        self
    }

    pub fn body(mut self, body: impl Into<Body>) -> Self {
        let body = body.into();
        self.body = Some(match body.as_bytes() {
            Some(bytes) => BodySource::Buffered(Bytes::copy_from_slice(bytes)),
            None => BodySource::Streaming(Some(body)),
        });
        self
    }

    /// Execute the request and return the raw response.
    ///
    /// A status above 399 is returned as [`RreqError::Status`], which still
    /// holds the response.
    pub async fn execute_raw(&mut self, cancel: &CancellationToken) -> Result<Response> {
        let request = self.build()?;
        let method = request.method().clone();
        let url = request.url().clone();

        let sent = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(RreqError::Cancelled),
            res = self.client.execute(request) => res.map_err(RreqError::Http),
        };

        let response = match sent {
            Ok(response) => response,
            Err(err) => {
                self.logger
                    .emit(Level::Info, format_args!("{} {} - error {}", method, url, err));
                return Err(err);
            }
        };

        let status = response.status();
        if status.as_u16() > 399 {
            self.logger
                .emit(Level::Warn, format_args!("{} {} - {}", method, url, status.as_u16()));
            return Err(RreqError::status(response));
        }

        self.logger
            .emit(Level::Debug, format_args!("{} {} - {}", method, url, status.as_u16()));
        Ok(response)
    }

    /// Execute and hand back the unread body.
    pub async fn stream(&mut self, cancel: &CancellationToken) -> Result<BodyStream> {
        let response = self.execute_raw(cancel).await?;
        Ok(BodyStream::new(response, cancel.clone()))
    }

    /// Execute and buffer the whole body.
    ///
    /// Error statuses fail before the body is read.
    pub async fn bytes(&mut self, cancel: &CancellationToken) -> Result<Bytes> {
        self.stream(cancel).await?.bytes().await
    }

    /// Execute and return status code and body text, even for error statuses.
    pub async fn status_and_body(&mut self, cancel: &CancellationToken) -> StatusBody {
        let (response, status_error) = match self.execute_raw(cancel).await {
            Ok(response) => (response, None),
            Err(RreqError::Status {
                status,
                response: Some(response),
            }) => (
                *response,
                Some(RreqError::Status {
                    status,
                    response: None,
                }),
            ),
            Err(err) => return StatusBody::failed(err),
        };

        let status = response.status();
        match BodyStream::new(response, cancel.clone()).bytes().await {
            Ok(body) => StatusBody {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
                error: status_error,
            },
            Err(err) => StatusBody {
                status: status.as_u16(),
                body: String::new(),
                error: Some(err),
            },
        }
    }

    /// Execute and decode the JSON body into `T`.
    pub async fn decode_json<T: DeserializeOwned>(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<T> {
        self.stream(cancel).await?.json().await
    }

    fn build(&mut self) -> Result<reqwest::Request> {
        let method = Method::from_bytes(self.method.as_bytes()).map_err(|e| {
            RreqError::InvalidRequest(format!("Invalid method '{}': {}", self.method, e))
        })?;
        let mut url = Url::parse(&self.url)
            .map_err(|e| RreqError::InvalidRequest(format!("Invalid URL '{}': {}", self.url, e)))?;

        if !self.args.is_empty() {
            let mut args: Vec<_> = self.args.iter().collect();
            args.sort();
            url.query_pairs_mut().extend_pairs(args);
        }

        let mut request = reqwest::Request::new(method, url);
        let headers = request.headers_mut();

        for (key, value) in &self.headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                RreqError::InvalidRequest(format!("Invalid header name '{}': {}", key, e))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                RreqError::InvalidRequest(format!("Invalid value for header '{}': {}", key, e))
            })?;
            headers.insert(name, value);
        }

        if let Some(authorization) = self.credentials.authorization() {
            let value = HeaderValue::from_str(&authorization).map_err(|e| {
                RreqError::InvalidRequest(format!("Invalid credentials: {}", e))
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        if !self.cookies.is_empty() {
            let existing = headers
                .get(COOKIE)
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());
            let value = cookies_to_header(existing.as_deref(), &self.cookies);
            let value = HeaderValue::from_str(&value).map_err(|e| {
                RreqError::InvalidRequest(format!("Invalid cookie header: {}", e))
            })?;
            headers.insert(COOKIE, value);
        }

        *request.body_mut() = self.next_body()?;
        Ok(request)
    }

    fn next_body(&mut self) -> Result<Option<Body>> {
        match &mut self.body {
            None => Ok(None),
            Some(BodySource::Buffered(bytes)) => Ok(Some(Body::from(bytes.clone()))),
            Some(BodySource::Streaming(body)) => body.take().map(Some).ok_or_else(|| {
                RreqError::InvalidRequest("streaming body already consumed".to_string())
            }),
        }
    }
}
