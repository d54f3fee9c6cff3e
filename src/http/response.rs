//! Response shapes returned by the terminal request operations

use bytes::{Bytes, BytesMut};
use futures_util::Stream;
use reqwest::header::HeaderMap;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::error::{Result, RreqError};

/// An open, unread response body, possibly empty.
///
/// Dropping it closes the body.
#[derive(Debug)]
pub struct BodyStream {
    response: Response,
    cancel: CancellationToken,
}

impl BodyStream {
    pub(crate) fn new(response: Response, cancel: CancellationToken) -> Self {
        Self { response, cancel }
    }

    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.response.headers()
    }

    /// Next chunk of the body, or `None` at the end.
    pub async fn chunk(&mut self) -> Result<Option<Bytes>> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(RreqError::Cancelled),
            chunk = self.response.chunk() => Ok(chunk?),
        }
    }

    /// Read the rest of the body into memory.
    pub async fn bytes(mut self) -> Result<Bytes> {
        let mut buf = BytesMut::new();
        while let Some(chunk) = self.chunk().await? {
            buf.extend_from_slice(&chunk);
        }
        Ok(buf.freeze())
    }

    /// Decode the first JSON value of the body. Trailing data is ignored.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        let body = self.bytes().await?;
        let mut de = serde_json::Deserializer::from_slice(&body);
        Ok(<T as serde::Deserialize>::deserialize(&mut de)?)
    }

    /// The body as a byte stream. Cancellation is no longer observed.
    pub fn into_stream(self) -> impl Stream<Item = reqwest::Result<Bytes>> {
        self.response.bytes_stream()
    }

    pub fn into_response(self) -> Response {
        self.response
    }
}

/// Outcome of the tolerant status-and-body call.
///
/// `status` is 0 when no response was received.
#[derive(Debug)]
pub struct StatusBody {
    pub status: u16,
    pub body: String,
    pub error: Option<RreqError>,
}

impl StatusBody {
    pub(crate) fn failed(error: RreqError) -> Self {
        Self {
            status: 0,
            body: String::new(),
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
