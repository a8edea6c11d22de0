//! The immutable result of one terminal call.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::collection::Collection;
use crate::error::ApiError;
use crate::http::HttpResponse;
use crate::reader;

/// What the server answered for one request, whatever the status.
///
/// Only terminal builder methods create a `Response`, so the readers below
/// can never run before a request has been made.
#[derive(Debug, Clone)]
pub struct Response {
    path: String,
    inner: HttpResponse,
}

impl Response {
    pub(crate) fn new(path: String, inner: HttpResponse) -> Self {
        Self { path, inner }
    }

    /// Host-relative path the response was fetched from.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn status(&self) -> u16 {
        self.inner.status
    }

    pub fn is_success(&self) -> bool {
        self.inner.is_success()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.header(name)
    }

    /// Raw body text.
    pub fn body(&self) -> &str {
        &self.inner.body
    }

    pub fn into_http(self) -> HttpResponse {
        self.inner
    }

    /// Map a non-2xx status to `NotFound` or `HttpError`.
    pub fn error_for_status(self) -> Result<Self, ApiError> {
        if self.inner.is_success() {
            return Ok(self);
        }
        warn!(path = %self.path, status = self.inner.status, "statamic request failed");
        if self.inner.status == 404 {
            return Err(ApiError::NotFound);
        }
        Err(ApiError::HttpError {
            status: self.inner.status,
            body: self.inner.body,
        })
    }

    /// The whole decoded body.
    pub fn all(&self) -> Result<Value, ApiError> {
        reader::all(&self.inner.body)
    }

    /// The `data` field as ordered items.
    pub fn data(&self) -> Result<Vec<Value>, ApiError> {
        reader::data(&self.inner.body)
    }

    /// The `data` field as a chainable `Collection`.
    pub fn to_collection(&self) -> Result<Collection, ApiError> {
        reader::to_collection(&self.inner.body)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        reader::json(&self.inner.body)
    }

    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        reader::data_as(&self.inner.body)
    }
}
