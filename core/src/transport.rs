//! The seam between request building and network I/O.
//!
//! # Design
//! The client depends only on `Transport`: one synchronous GET in, one
//! response out. Authentication, retries and timeouts belong to whatever
//! implements it, either a configured `ureq::Agent` handed to
//! `UreqTransport::from_agent` or a wrapper that delegates to another
//! transport. Closures implement the trait too, which keeps tests free of
//! sockets.

use tracing::debug;

use crate::error::BoxError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes one GET request.
///
/// Non-2xx statuses must be returned as `Ok` responses; `Err` is reserved
/// for failures that produced no response at all.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, BoxError>;
}

impl<F> Transport for F
where
    F: Fn(&HttpRequest) -> Result<HttpResponse, BoxError> + Send + Sync,
{
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, BoxError> {
        self(request)
    }
}

/// Blocking transport backed by a ureq agent.
///
/// Bodies are read in full regardless of size unless a limit is set with
/// `with_body_limit`. Bytes that are not valid UTF-8 are replaced with
/// U+FFFD, so a mis-labelled body still reaches the readers.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    body_limit: u64,
}

impl UreqTransport {
    /// Agent with default settings, except that 4xx/5xx statuses are
    /// returned as data rather than `Err`.
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self::from_agent(agent)
    }

    /// Use a caller-configured agent (timeouts, proxy, TLS).
    ///
    /// If the agent keeps ureq's default `http_status_as_error(true)`,
    /// non-2xx responses surface as `ApiError::Transport`.
    pub fn from_agent(agent: ureq::Agent) -> Self {
        Self {
            agent,
            body_limit: u64::MAX,
        }
    }

    /// Cap the number of body bytes read; larger bodies fail as
    /// `ApiError::Transport`.
    pub fn with_body_limit(mut self, limit: u64) -> Self {
        self.body_limit = limit;
        self
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, BoxError> {
        let mut builder = self.agent.get(request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        for (key, value) in &request.query {
            builder = builder.query(key, value);
        }

        let mut response = builder.call()?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let bytes = response
            .body_mut()
            .with_config()
            .limit(self.body_limit)
            .read_to_vec()?;
        let body = String::from_utf8_lossy(&bytes).into_owned();
        debug!(status, bytes = body.len(), "ureq response received");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
