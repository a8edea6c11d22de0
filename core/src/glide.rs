//! Client for the glide image-transform endpoint.
//!
//! Glide paths are not namespaced under the API endpoint prefix. Two
//! addressing styles exist: `glide` passes an asset id as the `id` query
//! parameter, `glide_asset` puts container and path in the URL.
//!
//! Only glide targets can be requested through a `GlideClient`:
//!
//! ```compile_fail
//! use statamic_rest::{GlideClient, Resource};
//!
//! let glide = GlideClient::make("http://localhost:8000");
//! let request = glide.request().build(&Resource::Globals);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::client::{build_request, dispatch};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::query::Query;
use crate::resource::Resource;
use crate::response::Response;
use crate::transport::{Transport, UreqTransport};

#[derive(Clone)]
pub struct GlideClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl GlideClient {
    pub fn make(host: &str) -> Self {
        Self::from_config(ClientConfig::new(host))
    }

    /// The config's endpoint prefix is ignored; its host and headers are used.
    pub fn from_config(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }

    pub fn with_transport(config: ClientConfig, transport: impl Transport + 'static) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
        }
    }

    pub fn request(&self) -> GlideRequestBuilder<'_> {
        GlideRequestBuilder {
            client: self,
            query: Query::new(),
        }
    }
}

impl fmt::Debug for GlideClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlideClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
#[must_use = "a request builder does nothing until a terminal method is called"]
pub struct GlideRequestBuilder<'a> {
    client: &'a GlideClient,
    query: Query,
}

impl GlideRequestBuilder<'_> {
    /// Named glide presets to render.
    pub fn presets<I, S>(mut self, presets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.query.set_list("presets", presets);
        self
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    fn build(&self, resource: &Resource) -> HttpRequest {
        build_request(&self.client.config, resource, &self.query)
    }

    fn send(self, resource: Resource) -> Result<Response, ApiError> {
        let request = self.build(&resource);
        let client = self.client;
        dispatch(client.transport.as_ref(), &resource, request, client.config.endpoint())
    }

    /// Transform the asset with id `id` (usually `container::path`).
    pub fn glide(self, id: &str) -> Result<Response, ApiError> {
        self.send(Resource::Glide { id: id.to_string() })
    }

    /// Transform the asset at `path` inside `container`.
    pub fn glide_asset(self, container: &str, path: &str) -> Result<Response, ApiError> {
        self.send(Resource::GlideAsset {
            container: container.to_string(),
            path: path.to_string(),
        })
    }
}
