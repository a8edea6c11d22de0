//! Fluent request builder for the Statamic REST API.
//!
//! # Design
//! `StatamicClient` holds only configuration and a transport. Each chain
//! starts from `request()`, which hands out a fresh `RequestBuilder` with an
//! empty query, so two chains never see each other's parameters. Parameter
//! methods consume and return the builder; terminal methods consume it,
//! perform exactly one GET and return an immutable `Response`. Reading data
//! is only possible on that `Response`:
//!
//! ```compile_fail
//! use statamic_rest::StatamicClient;
//!
//! let client = StatamicClient::make("http://localhost:8000");
//! let items = client.request().fields(["title"]).data();
//! ```

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::query::{filter_key, Condition, Query};
use crate::resource::Resource;
use crate::response::Response;
use crate::transport::{Transport, UreqTransport};

/// Entry point for collections, taxonomies, globals, navigation and assets.
///
/// ```no_run
/// use statamic_rest::StatamicClient;
///
/// # fn main() -> statamic_rest::Result<()> {
/// let client = StatamicClient::make("https://cms.example.com");
/// let posts = client
///     .request()
///     .fields(["id", "title"])
///     .filter_by("title", "contains", "rust")
///     .sort(["-date"])
///     .paginate(10, 2)
///     .entries("posts")?
///     .to_collection()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct StatamicClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl StatamicClient {
    /// Client for `host` with the default `api` endpoint prefix.
    pub fn make(host: &str) -> Self {
        Self::from_config(ClientConfig::new(host))
    }

    pub fn with_endpoint(host: &str, endpoint: &str) -> Self {
        Self::from_config(ClientConfig::with_endpoint(host, endpoint))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }

    pub fn with_transport(config: ClientConfig, transport: impl Transport + 'static) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Start a new request chain with an empty query.
    pub fn request(&self) -> RequestBuilder<'_> {
        RequestBuilder {
            client: self,
            query: Query::new(),
        }
    }
}

impl fmt::Debug for StatamicClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatamicClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Accumulates query parameters for one request.
#[derive(Debug)]
#[must_use = "a request builder does nothing until a terminal method is called"]
pub struct RequestBuilder<'a> {
    client: &'a StatamicClient,
    query: Query,
}

impl RequestBuilder<'_> {
    /// Only return these fields of each item.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.query.set_list("fields", fields);
        self
    }

    /// Filter on `field` equal to `value`: `filter[{field}]`.
    pub fn filter(mut self, field: &str, value: impl fmt::Display) -> Self {
        self.query.set(filter_key(field, None), value);
        self
    }

    /// Filter on `field` with a condition: `filter[{field}:{condition}]`.
    /// An empty condition gives the plain `filter[{field}]` key.
    pub fn filter_by(
        mut self,
        field: &str,
        condition: impl Into<Condition>,
        value: impl fmt::Display,
    ) -> Self {
        let condition = condition.into();
        self.query.set(filter_key(field, Some(&condition)), value);
        self
    }

    /// Restrict results to one site of a multi-site install.
    pub fn site(mut self, site: &str) -> Self {
        self.query.set("site", site);
        self
    }

    /// Sort by these fields; prefix a field with `-` for descending order.
    pub fn sort<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.query.set_list("sort", fields);
        self
    }

    /// Set `limit`, and `page` when one is given (`2`, `Some(2)` or `None`).
    /// A page of 0 means the first page and is left out of the query.
    pub fn paginate(mut self, limit: u32, page: impl Into<Option<u32>>) -> Self {
        self.query.set("limit", limit);
        if let Some(page) = page.into().filter(|p| *p > 0) {
            self.query.set("page", page);
        }
        self
    }

    /// Log the accumulated query at debug level.
    pub fn dump(self) -> Self {
        debug!(query = ?self.query, "statamic request builder");
        self
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Describe the request for `resource` without sending it.
    pub fn build(&self, resource: &Resource) -> HttpRequest {
        build_request(&self.client.config, resource, &self.query)
    }

    /// Send the request for `resource`.
    pub fn send(self, resource: Resource) -> Result<Response, ApiError> {
        let request = self.build(&resource);
        let client = self.client;
        dispatch(client.transport.as_ref(), &resource, request, client.config.endpoint())
    }

    pub fn entries(self, collection: &str) -> Result<Response, ApiError> {
        self.send(Resource::Entries {
            collection: collection.to_string(),
        })
    }

    pub fn entry(self, collection: &str, id: &str) -> Result<Response, ApiError> {
        self.send(Resource::Entry {
            collection: collection.to_string(),
            id: id.to_string(),
        })
    }

    /// Navigation tree of `name`.
    pub fn navigation(self, name: &str) -> Result<Response, ApiError> {
        self.send(Resource::Navigation {
            name: name.to_string(),
        })
    }

    pub fn terms(self, taxonomy: &str) -> Result<Response, ApiError> {
        self.send(Resource::Terms {
            taxonomy: taxonomy.to_string(),
        })
    }

    pub fn term(self, taxonomy: &str, slug: &str) -> Result<Response, ApiError> {
        self.send(Resource::Term {
            taxonomy: taxonomy.to_string(),
            slug: slug.to_string(),
        })
    }

    pub fn globals(self) -> Result<Response, ApiError> {
        self.send(Resource::Globals)
    }

    pub fn global(self, handle: &str) -> Result<Response, ApiError> {
        self.send(Resource::Global {
            handle: handle.to_string(),
        })
    }

    pub fn assets(self, container: &str) -> Result<Response, ApiError> {
        self.send(Resource::Assets {
            container: container.to_string(),
        })
    }

    pub fn asset(self, container: &str, path: &str) -> Result<Response, ApiError> {
        self.send(Resource::Asset {
            container: container.to_string(),
            path: path.to_string(),
        })
    }

    /// Fetch an asset by its `container::path` id.
    ///
    /// Fails with `MalformedIdentifier`, without sending anything, unless
    /// the id has exactly one `::`.
    pub fn asset_by_id(self, id: &str) -> Result<Response, ApiError> {
        let resource = Resource::asset_by_id(id)?;
        self.send(resource)
    }
}

/// Combine configuration, target and query into a GET request.
pub(crate) fn build_request(
    config: &ClientConfig,
    resource: &Resource,
    query: &Query,
) -> HttpRequest {
    let mut query = query.clone();
    if let Some((key, value)) = resource.query() {
        query.set(key, value);
    }
    HttpRequest {
        url: config.url(&resource.path(config.endpoint())),
        query: query.into_pairs(),
        headers: config.headers().to_vec(),
    }
}

/// Execute `request` and wrap whatever comes back.
pub(crate) fn dispatch(
    transport: &dyn Transport,
    resource: &Resource,
    request: HttpRequest,
    endpoint: &str,
) -> Result<Response, ApiError> {
    debug!(url = %request.url, params = request.query.len(), "sending statamic request");
    let response = transport.execute(&request).map_err(ApiError::Transport)?;
    debug!(url = %request.url, status = response.status, "statamic response");
    Ok(Response::new(resource.path(endpoint), response))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::error::BoxError;
    use crate::http::HttpResponse;

    const HOST: &str = "http://localhost:8000";

    /// Transport that records every request and answers with a fixed body.
    #[derive(Clone, Default)]
    struct Recorder {
        requests: Arc<Mutex<Vec<HttpRequest>>>,
    }

    impl Recorder {
        fn client(&self) -> StatamicClient {
            let requests = Arc::clone(&self.requests);
            StatamicClient::with_transport(ClientConfig::new(HOST), move |req: &HttpRequest| {
                requests.lock().unwrap().push(req.clone());
                Ok::<_, BoxError>(HttpResponse {
                    status: 200,
                    headers: Vec::new(),
                    body: r#"{"data":[{"id":1},{"id":2}]}"#.to_string(),
                })
            })
        }

        fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn client() -> StatamicClient {
        StatamicClient::with_transport(ClientConfig::new(HOST), |_: &HttpRequest| {
            Err::<HttpResponse, BoxError>("transport should not be called".into())
        })
    }

    #[test]
    fn fields_joins_and_overwrites() {
        let c = client();
        let builder = c.request().fields(["id"]).fields(["id", "title", "date"]);
        assert_eq!(builder.query().get("fields"), Some("id,title,date"));
    }

    #[test]
    fn filter_keys_with_and_without_condition() {
        let c = client();
        let builder = c
            .request()
            .filter("title", "x")
            .filter_by("title", "contains", "y")
            .filter_by("views", Condition::Gt, 100);
        assert_eq!(builder.query().get("filter[title]"), Some("x"));
        assert_eq!(builder.query().get("filter[title:contains]"), Some("y"));
        assert_eq!(builder.query().get("filter[views:gt]"), Some("100"));
    }

    #[test]
    fn paginate_without_page_omits_it() {
        let c = client();
        let builder = c.request().paginate(10, None);
        assert_eq!(builder.query().get("limit"), Some("10"));
        assert_eq!(builder.query().get("page"), None);
    }

    #[test]
    fn paginate_with_page_sets_both() {
        let c = client();
        let builder = c.request().paginate(10, Some(2));
        assert_eq!(builder.query().get("limit"), Some("10"));
        assert_eq!(builder.query().get("page"), Some("2"));
    }

    #[test]
    fn paginate_accepts_a_bare_page_number() {
        let c = client();
        let builder = c.request().paginate(10, 2);
        assert_eq!(builder.query().get("limit"), Some("10"));
        assert_eq!(builder.query().get("page"), Some("2"));
    }

    #[test]
    fn filter_by_with_empty_condition_is_a_plain_filter() {
        let c = client();
        let builder = c.request().filter_by("title", "", "x");
        assert_eq!(builder.query().get("filter[title]"), Some("x"));
        assert_eq!(builder.query().get("filter[title:]"), None);
    }

    #[test]
    fn paginate_page_zero_is_omitted() {
        let c = client();
        let builder = c.request().paginate(5, Some(0));
        assert_eq!(builder.query().get("page"), None);
    }

    #[test]
    fn site_and_sort() {
        let c = client();
        let builder = c.request().site("fr").sort(["-date", "title"]);
        assert_eq!(builder.query().get("site"), Some("fr"));
        assert_eq!(builder.query().get("sort"), Some("-date,title"));
    }

    #[test]
    fn dump_leaves_query_untouched() {
        let c = client();
        let builder = c.request().site("en").dump();
        assert_eq!(builder.query().len(), 1);
    }

    #[test]
    fn build_includes_headers_and_query() {
        let c = client();
        let builder = c.request().filter("featured", true).paginate(3, None);
        let req = builder.build(&Resource::Entries {
            collection: "posts".to_string(),
        });
        assert_eq!(req.url, "http://localhost:8000/api/collections/posts/entries");
        assert_eq!(
            req.query,
            pairs(&[("filter[featured]", "true"), ("limit", "3")])
        );
        assert_eq!(req.headers, pairs(&[("content-type", "application/json")]));
    }

    #[test]
    fn entries_sends_exactly_the_accumulated_query() {
        let recorder = Recorder::default();
        let client = recorder.client();
        let response = client
            .request()
            .fields(["title"])
            .paginate(10, None)
            .entries("posts")
            .unwrap();

        assert_eq!(response.path(), "/api/collections/posts/entries");
        let requests = recorder.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].url,
            "http://localhost:8000/api/collections/posts/entries"
        );
        assert_eq!(requests[0].query, pairs(&[("fields", "title"), ("limit", "10")]));
    }

    #[test]
    fn every_terminal_method_hits_its_path() {
        let recorder = Recorder::default();
        let client = recorder.client();
        client.request().entries("posts").unwrap();
        client.request().entry("posts", "abc").unwrap();
        client.request().navigation("main").unwrap();
        client.request().terms("tags").unwrap();
        client.request().term("tags", "rust").unwrap();
        client.request().globals().unwrap();
        client.request().global("footer").unwrap();
        client.request().assets("media").unwrap();
        client.request().asset("media", "img/logo.png").unwrap();

        let urls: Vec<String> = recorder.requests().into_iter().map(|r| r.url).collect();
        let expected: Vec<String> = [
            "/api/collections/posts/entries",
            "/api/collections/posts/entries/abc",
            "/api/navs/main/tree",
            "/api/taxonomies/tags/terms",
            "/api/taxonomies/tags/terms/rust",
            "/api/globals",
            "/api/globals/footer",
            "/api/assets/media",
            "/api/assets/media/img/logo.png",
        ]
        .iter()
        .map(|p| format!("{HOST}{p}"))
        .collect();
        assert_eq!(urls, expected);
    }

    #[test]
    fn asset_by_id_matches_asset() {
        let recorder = Recorder::default();
        let client = recorder.client();
        client.request().asset_by_id("media::logo.png").unwrap();
        client.request().asset("media", "logo.png").unwrap();
        let requests = recorder.requests();
        assert_eq!(requests[0], requests[1]);
    }

    #[test]
    fn malformed_asset_id_sends_nothing() {
        let recorder = Recorder::default();
        let client = recorder.client();
        let err = client.request().asset_by_id("bad-id").unwrap_err();
        assert!(matches!(err, ApiError::MalformedIdentifier(_)));
        assert!(recorder.requests().is_empty());
    }

    #[test]
    fn builders_do_not_share_query_state() {
        let recorder = Recorder::default();
        let client = recorder.client();
        let first = client.request().site("fr").filter("title", "Bonjour");
        let second = client.request().paginate(1, None);
        first.entries("posts").unwrap();
        second.entries("posts").unwrap();

        let requests = recorder.requests();
        assert_eq!(
            requests[0].query,
            pairs(&[("filter[title]", "Bonjour"), ("site", "fr")])
        );
        assert_eq!(requests[1].query, pairs(&[("limit", "1")]));
    }

    #[test]
    fn custom_endpoint_prefix() {
        let recorder = Recorder::default();
        let requests = Arc::clone(&recorder.requests);
        let client = StatamicClient::with_transport(
            ClientConfig::with_endpoint(HOST, "content"),
            move |req: &HttpRequest| {
                requests.lock().unwrap().push(req.clone());
                Ok::<_, BoxError>(HttpResponse {
                    status: 200,
                    headers: Vec::new(),
                    body: "{}".to_string(),
                })
            },
        );
        let response = client.request().globals().unwrap();
        assert_eq!(response.path(), "/content/globals");
        assert_eq!(recorder.requests()[0].url, "http://localhost:8000/content/globals");
    }

    #[test]
    fn transport_error_is_propagated() {
        let err = client().request().globals().unwrap_err();
        match err {
            ApiError::Transport(source) => {
                assert_eq!(source.to_string(), "transport should not be called")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn response_readers_after_terminal_call() {
        let recorder = Recorder::default();
        let response = recorder.client().request().entries("posts").unwrap();
        assert_eq!(response.data().unwrap().len(), 2);
        assert_eq!(response.to_collection().unwrap().len(), 2);
        assert!(response.all().unwrap().get("data").is_some());
    }
}
