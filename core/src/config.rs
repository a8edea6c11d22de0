//! Client configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "api";

/// Where the CMS lives and which headers accompany every request.
///
/// Deserializes from any serde format; omitted `endpoint` and `headers`
/// take their defaults:
///
/// ```
/// use statamic_rest::ClientConfig;
///
/// let config: ClientConfig = serde_json::from_str(r#"{"host":"https://cms.test/"}"#).unwrap();
/// assert_eq!(config.host(), "https://cms.test");
/// assert_eq!(config.endpoint(), "api");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawConfig", into = "RawConfig")]
pub struct ClientConfig {
    host: String,
    endpoint: String,
    headers: Vec<(String, String)>,
}

impl ClientConfig {
    pub fn new(host: &str) -> Self {
        Self::with_endpoint(host, DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(host: &str, endpoint: &str) -> Self {
        Self {
            host: host.trim_end_matches('/').to_string(),
            endpoint: endpoint.trim_matches('/').to_string(),
            headers: default_headers(),
        }
    }

    /// Add or replace a header sent with every request.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Absolute URL for a host-relative path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.host)
    }
}

fn default_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

/// Serialized shape; normalization happens on the way into `ClientConfig`.
#[derive(Serialize, Deserialize)]
struct RawConfig {
    host: String,
    #[serde(default = "default_endpoint")]
    endpoint: String,
    #[serde(default = "default_headers")]
    headers: Vec<(String, String)>,
}

impl From<RawConfig> for ClientConfig {
    fn from(raw: RawConfig) -> Self {
        let mut config = ClientConfig::with_endpoint(&raw.host, &raw.endpoint);
        config.headers = raw.headers;
        config
    }
}

impl From<ClientConfig> for RawConfig {
    fn from(config: ClientConfig) -> Self {
        RawConfig {
            host: config.host,
            endpoint: config.endpoint,
            headers: config.headers,
        }
    }
}
