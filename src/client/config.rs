//! Connection configuration

use super::{ClientError, ClientResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Default read timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Longest `endpoint?params` URL sent as a GET; longer requests are POSTed
pub const DEFAULT_QUERY_LIMIT: usize = 1024;

/// Settings applied to every connection built from them
///
/// ```yaml
/// endpoint: http://localhost:8890/sparql
/// timeout_ms: 10000
/// default_graphs:
///   - http://example.org/people
/// headers:
///   X-Request-Source: sparcur
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Endpoint used when none is given explicitly
    pub endpoint: Option<String>,
    /// Whole-request timeout in milliseconds, connect through body
    pub timeout_ms: u64,
    /// GET-vs-POST URL length threshold
    pub query_limit: usize,
    /// User-Agent header value
    pub user_agent: String,
    /// Extra request headers
    pub headers: BTreeMap<String, String>,
    /// `default-graph-uri` values
    pub default_graphs: Vec<String>,
    /// `named-graph-uri` values
    pub named_graphs: Vec<String>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            query_limit: DEFAULT_QUERY_LIMIT,
            user_agent: concat!("sparcur/", env!("CARGO_PKG_VERSION")).to_string(),
            headers: BTreeMap::new(),
            default_graphs: Vec::new(),
            named_graphs: Vec::new(),
        }
    }
}

impl ConnectionConfig {
    /// Parse YAML configuration
    pub fn from_yaml_str(yaml: &str) -> ClientResult<Self> {
        serde_yaml::from_str(yaml).map_err(|e| ClientError::Config(e.to_string()))
    }

    /// Load YAML configuration from a file
    pub fn from_file(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ClientError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml_str(&text)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }
}
