//! Connection factory with an optional default endpoint

use super::config::ConnectionConfig;
use super::connection::Connection;
use super::{ClientError, ClientResult};
use reqwest::Url;
use tracing::info;

/// Creates connections from shared settings
#[derive(Debug, Clone, Default)]
pub struct Driver {
    config: ConnectionConfig,
}

impl Driver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Driver whose default endpoint and connection settings come from `config`
    pub fn from_config(config: ConnectionConfig) -> Self {
        Self { config }
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self::from_config(ConnectionConfig::default().with_endpoint(endpoint))
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Default endpoint, if configured
    pub fn endpoint(&self) -> Option<&str> {
        self.config.endpoint.as_deref()
    }

    /// Replace the default endpoint, returning the previous one
    pub fn set_endpoint(&mut self, endpoint: impl Into<String>) -> Option<String> {
        self.config.endpoint.replace(endpoint.into())
    }

    /// Whether `url` is an endpoint this driver can talk to
    pub fn accepts_url(url: &str) -> bool {
        Url::parse(url)
            .map(|u| matches!(u.scheme(), "http" | "https"))
            .unwrap_or(false)
    }

    /// Connect to an explicit endpoint
    pub fn connect(&self, endpoint: &str) -> ClientResult<Connection> {
        info!(endpoint, "opening sparql connection");
        Connection::with_config(endpoint, &self.config)
    }

    /// Connect to the default endpoint
    pub fn connect_default(&self) -> ClientResult<Connection> {
        let endpoint = self
            .endpoint()
            .ok_or_else(|| ClientError::Config("no default endpoint configured".to_string()))?;
        self.connect(endpoint)
    }
}
