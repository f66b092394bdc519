//! Connection to one SPARQL endpoint

use super::config::ConnectionConfig;
use super::encoding::{encode_params, plan_request, Method};
use super::graphs::GraphUris;
use super::statement::Statement;
use super::{ClientError, ClientResult};
use crate::builder::{ResponseEntity, ResponseType, ResultBuilder};
use crate::results::{QueryContext, ResultSet};
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Url;
use std::io::Read;
use std::time::Duration;
use tracing::{debug, warn};

/// Map a response status onto the client error taxonomy
///
/// 2xx is success; 4xx and 5xx carry the code and reason phrase; anything
/// else is unhandled.
pub fn check_status(code: u16, reason: &str) -> ClientResult<()> {
    match code {
        200..=299 => Ok(()),
        400..=499 => Err(ClientError::ClientStatus {
            code,
            reason: reason.to_string(),
        }),
        500..=599 => Err(ClientError::ServerStatus {
            code,
            reason: reason.to_string(),
        }),
        _ => Err(ClientError::Unhandled(format!("status {} {}", code, reason))),
    }
}

/// A blocking reqwest response seen through [`ResponseEntity`]
struct HttpEntity {
    content_type: Option<String>,
    response: Response,
}

impl ResponseEntity for HttpEntity {
    fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    fn body(&mut self) -> Option<&mut dyn Read> {
        if self.response.content_length() == Some(0) {
            None
        } else {
            Some(&mut self.response)
        }
    }
}

/// Connection to a SPARQL endpoint
///
/// Holds the HTTP client and the connection-level graph lists. Statements
/// created from it borrow it.
#[derive(Debug)]
pub struct Connection {
    endpoint: Url,
    client: Client,
    query_limit: usize,
    timeout: Duration,
    headers: Vec<(String, String)>,
    default_graphs: GraphUris,
    named_graphs: GraphUris,
    closed: bool,
}

impl Connection {
    /// Connect to an endpoint with default settings
    pub fn new(endpoint: &str) -> ClientResult<Self> {
        Self::with_config(endpoint, &ConnectionConfig::default())
    }

    /// Connect to an endpoint using the given settings
    ///
    /// The `endpoint` field of the configuration is ignored here.
    pub fn with_config(endpoint: &str, config: &ConnectionConfig) -> ClientResult<Self> {
        let endpoint = parse_endpoint(endpoint)?;
        let timeout = Duration::from_millis(config.timeout_ms);
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        let mut default_graphs = GraphUris::new();
        for uri in &config.default_graphs {
            default_graphs.add_str(uri)?;
        }
        let mut named_graphs = GraphUris::new();
        for uri in &config.named_graphs {
            named_graphs.add_str(uri)?;
        }

        Ok(Self {
            endpoint,
            client,
            query_limit: config.query_limit,
            timeout,
            headers: config
                .headers
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            default_graphs,
            named_graphs,
            closed: false,
        })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn query_limit(&self) -> usize {
        self.query_limit
    }

    /// Change the GET-vs-POST URL length threshold
    pub fn set_query_limit(&mut self, limit: usize) {
        self.query_limit = limit;
    }

    /// Add a header sent with every request
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push((name.into(), value.into()));
    }

    pub fn default_graphs(&self) -> &GraphUris {
        &self.default_graphs
    }

    pub fn default_graphs_mut(&mut self) -> &mut GraphUris {
        &mut self.default_graphs
    }

    pub fn named_graphs(&self) -> &GraphUris {
        &self.named_graphs
    }

    pub fn named_graphs_mut(&mut self) -> &mut GraphUris {
        &mut self.named_graphs
    }

    pub fn create_statement(&self) -> Statement<'_> {
        Statement::new(self)
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Send a query on behalf of a statement
    ///
    /// Statement graph lists replace the connection's when non-empty.
    pub(crate) fn execute_query(&self, statement: &Statement<'_>, query: &str) -> ClientResult<ResultSet> {
        if self.closed {
            return Err(ClientError::Closed);
        }

        let default_graphs = pick(statement.default_graphs(), &self.default_graphs);
        let named_graphs = pick(statement.named_graphs(), &self.named_graphs);
        let params = encode_params(default_graphs.all(), named_graphs.all(), query);
        let plan = plan_request(self.endpoint.as_str(), params, self.query_limit);
        debug!(method = ?plan.method, url_len = plan.url.len(), "sending sparql query");

        let mut request = match plan.method {
            Method::Get => self.client.get(&plan.url),
            Method::Post => self
                .client
                .post(&plan.url)
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(plan.body.unwrap_or_default()),
        };
        request = request.header(ACCEPT, ResponseType::accept_header());
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send()?;
        let status = response.status();
        if let Err(e) = check_status(status.as_u16(), status.canonical_reason().unwrap_or("")) {
            warn!(status = status.as_u16(), endpoint = %self.endpoint, "query rejected");
            return Err(e);
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        debug!(content_type = content_type.as_deref().unwrap_or("<none>"), "received response");

        let context = QueryContext::new(query)
            .with_default_graphs(default_graphs.all().to_vec())
            .with_named_graphs(named_graphs.all().to_vec());
        let mut entity = HttpEntity {
            content_type,
            response,
        };
        ResultBuilder::create_result(&mut entity, Some(context))
    }
}

fn pick<'a>(statement: &'a GraphUris, connection: &'a GraphUris) -> &'a GraphUris {
    if statement.is_empty() {
        connection
    } else {
        statement
    }
}

fn parse_endpoint(endpoint: &str) -> ClientResult<Url> {
    let url = Url::parse(endpoint)
        .map_err(|e| ClientError::Config(format!("Unable to locate endpoint {}: {}", endpoint, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ClientError::Config(format!(
            "Unsupported endpoint scheme '{}' in {}",
            other, endpoint
        ))),
    }
}
