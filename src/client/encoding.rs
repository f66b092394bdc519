//! SPARQL protocol request encoding

use crate::rdf::Uri;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters escaped in form-encoded parameter values
const FORM: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a parameter value
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, FORM).to_string()
}

/// `default-graph-uri=..&named-graph-uri=..&query=..`
pub fn encode_params(default_graphs: &[Uri], named_graphs: &[Uri], query: &str) -> String {
    let mut params = String::new();
    for uri in default_graphs {
        params.push_str("default-graph-uri=");
        params.push_str(&encode_component(uri.as_str()));
        params.push('&');
    }
    for uri in named_graphs {
        params.push_str("named-graph-uri=");
        params.push_str(&encode_component(uri.as_str()));
        params.push('&');
    }
    params.push_str("query=");
    params.push_str(&encode_component(query));
    params
}

/// HTTP method of a query request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Where and how to send a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPlan {
    pub method: Method,
    pub url: String,
    /// Form body for POST requests
    pub body: Option<String>,
}

/// GET with the parameters in the URL unless that URL is longer than
/// `query_limit`, in which case POST them as a form body
pub fn plan_request(endpoint: &str, params: String, query_limit: usize) -> RequestPlan {
    let url = format!("{}?{}", endpoint, params);
    if url.len() > query_limit {
        RequestPlan {
            method: Method::Post,
            url: endpoint.to_string(),
            body: Some(params),
        }
    } else {
        RequestPlan {
            method: Method::Get,
            url,
            body: None,
        }
    }
}
