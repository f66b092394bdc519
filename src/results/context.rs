//! The query a result set answers

use crate::rdf::Uri;

/// Query text and dataset a result was produced for
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryContext {
    /// SPARQL query string
    pub query: String,
    /// `default-graph-uri` values sent with the query
    pub default_graphs: Vec<Uri>,
    /// `named-graph-uri` values sent with the query
    pub named_graphs: Vec<Uri>,
}

impl QueryContext {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn with_default_graphs(mut self, graphs: Vec<Uri>) -> Self {
        self.default_graphs = graphs;
        self
    }

    pub fn with_named_graphs(mut self, graphs: Vec<Uri>) -> Self {
        self.named_graphs = graphs;
        self
    }
}
