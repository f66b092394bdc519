//! Query statements

use super::connection::Connection;
use super::graphs::GraphUris;
use super::ClientResult;
use crate::results::ResultSet;

/// Sends queries over a borrowed connection
///
/// Graph lists set here replace the connection's lists when non-empty.
#[derive(Debug)]
pub struct Statement<'c> {
    connection: &'c Connection,
    default_graphs: GraphUris,
    named_graphs: GraphUris,
    last_query: Option<String>,
}

impl<'c> Statement<'c> {
    pub(crate) fn new(connection: &'c Connection) -> Self {
        Self {
            connection,
            default_graphs: GraphUris::new(),
            named_graphs: GraphUris::new(),
            last_query: None,
        }
    }

    pub fn connection(&self) -> &'c Connection {
        self.connection
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

    /// Most recent query sent through this statement
    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    /// Send a query and parse the whole response
    pub fn execute_query(&mut self, query: &str) -> ClientResult<ResultSet> {
        self.last_query = Some(query.to_string());
        self.connection.execute_query(self, query)
    }
}
