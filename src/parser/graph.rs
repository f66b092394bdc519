//! Graph results from RDF/XML and N3 responses

use super::{ParseResult, ResultParser};
use crate::rdf::RdfFormat;
use crate::results::{GraphResultSet, QueryContext, ResultSet};
use tracing::debug;

/// Parser for `application/rdf+xml` and `text/rdf+n3`
#[derive(Debug, Clone, Copy)]
pub struct GraphResultParser {
    format: RdfFormat,
}

impl GraphResultParser {
    pub fn new(format: RdfFormat) -> Self {
        Self { format }
    }

    pub fn rdf_xml() -> Self {
        Self::new(RdfFormat::RdfXml)
    }

    pub fn n3() -> Self {
        Self::new(RdfFormat::Turtle)
    }

    pub fn format(&self) -> RdfFormat {
        self.format
    }
}

impl ResultParser for GraphResultParser {
    fn parse_bytes(&self, input: &[u8], context: Option<QueryContext>) -> ParseResult<ResultSet> {
        let (graph, count) = self.format.parse(input)?;
        debug!(format = ?self.format, triples = count, "parsed graph result");
        Ok(GraphResultSet::new(graph, context).into())
    }
}
