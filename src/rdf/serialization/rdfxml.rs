//! RDF/XML format implementation

use super::convert_triple;
use crate::parser::{ParseError, ParseResult};
use crate::rdf::Graph;
use rio_api::parser::TriplesParser;
use rio_xml::RdfXmlParser;
use tracing::debug;

/// Parse an RDF/XML document into a graph
///
/// Returns the graph and the number of triples read.
pub fn parse_rdf_xml(input: &[u8]) -> ParseResult<(Graph, usize)> {
    let mut parser = RdfXmlParser::new(input, None);
    let mut graph = Graph::new();
    let mut count = 0;

    parser.parse_all(&mut |t| -> Result<(), ParseError> {
        graph.insert(convert_triple(t)?)?;
        count += 1;
        Ok(())
    })?;

    debug!(triples = count, distinct = graph.len(), "parsed rdf/xml graph");
    Ok((graph, count))
}
