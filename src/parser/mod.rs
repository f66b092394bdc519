//! Response body parsers
//!
//! One parser per handled encoding:
//! - [`XmlResultParser`]: SPARQL Query Results XML
//! - [`JsonResultParser`]: SPARQL Query Results JSON
//! - [`GraphResultParser`]: RDF/XML and N3 graphs
//!
//! Parsers read the whole body before parsing, so a failing read surfaces as
//! [`ParseError::Io`] and never as a grammar error.

mod graph;
mod json;
mod xml;

pub use graph::GraphResultParser;
pub use json::JsonResultParser;
pub use xml::{XmlResultParser, XmlResultsHandler};

use crate::rdf::{GraphError, RdfError};
use crate::results::{QueryContext, ResultSet, ResultSetError};
use std::io::Read;
use thiserror::Error;

/// Parse errors
#[derive(Error, Debug)]
pub enum ParseError {
    /// IO error reading the body
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Out-of-sequence or invalid result document content
    #[error("Grammar error: {0}")]
    Grammar(String),

    /// Malformed XML
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed Turtle / N3
    #[error("Turtle error: {0}")]
    Turtle(#[from] rio_turtle::TurtleError),

    /// Malformed RDF/XML
    #[error("RDF/XML error: {0}")]
    RdfXml(#[from] rio_xml::RdfXmlError),
}

impl ParseError {
    /// True for failures reading the input rather than understanding it
    pub fn is_io(&self) -> bool {
        matches!(self, ParseError::Io(_))
    }

    pub fn is_grammar(&self) -> bool {
        matches!(self, ParseError::Grammar(_))
    }
}

impl From<RdfError> for ParseError {
    fn from(e: RdfError) -> Self {
        ParseError::Grammar(e.to_string())
    }
}

impl From<GraphError> for ParseError {
    fn from(e: GraphError) -> Self {
        match e {
            GraphError::Io(io) => ParseError::Io(io),
            other => ParseError::Grammar(other.to_string()),
        }
    }
}

impl From<ResultSetError> for ParseError {
    fn from(e: ResultSetError) -> Self {
        ParseError::Grammar(e.to_string())
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Turns a response body into a result set
pub trait ResultParser {
    /// Parse a complete document
    fn parse_bytes(&self, input: &[u8], context: Option<QueryContext>) -> ParseResult<ResultSet>;

    /// Read the stream to its end, then parse it
    fn parse(&self, input: &mut dyn Read, context: Option<QueryContext>) -> ParseResult<ResultSet> {
        let mut bytes = Vec::new();
        input.read_to_end(&mut bytes)?;
        self.parse_bytes(&bytes, context)
    }
}
