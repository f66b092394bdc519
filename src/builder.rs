//! Response dispatch
//!
//! Picks a parser from the declared content type of an HTTP response and
//! runs it over the body. There is no sniffing: an unknown or missing
//! content type is an unhandled response.

use crate::client::{ClientError, ClientResult};
use crate::parser::{GraphResultParser, JsonResultParser, ResultParser, XmlResultParser};
use crate::results::{QueryContext, ResultSet};
use std::fmt;
use std::io::{self, Read};
use tracing::debug;

/// Response encodings a result can be built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseType {
    /// `application/sparql-results+xml`
    SparqlXml,
    /// `application/sparql-results+json`
    SparqlJson,
    /// `application/rdf+xml`
    RdfXml,
    /// `text/rdf+n3`
    RdfN3,
}

impl ResponseType {
    /// Every handled type, in `Accept` preference order
    pub const ALL: [ResponseType; 4] = [
        ResponseType::SparqlXml,
        ResponseType::SparqlJson,
        ResponseType::RdfXml,
        ResponseType::RdfN3,
    ];

    pub fn mime_type(&self) -> &'static str {
        match self {
            ResponseType::SparqlXml => "application/sparql-results+xml",
            ResponseType::SparqlJson => "application/sparql-results+json",
            ResponseType::RdfXml => "application/rdf+xml",
            ResponseType::RdfN3 => "text/rdf+n3",
        }
    }

    /// Exact, case-sensitive match of a parameter-free MIME type
    pub fn for_mime(mime: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.mime_type() == mime)
    }

    /// Parser for this encoding
    pub fn parser(&self) -> Box<dyn ResultParser> {
        match self {
            ResponseType::SparqlXml => Box::new(XmlResultParser),
            ResponseType::SparqlJson => Box::new(JsonResultParser),
            ResponseType::RdfXml => Box::new(GraphResultParser::rdf_xml()),
            ResponseType::RdfN3 => Box::new(GraphResultParser::n3()),
        }
    }

    /// Value for an `Accept` request header listing every handled type
    pub fn accept_header() -> String {
        Self::ALL
            .iter()
            .map(|t| t.mime_type())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime_type())
    }
}

/// Drop MIME parameters: everything from the first `;`
pub fn strip_params(mime: &str) -> &str {
    match mime.find(';') {
        Some(i) => mime[..i].trim(),
        None => mime.trim(),
    }
}

/// What the builder needs from an HTTP response
pub trait ResponseEntity {
    /// Declared `Content-Type`, parameters included
    fn content_type(&self) -> Option<&str>;

    /// Body stream; `None` when the response carries no entity
    fn body(&mut self) -> Option<&mut dyn Read>;
}

/// A response held in memory
#[derive(Debug, Clone)]
pub struct BufferedResponse {
    content_type: Option<String>,
    body: Option<io::Cursor<Vec<u8>>>,
}

impl BufferedResponse {
    pub fn new(content_type: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            content_type: Some(content_type.into()),
            body: Some(io::Cursor::new(body.into())),
        }
    }

    /// Response with a content type but no entity
    pub fn without_body(content_type: impl Into<String>) -> Self {
        Self {
            content_type: Some(content_type.into()),
            body: None,
        }
    }

    /// Response with a body but no declared content type
    pub fn without_content_type(body: impl Into<Vec<u8>>) -> Self {
        Self {
            content_type: None,
            body: Some(io::Cursor::new(body.into())),
        }
    }
}

impl ResponseEntity for BufferedResponse {
    fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    fn body(&mut self) -> Option<&mut dyn Read> {
        self.body.as_mut().map(|b| b as &mut dyn Read)
    }
}

/// Builds result sets from HTTP responses
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultBuilder;

impl ResultBuilder {
    /// Resolve the response's content type and parse its body
    pub fn create_result(
        response: &mut dyn ResponseEntity,
        context: Option<QueryContext>,
    ) -> ClientResult<ResultSet> {
        let declared = response
            .content_type()
            .ok_or_else(|| ClientError::Unhandled("response has no content type".to_string()))?;
        let mime = strip_params(declared);
        let response_type = ResponseType::for_mime(mime)
            .ok_or_else(|| ClientError::Unhandled(format!("unhandled response type {}", mime)))?;
        debug!(content_type = %response_type, "building result");

        let body = response
            .body()
            .ok_or_else(|| ClientError::Unhandled("response has no entity".to_string()))?;
        let parser = response_type.parser();
        Ok(parser.parse(body, context)?)
    }
}
