//! RDF serialization formats
//!
//! Supports:
//! - Turtle / N3 (`text/rdf+n3`)
//! - RDF/XML (`application/rdf+xml`)
//!
//! Both parsers fill a [`Graph`] and report how many triples the document
//! contained, counting duplicates.

mod rdfxml;
mod turtle;

pub use rdfxml::parse_rdf_xml;
pub use turtle::parse_turtle;

use super::types::{BlankNode, Literal, Node, Uri};
use crate::parser::{ParseError, ParseResult};

/// RDF serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    /// Turtle format (also accepted for N3 responses)
    Turtle,
    /// RDF/XML format
    RdfXml,
}

impl RdfFormat {
    /// Parse a document in this format
    pub fn parse(&self, input: &[u8]) -> ParseResult<(super::Graph, usize)> {
        match self {
            RdfFormat::Turtle => parse_turtle(input),
            RdfFormat::RdfXml => parse_rdf_xml(input),
        }
    }
}

/// Convert a rio triple into the crate's model
pub(crate) fn convert_triple(t: rio_api::model::Triple<'_>) -> ParseResult<super::Triple> {
    Ok(super::Triple::new(
        convert_subject(t.subject)?,
        Uri::new_unchecked(t.predicate.iri),
        convert_object(t.object)?,
    ))
}

fn convert_subject(s: rio_api::model::Subject<'_>) -> ParseResult<Node> {
    match s {
        rio_api::model::Subject::NamedNode(n) => Ok(Uri::new_unchecked(n.iri).into()),
        rio_api::model::Subject::BlankNode(b) => Ok(BlankNode::new(b.id)?.into()),
        #[allow(unreachable_patterns)]
        _ => Err(ParseError::Grammar("Unsupported subject type".to_string())),
    }
}

fn convert_object(o: rio_api::model::Term<'_>) -> ParseResult<Node> {
    match o {
        rio_api::model::Term::NamedNode(n) => Ok(Uri::new_unchecked(n.iri).into()),
        rio_api::model::Term::BlankNode(b) => Ok(BlankNode::new(b.id)?.into()),
        rio_api::model::Term::Literal(l) => match l {
            rio_api::model::Literal::Simple { value } => {
                Ok(Literal::new_simple_literal(value).into())
            }
            rio_api::model::Literal::LanguageTaggedString { value, language } => {
                Ok(Literal::new_language_tagged_literal(value, language)?.into())
            }
            rio_api::model::Literal::Typed { value, datatype } => {
                Ok(Literal::new_typed_literal(value, Uri::new_unchecked(datatype.iri)).into())
            }
        },
        #[allow(unreachable_patterns)]
        _ => Err(ParseError::Grammar("Unsupported object type".to_string())),
    }
}
