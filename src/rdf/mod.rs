//! RDF support for query results
//!
//! This module holds the value model shared by every result kind:
//! - Nodes (URIs, blank nodes, literals) that fill result cells
//! - Triples and the in-memory [`Graph`] behind CONSTRUCT/DESCRIBE results
//! - Turtle and RDF/XML parsing into a graph
//!
//! # Example
//!
//! ```rust
//! use sparcur::rdf::{Graph, Literal, Triple, Uri};
//!
//! let mut graph = Graph::new();
//! let subject = Uri::parse("http://example.org/alice").unwrap();
//! let predicate = Uri::parse("http://xmlns.com/foaf/0.1/name").unwrap();
//!
//! graph.insert(Triple::new(subject.clone(), predicate, Literal::new_simple_literal("Alice"))).unwrap();
//! assert_eq!(graph.get_properties(&subject.into()).len(), 1);
//! ```

mod graph;
mod serialization;
mod types;

pub use types::{xsd, BlankNode, Literal, Node, RdfError, RdfResult, Triple, Uri};

pub use graph::{Graph, GraphError, GraphResult};

pub use serialization::{parse_rdf_xml, parse_turtle, RdfFormat};

/// RDF vocabulary constants
pub mod vocab {
    pub use super::types::rdf::*;
}
