//! Sparcur: cursor-based access to remote SPARQL endpoints
//!
//! Queries go to an endpoint over HTTP; the response is parsed according to
//! its declared content type and exposed through a bidirectional,
//! randomly addressable cursor.
//!
//! # Supported response types
//!
//! - `application/sparql-results+xml`: bindings or boolean results
//! - `application/sparql-results+json`: bindings or boolean results
//! - `application/rdf+xml`: graph results
//! - `text/rdf+n3`: graph results
//!
//! # Layout
//!
//! - [`rdf`]: nodes, triples and the in-memory graph
//! - [`parser`]: one parser per response encoding
//! - [`results`]: result sets and the shared cursor
//! - [`builder`]: content-type dispatch
//! - [`client`]: driver, connections and statements
//!
//! ## Example Usage
//!
//! ```rust
//! use sparcur::builder::{BufferedResponse, ResultBuilder};
//! use sparcur::results::{ResultCursor, SparqlType};
//!
//! let mut response = BufferedResponse::new(
//!     "application/sparql-results+xml; charset=utf-8",
//!     "<sparql><head/><boolean>true</boolean></sparql>",
//! );
//! let mut rs = ResultBuilder::create_result(&mut response, None).unwrap();
//! assert_eq!(rs.sparql_type(), SparqlType::Boolean);
//! assert!(rs.next().unwrap());
//! assert_eq!(rs.get_boolean(1).unwrap(), Some(true));
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod client;
pub mod error;
pub mod parser;
pub mod rdf;
pub mod results;

// Re-export main types for convenience
pub use builder::{strip_params, BufferedResponse, ResponseEntity, ResponseType, ResultBuilder};

pub use client::{ClientError, ClientResult, Connection, ConnectionConfig, Driver, Statement};

pub use error::{SparcurError, SparcurResult};

pub use parser::{ParseError, ParseResult, ResultParser};

pub use rdf::{BlankNode, Graph, Literal, Node, Triple, Uri};

pub use results::{
    BindingsResultSet, BooleanResultSet, GraphResultSet, QueryContext, ResultCursor, ResultHeader,
    ResultSet, ResultSetError, ResultSetResult, SparqlType,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
