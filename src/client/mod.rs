//! HTTP client for SPARQL query endpoints
//!
//! A [`Driver`] hands out [`Connection`]s; a connection creates
//! [`Statement`]s; a statement sends one query per call and returns the
//! parsed [`ResultSet`](crate::results::ResultSet). Requests are blocking
//! and each response is read completely before the result is returned.
//!
//! # Example
//!
//! ```no_run
//! use sparcur::client::Driver;
//! use sparcur::results::ResultCursor;
//!
//! let driver = Driver::with_endpoint("http://localhost:8890/sparql");
//! let connection = driver.connect_default().unwrap();
//! let mut statement = connection.create_statement();
//! let mut rs = statement.execute_query("SELECT ?s WHERE { ?s ?p ?o } LIMIT 5").unwrap();
//! while rs.next().unwrap() {
//!     println!("{:?}", rs.get_object(1).unwrap());
//! }
//! ```

mod config;
mod connection;
mod driver;
mod encoding;
mod graphs;
mod statement;

pub use config::ConnectionConfig;
pub use connection::{check_status, Connection};
pub use driver::Driver;
pub use encoding::{encode_component, encode_params, plan_request, Method, RequestPlan};
pub use graphs::GraphUris;
pub use statement::Statement;

use crate::parser::ParseError;
use crate::rdf::RdfError;
use thiserror::Error;

/// Client errors
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Response cannot be turned into a result
    #[error("Unhandled response: {0}")]
    Unhandled(String),

    /// 4xx status
    #[error("Client error {code}: {reason}")]
    ClientStatus {
        /// HTTP status code
        code: u16,
        /// Reason phrase
        reason: String,
    },

    /// 5xx status
    #[error("Server error {code}: {reason}")]
    ServerStatus {
        /// HTTP status code
        code: u16,
        /// Reason phrase
        reason: String,
    },

    /// Invalid graph URI
    #[error("Invalid graph URI: {0}")]
    InvalidUri(#[from] RdfError),

    /// Bad endpoint or configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection already closed
    #[error("Connection is closed")]
    Closed,
}

pub type ClientResult<T> = Result<T, ClientError>;
