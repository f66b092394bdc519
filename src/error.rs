//! Crate-level error type

use crate::client::ClientError;
use crate::parser::ParseError;
use crate::rdf::{GraphError, RdfError};
use crate::results::ResultSetError;
use thiserror::Error;

/// Any error raised by this crate
#[derive(Error, Debug)]
pub enum SparcurError {
    #[error(transparent)]
    Rdf(#[from] RdfError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    ResultSet(#[from] ResultSetError),

    #[error(transparent)]
    Client(#[from] ClientError),
}

pub type SparcurResult<T> = Result<T, SparcurError>;
