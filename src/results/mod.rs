//! Query result sets
//!
//! Every SPARQL response becomes one of three result kinds:
//! - [`BooleanResultSet`] for ASK queries (one row, one `boolean` column)
//! - [`BindingsResultSet`] for SELECT queries (variable bindings per row)
//! - [`GraphResultSet`] for CONSTRUCT/DESCRIBE queries (subject, predicate
//!   and object columns over the triples)
//!
//! All three expose the same cursor through [`ResultCursor`]. Columns are
//! 1-based, rows are 1-based when reported by `get_row`.
//!
//! # Example
//!
//! ```rust
//! use sparcur::parser::{ResultParser, XmlResultParser};
//! use sparcur::results::ResultCursor;
//!
//! let doc = r#"<sparql xmlns="http://www.w3.org/2005/sparql-results#">
//!   <head><variable name="x"/></head>
//!   <results><result><binding name="x"><bnode>r1</bnode></binding></result></results>
//! </sparql>"#;
//!
//! let mut rs = XmlResultParser.parse(&mut doc.as_bytes(), None).unwrap();
//! assert!(rs.next().unwrap());
//! assert_eq!(rs.get_string_by_name("x").unwrap(), Some("r1"));
//! ```

mod bindings;
mod boolean;
mod context;
mod cursor;
mod graph;
mod header;
mod metadata;
mod table;

pub use bindings::BindingsResultSet;
pub use boolean::BooleanResultSet;
pub use context::QueryContext;
pub use cursor::{Cursor, BEFORE_FIRST};
pub use graph::{GraphResultSet, GRAPH_COLUMNS};
pub use header::ResultHeader;
pub use metadata::ResultSetMetaData;
pub use table::{Row, Table};

use crate::rdf::{xsd, Graph, Node, Uri};
use std::fmt;
use thiserror::Error;

/// Result set errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResultSetError {
    /// `next()` past after-last
    #[error("Cursor moved beyond end of result set")]
    BeyondEnd,

    /// `previous()` before before-first
    #[error("Cursor moved before start of result set")]
    BeforeStart,

    /// Read while not on a row
    #[error("No current row (cursor position {position})")]
    NoCurrentRow {
        /// Raw cursor position
        position: isize,
    },

    /// Unknown variable name
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Column number outside `1..=count`
    #[error("Column index {index} out of range (1..={count})")]
    ColumnOutOfRange {
        /// Requested 1-based column
        index: usize,
        /// Number of columns
        count: usize,
    },

    /// Cell cannot be viewed as the requested type
    #[error("Cannot convert {found} to {expected}")]
    TypeMismatch {
        /// Requested type
        expected: &'static str,
        /// The offending cell
        found: String,
    },

    /// Variable declared twice
    #[error("Duplicate variable: {0}")]
    DuplicateVariable(String),
}

pub type ResultSetResult<T> = Result<T, ResultSetError>;

/// Kind of result a query produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SparqlType {
    /// ASK result
    Boolean,
    /// SELECT result
    Bindings,
    /// CONSTRUCT or DESCRIBE result
    Graph,
}

impl fmt::Display for SparqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SparqlType::Boolean => write!(f, "BOOLEAN"),
            SparqlType::Bindings => write!(f, "BINDINGS"),
            SparqlType::Graph => write!(f, "GRAPH"),
        }
    }
}

/// Random access to materialized cells
///
/// Rows and columns are zero-based here; the cursor API converts.
pub trait Rows {
    fn row_count(&self) -> usize;
    fn column_count(&self) -> usize;
    fn column_name(&self, index: usize) -> Option<&str>;
    fn column_index(&self, name: &str) -> Option<usize>;
    /// `None` when the cell is unbound or out of range
    fn cell(&self, row: usize, column: usize) -> Option<&Node>;
}

/// Cursor navigation and typed cell access shared by all result kinds
pub trait ResultCursor {
    /// Backing cells
    fn rows(&self) -> &dyn Rows;

    fn cursor(&self) -> &Cursor;

    fn cursor_mut(&mut self) -> &mut Cursor;

    fn sparql_type(&self) -> SparqlType;

    /// Metadata links from the result header
    fn links(&self) -> &[Uri];

    /// Query this result answers, when known
    fn statement(&self) -> Option<&QueryContext>;

    fn next(&mut self) -> ResultSetResult<bool> {
        self.cursor_mut().next()
    }

    fn previous(&mut self) -> ResultSetResult<bool> {
        self.cursor_mut().previous()
    }

    fn first(&mut self) -> bool {
        self.cursor_mut().first()
    }

    fn last(&mut self) -> bool {
        self.cursor_mut().last()
    }

    fn before_first(&mut self) {
        self.cursor_mut().before_first()
    }

    fn after_last(&mut self) {
        self.cursor_mut().after_last()
    }

    fn absolute(&mut self, row: isize) -> bool {
        self.cursor_mut().absolute(row)
    }

    fn relative(&mut self, delta: isize) -> bool {
        self.cursor_mut().relative(delta)
    }

    /// 1-based current row, 0 when before-first or after-last
    fn get_row(&self) -> usize {
        self.cursor().row()
    }

    fn is_before_first(&self) -> bool {
        self.cursor().is_before_first()
    }

    fn is_after_last(&self) -> bool {
        self.cursor().is_after_last()
    }

    fn is_first(&self) -> bool {
        self.cursor().is_first()
    }

    fn is_last(&self) -> bool {
        self.cursor().is_last()
    }

    fn meta_data(&self) -> ResultSetMetaData<'_> {
        ResultSetMetaData::new(self.rows())
    }

    /// 1-based column of a variable
    fn find_column(&self, name: &str) -> ResultSetResult<usize> {
        self.rows()
            .column_index(name)
            .map(|i| i + 1)
            .ok_or_else(|| ResultSetError::ColumnNotFound(name.to_string()))
    }

    /// Cell at a 1-based column of the current row; `None` if unbound
    fn get_object(&self, column: usize) -> ResultSetResult<Option<&Node>> {
        let rows = self.rows();
        let count = rows.column_count();
        if column == 0 || column > count {
            return Err(ResultSetError::ColumnOutOfRange {
                index: column,
                count,
            });
        }
        let row = self.cursor().current().ok_or(ResultSetError::NoCurrentRow {
            position: self.cursor().position(),
        })?;
        Ok(rows.cell(row, column - 1))
    }

    fn get_object_by_name(&self, name: &str) -> ResultSetResult<Option<&Node>> {
        let column = self.find_column(name)?;
        self.get_object(column)
    }

    /// Cell as a URI: a URI node or an `xsd:anyURI` literal
    fn get_uri(&self, column: usize) -> ResultSetResult<Option<Uri>> {
        self.get_object(column)?.map(coerce_uri).transpose()
    }

    fn get_uri_by_name(&self, name: &str) -> ResultSetResult<Option<Uri>> {
        self.get_object_by_name(name)?.map(coerce_uri).transpose()
    }

    /// Lexical form of any cell
    fn get_string(&self, column: usize) -> ResultSetResult<Option<&str>> {
        Ok(self.get_object(column)?.map(Node::lexical_form))
    }

    fn get_string_by_name(&self, name: &str) -> ResultSetResult<Option<&str>> {
        Ok(self.get_object_by_name(name)?.map(Node::lexical_form))
    }

    /// Cell as an `xsd:boolean` literal
    fn get_boolean(&self, column: usize) -> ResultSetResult<Option<bool>> {
        self.get_object(column)?.map(coerce_boolean).transpose()
    }

    fn get_boolean_by_name(&self, name: &str) -> ResultSetResult<Option<bool>> {
        self.get_object_by_name(name)?.map(coerce_boolean).transpose()
    }

    /// Cell as an integer-family literal
    fn get_long(&self, column: usize) -> ResultSetResult<Option<i64>> {
        self.get_object(column)?.map(coerce_long).transpose()
    }

    fn get_long_by_name(&self, name: &str) -> ResultSetResult<Option<i64>> {
        self.get_object_by_name(name)?.map(coerce_long).transpose()
    }

    /// Cell as a numeric literal
    fn get_double(&self, column: usize) -> ResultSetResult<Option<f64>> {
        self.get_object(column)?.map(coerce_double).transpose()
    }

    fn get_double_by_name(&self, name: &str) -> ResultSetResult<Option<f64>> {
        self.get_object_by_name(name)?.map(coerce_double).transpose()
    }
}

fn mismatch(expected: &'static str, node: &Node) -> ResultSetError {
    ResultSetError::TypeMismatch {
        expected,
        found: node.to_string(),
    }
}

fn coerce_uri(node: &Node) -> ResultSetResult<Uri> {
    match node {
        Node::Uri(uri) => Ok(uri.clone()),
        Node::Literal(lit) if lit.has_datatype(xsd::ANY_URI) => {
            Uri::parse(lit.text().trim()).map_err(|_| mismatch("URI", node))
        }
        _ => Err(mismatch("URI", node)),
    }
}

fn coerce_boolean(node: &Node) -> ResultSetResult<bool> {
    match node {
        Node::Literal(lit) if lit.has_datatype(xsd::BOOLEAN) => match lit.text().trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(mismatch("boolean", node)),
        },
        _ => Err(mismatch("boolean", node)),
    }
}

fn coerce_long(node: &Node) -> ResultSetResult<i64> {
    match node {
        Node::Literal(lit)
            if xsd::INTEGER_TYPES.iter().any(|dt| lit.has_datatype(dt)) =>
        {
            let text = lit.text().trim();
            text.strip_prefix('+')
                .unwrap_or(text)
                .parse()
                .map_err(|_| mismatch("long", node))
        }
        _ => Err(mismatch("long", node)),
    }
}

fn coerce_double(node: &Node) -> ResultSetResult<f64> {
    let numeric = |lit: &crate::rdf::Literal| {
        lit.has_datatype(xsd::DECIMAL)
            || lit.has_datatype(xsd::FLOAT)
            || lit.has_datatype(xsd::DOUBLE)
            || xsd::INTEGER_TYPES.iter().any(|dt| lit.has_datatype(dt))
    };
    match node {
        Node::Literal(lit) if numeric(lit) => match lit.text().trim() {
            "INF" => Ok(f64::INFINITY),
            "-INF" => Ok(f64::NEG_INFINITY),
            "NaN" => Ok(f64::NAN),
            text => text.parse().map_err(|_| mismatch("double", node)),
        },
        _ => Err(mismatch("double", node)),
    }
}

/// A parsed query result of any kind
#[derive(Debug, Clone)]
pub enum ResultSet {
    Boolean(BooleanResultSet),
    Bindings(BindingsResultSet),
    Graph(GraphResultSet),
}

impl ResultSet {
    pub fn as_boolean(&self) -> Option<&BooleanResultSet> {
        match self {
            ResultSet::Boolean(rs) => Some(rs),
            _ => None,
        }
    }

    pub fn as_bindings(&self) -> Option<&BindingsResultSet> {
        match self {
            ResultSet::Bindings(rs) => Some(rs),
            _ => None,
        }
    }

    pub fn as_graph(&self) -> Option<&GraphResultSet> {
        match self {
            ResultSet::Graph(rs) => Some(rs),
            _ => None,
        }
    }

    /// Underlying graph of a graph result
    pub fn graph(&self) -> Option<&Graph> {
        self.as_graph().map(GraphResultSet::graph)
    }

    /// Release the result set
    pub fn close(self) {}

    fn inner(&self) -> &dyn ResultCursor {
        match self {
            ResultSet::Boolean(rs) => rs,
            ResultSet::Bindings(rs) => rs,
            ResultSet::Graph(rs) => rs,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn ResultCursor {
        match self {
            ResultSet::Boolean(rs) => rs,
            ResultSet::Bindings(rs) => rs,
            ResultSet::Graph(rs) => rs,
        }
    }
}

impl ResultCursor for ResultSet {
    fn rows(&self) -> &dyn Rows {
        self.inner().rows()
    }

    fn cursor(&self) -> &Cursor {
        self.inner().cursor()
    }

    fn cursor_mut(&mut self) -> &mut Cursor {
        self.inner_mut().cursor_mut()
    }

    fn sparql_type(&self) -> SparqlType {
        self.inner().sparql_type()
    }

    fn links(&self) -> &[Uri] {
        self.inner().links()
    }

    fn statement(&self) -> Option<&QueryContext> {
        self.inner().statement()
    }
}

impl From<BooleanResultSet> for ResultSet {
    fn from(rs: BooleanResultSet) -> Self {
        ResultSet::Boolean(rs)
    }
}

impl From<BindingsResultSet> for ResultSet {
    fn from(rs: BindingsResultSet) -> Self {
        ResultSet::Bindings(rs)
    }
}

impl From<GraphResultSet> for ResultSet {
    fn from(rs: GraphResultSet) -> Self {
        ResultSet::Graph(rs)
    }
}
