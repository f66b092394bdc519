//! SELECT results

use super::{Cursor, QueryContext, ResultCursor, ResultHeader, Row, Rows, SparqlType, Table};
use crate::rdf::Uri;
use std::sync::Arc;

/// Variable bindings, one row per solution
#[derive(Debug, Clone)]
pub struct BindingsResultSet {
    table: Table,
    cursor: Cursor,
    context: Option<QueryContext>,
}

impl BindingsResultSet {
    pub fn new(table: Table, context: Option<QueryContext>) -> Self {
        let cursor = Cursor::new(table.row_count());
        Self {
            table,
            cursor,
            context,
        }
    }

    pub fn header(&self) -> &Arc<ResultHeader> {
        self.table.header()
    }

    /// Variable names in column order
    pub fn variables(&self) -> &[String] {
        self.table.header().variables()
    }

    /// All rows in parse order
    pub fn rows_slice(&self) -> &[Row] {
        self.table.rows()
    }

    pub fn len(&self) -> usize {
        self.table.row_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResultCursor for BindingsResultSet {
    fn rows(&self) -> &dyn Rows {
        &self.table
    }

    fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    fn sparql_type(&self) -> SparqlType {
        SparqlType::Bindings
    }

    fn links(&self) -> &[Uri] {
        self.table.header().links()
    }

    fn statement(&self) -> Option<&QueryContext> {
        self.context.as_ref()
    }
}
