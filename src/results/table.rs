//! Materialized rows behind bindings and boolean results

use super::header::ResultHeader;
use super::Rows;
use crate::rdf::Node;
use std::sync::Arc;

/// One result row; `None` marks an unbound variable
pub type Row = Box<[Option<Node>]>;

/// Header plus rows in parse order
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    header: Arc<ResultHeader>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(header: Arc<ResultHeader>, rows: Vec<Row>) -> Self {
        Self { header, rows }
    }

    pub fn header(&self) -> &Arc<ResultHeader> {
        &self.header
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

impl Rows for Table {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn column_count(&self) -> usize {
        self.header.variable_count()
    }

    fn column_name(&self, index: usize) -> Option<&str> {
        self.header.variable(index)
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.header.position(name)
    }

    fn cell(&self, row: usize, column: usize) -> Option<&Node> {
        self.rows.get(row)?.get(column)?.as_ref()
    }
}
