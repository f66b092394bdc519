//! Column metadata view

use super::{ResultSetError, ResultSetResult, Rows};

/// Column count and name lookups over a result set
///
/// Column numbers are 1-based.
pub struct ResultSetMetaData<'a> {
    rows: &'a dyn Rows,
}

impl<'a> ResultSetMetaData<'a> {
    pub(crate) fn new(rows: &'a dyn Rows) -> Self {
        Self { rows }
    }

    pub fn column_count(&self) -> usize {
        self.rows.column_count()
    }

    /// Name of a 1-based column
    pub fn column_name(&self, column: usize) -> ResultSetResult<&'a str> {
        let count = self.rows.column_count();
        column
            .checked_sub(1)
            .and_then(|i| self.rows.column_name(i))
            .ok_or(ResultSetError::ColumnOutOfRange { index: column, count })
    }

    /// 1-based column of a variable
    pub fn column_index(&self, name: &str) -> ResultSetResult<usize> {
        self.rows
            .column_index(name)
            .map(|i| i + 1)
            .ok_or_else(|| ResultSetError::ColumnNotFound(name.to_string()))
    }

    /// All column names in order
    pub fn column_names(&self) -> Vec<&'a str> {
        (0..self.rows.column_count())
            .filter_map(|i| self.rows.column_name(i))
            .collect()
    }
}
