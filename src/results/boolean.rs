//! ASK results

use super::{Cursor, QueryContext, ResultCursor, ResultHeader, ResultSetResult, Rows, SparqlType, Table};
use crate::rdf::{xsd, Literal, Uri};
use std::sync::Arc;

/// Name of the single column of a boolean result
pub const BOOLEAN_COLUMN: &str = "boolean";

/// A single boolean, exposed as one row with one `boolean` column
#[derive(Debug, Clone)]
pub struct BooleanResultSet {
    value: bool,
    table: Table,
    cursor: Cursor,
    context: Option<QueryContext>,
}

impl BooleanResultSet {
    /// Build from the value and the links of the parsed header
    pub fn new(value: bool, links: Vec<Uri>, context: Option<QueryContext>) -> ResultSetResult<Self> {
        let header = ResultHeader::new(vec![BOOLEAN_COLUMN.to_string()], links)?;
        let cell = Literal::new_typed_literal(
            if value { "true" } else { "false" },
            Uri::new_unchecked(xsd::BOOLEAN),
        );
        let table = Table::new(
            Arc::new(header),
            vec![vec![Some(cell.into())].into_boxed_slice()],
        );
        Ok(Self {
            value,
            table,
            cursor: Cursor::new(1),
            context,
        })
    }

    /// The answer
    pub fn value(&self) -> bool {
        self.value
    }
}

impl ResultCursor for BooleanResultSet {
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
        SparqlType::Boolean
    }

    fn links(&self) -> &[Uri] {
        self.table.header().links()
    }

    fn statement(&self) -> Option<&QueryContext> {
        self.context.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_cell() {
        let mut rs = BooleanResultSet::new(true, Vec::new(), None).unwrap();
        assert!(rs.value());
        assert_eq!(rs.meta_data().column_count(), 1);
        assert_eq!(rs.find_column("boolean").unwrap(), 1);

        assert!(rs.next().unwrap());
        assert_eq!(rs.get_boolean(1).unwrap(), Some(true));
        assert_eq!(rs.get_string_by_name("boolean").unwrap(), Some("true"));
        assert!(!rs.next().unwrap());
    }

    #[test]
    fn test_false_with_link() {
        let link = Uri::parse("foo:bar").unwrap();
        let mut rs = BooleanResultSet::new(false, vec![link.clone()], None).unwrap();
        assert_eq!(rs.links(), &[link]);
        assert!(rs.first());
        assert_eq!(rs.get_boolean(1).unwrap(), Some(false));
    }
}
