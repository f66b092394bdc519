//! CONSTRUCT and DESCRIBE results
//!
//! The triples of a [`Graph`] are presented as a fixed three-column table.

use super::{Cursor, QueryContext, ResultCursor, Rows, SparqlType};
use crate::rdf::{Graph, GraphResult, Node, Triple, Uri};

/// Column names of a graph result
pub const GRAPH_COLUMNS: [&str; 3] = ["subject", "predicate", "object"];

impl Rows for Graph {
    fn row_count(&self) -> usize {
        self.len()
    }

    fn column_count(&self) -> usize {
        GRAPH_COLUMNS.len()
    }

    fn column_name(&self, index: usize) -> Option<&str> {
        GRAPH_COLUMNS.get(index).copied()
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        match name {
            "subject" => Some(0),
            "predicate" => Some(1),
            "object" => Some(2),
            _ => None,
        }
    }

    fn cell(&self, row: usize, column: usize) -> Option<&Node> {
        let triple = self.get(row)?;
        match column {
            0 => Some(&triple.subject),
            1 => Some(&triple.predicate),
            2 => Some(&triple.object),
            _ => None,
        }
    }
}

/// Triples, one row each
#[derive(Debug, Clone)]
pub struct GraphResultSet {
    graph: Graph,
    cursor: Cursor,
    context: Option<QueryContext>,
}

impl GraphResultSet {
    pub fn new(graph: Graph, context: Option<QueryContext>) -> Self {
        let cursor = Cursor::new(graph.len());
        Self {
            graph,
            cursor,
            context,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Triple under the cursor
    pub fn current_triple(&self) -> Option<&Triple> {
        self.cursor.current().and_then(|i| self.graph.get(i))
    }

    pub fn triples(&self) -> &[Triple] {
        self.graph.triples()
    }

    pub fn subjects(&self) -> Vec<&Node> {
        self.graph.subjects()
    }

    pub fn predicates(&self) -> Vec<&Node> {
        self.graph.predicates()
    }

    pub fn objects(&self) -> Vec<&Node> {
        self.graph.objects()
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.graph.contains(triple)
    }

    pub fn does_resource_exist(&self, node: &Node) -> bool {
        self.graph.does_resource_exist(node)
    }

    pub fn get_properties(&self, subject: &Node) -> Vec<&Node> {
        self.graph.get_properties(subject)
    }

    pub fn get_values(&self, subject: &Node, predicate: &Node) -> Vec<&Node> {
        self.graph.get_values(subject, predicate)
    }

    pub fn get_value(&self, subject: &Node, predicate: &Node) -> Option<&Node> {
        self.graph.get_value(subject, predicate)
    }

    pub fn get_subjects(&self, predicate: &Node, object: &Node) -> Vec<&Node> {
        self.graph.get_subjects(predicate, object)
    }

    /// Items of the RDF collection at `subject predicate`
    pub fn get_rdf_list(&self, subject: &Node, predicate: &Node) -> GraphResult<Vec<&Node>> {
        self.graph.get_rdf_list(subject, predicate)
    }
}

impl ResultCursor for GraphResultSet {
    fn rows(&self) -> &dyn Rows {
        &self.graph
    }

    fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    fn sparql_type(&self) -> SparqlType {
        SparqlType::Graph
    }

    fn links(&self) -> &[Uri] {
        &[]
    }

    fn statement(&self) -> Option<&QueryContext> {
        self.context.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::Literal;
    use crate::results::ResultSetError;

    fn uri(s: &str) -> Uri {
        Uri::parse(s).unwrap()
    }

    fn sample() -> GraphResultSet {
        let mut graph = Graph::new();
        graph
            .insert(Triple::new(
                uri("http://example.org/a"),
                uri("http://example.org/p"),
                Literal::new_simple_literal("one"),
            ))
            .unwrap();
        graph
            .insert(Triple::new(
                uri("http://example.org/b"),
                uri("http://example.org/p"),
                uri("http://example.org/a"),
            ))
            .unwrap();
        GraphResultSet::new(graph, None)
    }

    #[test]
    fn test_three_columns() {
        let mut rs = sample();
        let meta = rs.meta_data();
        assert_eq!(meta.column_count(), 3);
        assert_eq!(meta.column_names(), vec!["subject", "predicate", "object"]);
        assert_eq!(rs.find_column("object").unwrap(), 3);
        assert!(matches!(rs.find_column("graph"), Err(ResultSetError::ColumnNotFound(_))));

        assert!(rs.next().unwrap());
        assert_eq!(rs.get_uri(1).unwrap().unwrap().as_str(), "http://example.org/a");
        assert_eq!(rs.get_string_by_name("object").unwrap(), Some("one"));
        assert!(rs.get_uri(3).is_err());
    }

    #[test]
    fn test_passthroughs() {
        let rs = sample();
        let a: Node = uri("http://example.org/a").into();
        let p: Node = uri("http://example.org/p").into();
        assert_eq!(rs.subjects().len(), 2);
        assert_eq!(rs.predicates(), vec![&p]);
        assert!(rs.does_resource_exist(&a));
        assert_eq!(rs.get_subjects(&p, &a).len(), 1);
        assert!(rs.contains(&rs.triples()[0].clone()));
        assert!(rs.links().is_empty());
    }

    #[test]
    fn test_current_triple() {
        let mut rs = sample();
        assert!(rs.current_triple().is_none());
        rs.last();
        assert_eq!(
            rs.current_triple().unwrap().subject.lexical_form(),
            "http://example.org/b"
        );
        assert_eq!(rs.get_row(), 2);
    }

    #[test]
    fn test_rdf_list_passthrough() {
        use crate::rdf::{vocab, BlankNode};

        let s = uri("http://example.org/s");
        let p = uri("http://example.org/items");
        let head: Node = BlankNode::new("l1").unwrap().into();
        let mut graph = Graph::new();
        graph.insert(Triple::new(s.clone(), p.clone(), head.clone())).unwrap();
        graph
            .insert(Triple::new(head.clone(), uri(vocab::FIRST), Literal::new_simple_literal("only")))
            .unwrap();
        graph
            .insert(Triple::new(head, uri(vocab::REST), uri(vocab::NIL)))
            .unwrap();

        let rs = GraphResultSet::new(graph, None);
        let items = rs.get_rdf_list(&s.into(), &p.into()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].lexical_form(), "only");
    }
}
