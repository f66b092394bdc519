//! In-memory RDF graph
//!
//! Triples are kept in insertion order; duplicates collapse onto the first
//! occurrence. Two indices answer the lookups graph results need:
//! - SPO index (Subject -> Predicate -> positions)
//! - POS index (Predicate -> Object -> positions)

use super::types::{rdf, Node, Triple, Uri};
use std::collections::{HashMap, HashSet};
use std::io::Write;
use thiserror::Error;

/// Graph errors
#[derive(Error, Debug)]
pub enum GraphError {
    /// Predicate is not a URI
    #[error("Predicate must be a URI, found {0}")]
    InvalidPredicate(String),

    /// Subject is a literal
    #[error("Subject must be a URI or blank node, found {0}")]
    InvalidSubject(String),

    /// Malformed rdf:List
    #[error("Malformed RDF list at {0}")]
    MalformedList(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;

type Index = HashMap<Node, HashMap<Node, Vec<usize>>>;

/// RDF graph with SPO and POS indices
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// All triples in insertion order (primary storage)
    triples: Vec<Triple>,

    /// Membership set for duplicate detection
    members: HashSet<Triple>,

    /// SPO index: Subject -> Predicate -> positions in `triples`
    spo_index: Index,

    /// POS index: Predicate -> Object -> positions in `triples`
    pos_index: Index,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a triple, returning false if it was already present
    pub fn insert(&mut self, triple: Triple) -> GraphResult<bool> {
        if triple.subject.is_literal() {
            return Err(GraphError::InvalidSubject(triple.subject.to_string()));
        }
        if !triple.predicate.is_uri() {
            return Err(GraphError::InvalidPredicate(triple.predicate.to_string()));
        }
        if self.members.contains(&triple) {
            return Ok(false);
        }

        let position = self.triples.len();
        self.spo_index
            .entry(triple.subject.clone())
            .or_default()
            .entry(triple.predicate.clone())
            .or_default()
            .push(position);
        self.pos_index
            .entry(triple.predicate.clone())
            .or_default()
            .entry(triple.object.clone())
            .or_default()
            .push(position);

        self.members.insert(triple.clone());
        self.triples.push(triple);
        Ok(true)
    }

    /// Number of distinct triples
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Check if a triple exists
    pub fn contains(&self, triple: &Triple) -> bool {
        self.members.contains(triple)
    }

    /// Iterate over triples in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Triple> {
        self.triples.iter()
    }

    /// All triples in insertion order
    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    /// Triple at a zero-based position
    pub fn get(&self, position: usize) -> Option<&Triple> {
        self.triples.get(position)
    }

    /// Distinct subjects in first-seen order
    pub fn subjects(&self) -> Vec<&Node> {
        distinct(self.triples.iter().map(|t| &t.subject))
    }

    /// Distinct predicates in first-seen order
    pub fn predicates(&self) -> Vec<&Node> {
        distinct(self.triples.iter().map(|t| &t.predicate))
    }

    /// Distinct objects in first-seen order
    pub fn objects(&self) -> Vec<&Node> {
        distinct(self.triples.iter().map(|t| &t.object))
    }

    /// Predicates used with the given subject
    pub fn get_properties(&self, subject: &Node) -> Vec<&Node> {
        let Some(by_predicate) = self.spo_index.get(subject) else {
            return Vec::new();
        };
        let mut positions: Vec<usize> = by_predicate.values().filter_map(|p| p.first().copied()).collect();
        positions.sort_unstable();
        positions.into_iter().map(|i| &self.triples[i].predicate).collect()
    }

    /// Objects of all triples matching (subject, predicate)
    pub fn get_values(&self, subject: &Node, predicate: &Node) -> Vec<&Node> {
        self.spo_index
            .get(subject)
            .and_then(|by_predicate| by_predicate.get(predicate))
            .map(|positions| positions.iter().map(|&i| &self.triples[i].object).collect())
            .unwrap_or_default()
    }

    /// First object matching (subject, predicate)
    pub fn get_value(&self, subject: &Node, predicate: &Node) -> Option<&Node> {
        self.spo_index
            .get(subject)
            .and_then(|by_predicate| by_predicate.get(predicate))
            .and_then(|positions| positions.first())
            .map(|&i| &self.triples[i].object)
    }

    /// Subjects of all triples matching (predicate, object)
    pub fn get_subjects(&self, predicate: &Node, object: &Node) -> Vec<&Node> {
        self.pos_index
            .get(predicate)
            .and_then(|by_object| by_object.get(object))
            .map(|positions| positions.iter().map(|&i| &self.triples[i].subject).collect())
            .unwrap_or_default()
    }

    /// Walk the rdf:List hanging off (subject, predicate)
    ///
    /// Returns an empty list when there is no such value or it is rdf:nil.
    pub fn get_rdf_list(&self, subject: &Node, predicate: &Node) -> GraphResult<Vec<&Node>> {
        let first = Node::Uri(Uri::new_unchecked(rdf::FIRST));
        let rest = Node::Uri(Uri::new_unchecked(rdf::REST));
        let nil = Node::Uri(Uri::new_unchecked(rdf::NIL));

        let mut items = Vec::new();
        let mut seen = HashSet::new();
        let mut current = match self.get_value(subject, predicate) {
            Some(head) => head,
            None => return Ok(items),
        };

        while *current != nil {
            if !seen.insert(current) {
                return Err(GraphError::MalformedList(current.to_string()));
            }
            let item = self
                .get_value(current, &first)
                .ok_or_else(|| GraphError::MalformedList(current.to_string()))?;
            items.push(item);
            current = self
                .get_value(current, &rest)
                .ok_or_else(|| GraphError::MalformedList(current.to_string()))?;
        }

        Ok(items)
    }

    /// Check whether a node appears as subject of any triple
    pub fn does_resource_exist(&self, node: &Node) -> bool {
        self.spo_index.contains_key(node)
    }

    /// Write the graph as Turtle
    pub fn write_turtle<W: Write>(&self, writer: W) -> GraphResult<()> {
        use rio_api::formatter::TriplesFormatter;

        let mut formatter = rio_turtle::TurtleFormatter::new(writer);
        for triple in &self.triples {
            with_rio_triple(triple, |t| formatter.format(t).map_err(GraphError::from))?;
        }
        formatter.finish()?;
        Ok(())
    }

    /// Write the graph as RDF/XML
    pub fn write_rdf_xml<W: Write>(&self, writer: W) -> GraphResult<()> {
        use rio_api::formatter::TriplesFormatter;

        let mut formatter = rio_xml::RdfXmlFormatter::new(writer)?;
        for triple in &self.triples {
            with_rio_triple(triple, |t| formatter.format(t).map_err(GraphError::from))?;
        }
        formatter.finish()?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Triple;
    type IntoIter = std::slice::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}

fn distinct<'a>(nodes: impl Iterator<Item = &'a Node>) -> Vec<&'a Node> {
    let mut seen = HashSet::new();
    nodes.filter(|n| seen.insert(*n)).collect()
}

/// Borrow a triple as the rio model and hand it to `f`
fn with_rio_triple<F>(triple: &Triple, f: F) -> GraphResult<()>
where
    F: FnOnce(&rio_api::model::Triple<'_>) -> GraphResult<()>,
{
    use rio_api::model::{BlankNode, Literal, NamedNode, Subject, Term};

    let subject = match &triple.subject {
        Node::Uri(u) => Subject::NamedNode(NamedNode { iri: u.as_str() }),
        Node::BlankNode(b) => Subject::BlankNode(BlankNode { id: b.label() }),
        Node::Literal(_) => return Err(GraphError::InvalidSubject(triple.subject.to_string())),
    };

    let predicate = match &triple.predicate {
        Node::Uri(u) => NamedNode { iri: u.as_str() },
        other => return Err(GraphError::InvalidPredicate(other.to_string())),
    };

    let object = match &triple.object {
        Node::Uri(u) => Term::NamedNode(NamedNode { iri: u.as_str() }),
        Node::BlankNode(b) => Term::BlankNode(BlankNode { id: b.label() }),
        Node::Literal(l) => {
            if let Some(language) = l.language() {
                Term::Literal(Literal::LanguageTaggedString {
                    value: l.text(),
                    language,
                })
            } else if let Some(datatype) = l.datatype() {
                Term::Literal(Literal::Typed {
                    value: l.text(),
                    datatype: NamedNode { iri: datatype.as_str() },
                })
            } else {
                Term::Literal(Literal::Simple { value: l.text() })
            }
        }
    };

    f(&rio_api::model::Triple {
        subject,
        predicate,
        object,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::types::{BlankNode, Literal};

    fn uri(s: &str) -> Node {
        Node::Uri(Uri::parse(s).unwrap())
    }

    fn sample() -> Graph {
        let mut graph = Graph::new();
        let alice = uri("http://example.org/alice");
        let bob = uri("http://example.org/bob");
        let knows = uri("http://xmlns.com/foaf/0.1/knows");
        let name = uri("http://xmlns.com/foaf/0.1/name");

        graph.insert(Triple::new(alice.clone(), name.clone(), Literal::new_simple_literal("Alice"))).unwrap();
        graph.insert(Triple::new(alice.clone(), knows.clone(), bob.clone())).unwrap();
        graph.insert(Triple::new(bob.clone(), name, Literal::new_simple_literal("Bob"))).unwrap();
        graph
    }

    #[test]
    fn test_insert_and_dedupe() {
        let mut graph = sample();
        assert_eq!(graph.len(), 3);

        let dup = graph.triples()[0].clone();
        assert!(!graph.insert(dup.clone()).unwrap());
        assert_eq!(graph.len(), 3);
        assert!(graph.contains(&dup));
    }

    #[test]
    fn test_insert_rejects_literal_subject() {
        let mut graph = Graph::new();
        let result = graph.insert(Triple::new(
            Literal::new_simple_literal("x"),
            uri("http://example.org/p"),
            uri("http://example.org/o"),
        ));
        assert!(matches!(result, Err(GraphError::InvalidSubject(_))));
    }

    #[test]
    fn test_distinct_terms() {
        let graph = sample();
        assert_eq!(graph.subjects().len(), 2);
        assert_eq!(graph.predicates().len(), 2);
        assert_eq!(graph.objects().len(), 3);
        assert_eq!(graph.subjects()[0], &uri("http://example.org/alice"));
    }

    #[test]
    fn test_lookups() {
        let graph = sample();
        let alice = uri("http://example.org/alice");
        let bob = uri("http://example.org/bob");
        let knows = uri("http://xmlns.com/foaf/0.1/knows");

        assert_eq!(graph.get_properties(&alice).len(), 2);
        assert_eq!(graph.get_value(&alice, &knows), Some(&bob));
        assert_eq!(graph.get_values(&alice, &knows), vec![&bob]);
        assert_eq!(graph.get_subjects(&knows, &bob), vec![&alice]);
        assert!(graph.does_resource_exist(&bob));
        assert!(!graph.does_resource_exist(&knows));
    }

    #[test]
    fn test_rdf_list() {
        let mut graph = Graph::new();
        let s = uri("http://example.org/s");
        let p = uri("http://example.org/items");
        let first = uri(rdf::FIRST);
        let rest = uri(rdf::REST);
        let nil = uri(rdf::NIL);
        let n1: Node = BlankNode::new("l1").unwrap().into();
        let n2: Node = BlankNode::new("l2").unwrap().into();

        graph.insert(Triple::new(s.clone(), p.clone(), n1.clone())).unwrap();
        graph.insert(Triple::new(n1.clone(), first.clone(), Literal::new_simple_literal("a"))).unwrap();
        graph.insert(Triple::new(n1, rest.clone(), n2.clone())).unwrap();
        graph.insert(Triple::new(n2.clone(), first, Literal::new_simple_literal("b"))).unwrap();
        graph.insert(Triple::new(n2, rest, nil)).unwrap();

        let items = graph.get_rdf_list(&s, &p).unwrap();
        let texts: Vec<&str> = items.iter().map(|n| n.lexical_form()).collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn test_write_turtle() {
        let graph = sample();
        let mut out = Vec::new();
        graph.write_turtle(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("http://example.org/alice"));
        assert!(text.contains("\"Bob\""));
    }
}
