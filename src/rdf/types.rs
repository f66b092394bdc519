//! RDF type definitions
//!
//! This module provides the value types that appear in query result cells.
//! URIs are validated with the oxiri library; relative references are accepted.

use oxiri::IriRef;
use std::fmt;
use thiserror::Error;

/// RDF errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RdfError {
    /// Invalid URI
    #[error("Invalid URI <{uri}>: {reason}")]
    InvalidUri {
        /// The offending text
        uri: String,
        /// Why it was rejected
        reason: String,
    },

    /// Invalid blank node
    #[error("Invalid blank node: {0}")]
    InvalidBlankNode(String),

    /// Invalid literal
    #[error("Invalid literal: {0}")]
    InvalidLiteral(String),
}

pub type RdfResult<T> = Result<T, RdfError>;

/// XML Schema datatype URIs
pub mod xsd {
    pub const NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";
    pub const ANY_URI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    pub const INT: &str = "http://www.w3.org/2001/XMLSchema#int";
    pub const LONG: &str = "http://www.w3.org/2001/XMLSchema#long";
    pub const SHORT: &str = "http://www.w3.org/2001/XMLSchema#short";
    pub const BYTE: &str = "http://www.w3.org/2001/XMLSchema#byte";
    pub const NON_NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonNegativeInteger";
    pub const POSITIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#positiveInteger";
    pub const NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#negativeInteger";
    pub const NON_POSITIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonPositiveInteger";
    pub const UNSIGNED_LONG: &str = "http://www.w3.org/2001/XMLSchema#unsignedLong";
    pub const UNSIGNED_INT: &str = "http://www.w3.org/2001/XMLSchema#unsignedInt";
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
    pub const FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";

    /// Datatypes whose lexical space is a subset of xsd:integer
    pub const INTEGER_TYPES: &[&str] = &[
        INTEGER,
        INT,
        LONG,
        SHORT,
        BYTE,
        NON_NEGATIVE_INTEGER,
        POSITIVE_INTEGER,
        NEGATIVE_INTEGER,
        NON_POSITIVE_INTEGER,
        UNSIGNED_LONG,
        UNSIGNED_INT,
    ];
}

/// RDF vocabulary URIs used when walking collections
pub mod rdf {
    pub const FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
    pub const REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
    pub const NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
}

/// A URI reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uri(String);

impl Uri {
    /// Parse and validate a URI reference
    pub fn parse(uri: &str) -> RdfResult<Self> {
        IriRef::parse(uri)
            .map(|iri| Self(iri.into_inner().to_string()))
            .map_err(|e| RdfError::InvalidUri {
                uri: uri.to_string(),
                reason: e.to_string(),
            })
    }

    /// Wrap text already validated by an RDF parser
    pub(crate) fn new_unchecked(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// Get the URI string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.0)
    }
}

impl AsRef<str> for Uri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for Uri {
    type Err = RdfError;

    fn from_str(s: &str) -> RdfResult<Self> {
        Self::parse(s)
    }
}

/// Blank node (document-scoped identifier)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlankNode(String);

impl BlankNode {
    /// Create a blank node from its label
    pub fn new(label: impl Into<String>) -> RdfResult<Self> {
        let label = label.into();
        if label.is_empty() {
            return Err(RdfError::InvalidBlankNode(
                "blank node label is empty".to_string(),
            ));
        }
        Ok(Self(label))
    }

    /// Get the blank node label
    pub fn label(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.0)
    }
}

/// RDF literal value
///
/// At most one of `language` and `datatype` is present.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    text: String,
    language: Option<String>,
    datatype: Option<Uri>,
}

impl Literal {
    /// Create a simple literal (plain string)
    pub fn new_simple_literal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: None,
            datatype: None,
        }
    }

    /// Create a literal with language tag
    pub fn new_language_tagged_literal(
        text: impl Into<String>,
        language: impl Into<String>,
    ) -> RdfResult<Self> {
        let language = language.into();
        if language.is_empty() {
            return Err(RdfError::InvalidLiteral(
                "language tag is empty".to_string(),
            ));
        }
        Ok(Self {
            text: text.into(),
            language: Some(language),
            datatype: None,
        })
    }

    /// Create a typed literal
    pub fn new_typed_literal(text: impl Into<String>, datatype: Uri) -> Self {
        Self {
            text: text.into(),
            language: None,
            datatype: Some(datatype),
        }
    }

    /// Build a literal from optional attributes, rejecting a language tag
    /// combined with a datatype
    pub fn from_parts(
        text: impl Into<String>,
        language: Option<String>,
        datatype: Option<Uri>,
    ) -> RdfResult<Self> {
        match (language, datatype) {
            (Some(lang), Some(dt)) => Err(RdfError::InvalidLiteral(format!(
                "literal cannot carry both language tag '{}' and datatype {}",
                lang, dt
            ))),
            (Some(lang), None) => Self::new_language_tagged_literal(text, lang),
            (None, Some(dt)) => Ok(Self::new_typed_literal(text, dt)),
            (None, None) => Ok(Self::new_simple_literal(text)),
        }
    }

    /// Get the lexical value
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the language tag if present
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Get the datatype if present
    pub fn datatype(&self) -> Option<&Uri> {
        self.datatype.as_ref()
    }

    pub(crate) fn has_datatype(&self, datatype: &str) -> bool {
        self.datatype.as_ref().map(Uri::as_str) == Some(datatype)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"")?;
        for c in self.text.chars() {
            match c {
                '"' => write!(f, "\\\"")?,
                '\\' => write!(f, "\\\\")?,
                '\n' => write!(f, "\\n")?,
                '\r' => write!(f, "\\r")?,
                c => write!(f, "{}", c)?,
            }
        }
        write!(f, "\"")?;
        if let Some(lang) = &self.language {
            write!(f, "@{}", lang)
        } else if let Some(dt) = &self.datatype {
            write!(f, "^^{}", dt)
        } else {
            Ok(())
        }
    }
}

/// A value in a result cell: URI, blank node or literal
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    /// URI reference
    Uri(Uri),
    /// Blank node
    BlankNode(BlankNode),
    /// Literal value
    Literal(Literal),
}

impl Node {
    /// Check if this is a URI
    pub fn is_uri(&self) -> bool {
        matches!(self, Node::Uri(_))
    }

    /// Check if this is a blank node
    pub fn is_blank_node(&self) -> bool {
        matches!(self, Node::BlankNode(_))
    }

    /// Check if this is a literal
    pub fn is_literal(&self) -> bool {
        matches!(self, Node::Literal(_))
    }

    pub fn as_uri(&self) -> Option<&Uri> {
        match self {
            Node::Uri(u) => Some(u),
            _ => None,
        }
    }

    pub fn as_blank_node(&self) -> Option<&BlankNode> {
        match self {
            Node::BlankNode(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Node::Literal(l) => Some(l),
            _ => None,
        }
    }

    /// Lexical form: the URI string, blank node label or literal text
    pub fn lexical_form(&self) -> &str {
        match self {
            Node::Uri(u) => u.as_str(),
            Node::BlankNode(b) => b.label(),
            Node::Literal(l) => l.text(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Uri(u) => write!(f, "{}", u),
            Node::BlankNode(b) => write!(f, "{}", b),
            Node::Literal(l) => write!(f, "{}", l),
        }
    }
}

impl From<Uri> for Node {
    fn from(uri: Uri) -> Self {
        Node::Uri(uri)
    }
}

impl From<BlankNode> for Node {
    fn from(node: BlankNode) -> Self {
        Node::BlankNode(node)
    }
}

impl From<Literal> for Node {
    fn from(lit: Literal) -> Self {
        Node::Literal(lit)
    }
}

/// RDF triple (subject-predicate-object)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    /// Subject
    pub subject: Node,
    /// Predicate
    pub predicate: Node,
    /// Object
    pub object: Node,
}

impl Triple {
    /// Create a new triple
    pub fn new(subject: impl Into<Node>, predicate: impl Into<Node>, object: impl Into<Node>) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}
