//! Result header: variable names and metadata links

use super::{ResultSetError, ResultSetResult};
use crate::rdf::Uri;
use std::collections::HashMap;

/// Ordered variable names plus the links declared in a result's `head`
///
/// Column order is declaration order. Headers are shared between the parser
/// and the result set through an `Arc` and never change once built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultHeader {
    variables: Vec<String>,
    index: HashMap<String, usize>,
    links: Vec<Uri>,
}

impl ResultHeader {
    /// Build a header, rejecting repeated variable names
    pub fn new(variables: Vec<String>, links: Vec<Uri>) -> ResultSetResult<Self> {
        let mut index = HashMap::with_capacity(variables.len());
        for (i, name) in variables.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(ResultSetError::DuplicateVariable(name.clone()));
            }
        }
        Ok(Self {
            variables,
            index,
            links,
        })
    }

    /// Header with no variables and no links
    pub fn empty() -> Self {
        Self::default()
    }

    /// Variable names in column order
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Zero-based column of a variable
    pub fn index_of(&self, name: &str) -> ResultSetResult<usize> {
        self.position(name)
            .ok_or_else(|| ResultSetError::ColumnNotFound(name.to_string()))
    }

    /// Zero-based column of a variable, if declared
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Variable name at a zero-based column
    pub fn variable(&self, index: usize) -> Option<&str> {
        self.variables.get(index).map(String::as_str)
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Metadata link URIs
    pub fn links(&self) -> &[Uri] {
        &self.links
    }
}
