//! Default and named graph lists

use super::ClientResult;
use crate::rdf::Uri;

/// Ordered, duplicate-free list of graph URIs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphUris {
    uris: Vec<Uri>,
}

impl GraphUris {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list with a single graph
    pub fn set(&mut self, uri: Uri) {
        self.uris.clear();
        self.uris.push(uri);
    }

    /// Parse and replace the list with a single graph
    pub fn set_str(&mut self, uri: &str) -> ClientResult<()> {
        self.set(Uri::parse(uri)?);
        Ok(())
    }

    /// Replace the list
    pub fn set_all(&mut self, uris: impl IntoIterator<Item = Uri>) {
        self.uris.clear();
        self.add_all(uris);
    }

    /// Append a graph unless already present
    pub fn add(&mut self, uri: Uri) {
        if !self.uris.contains(&uri) {
            self.uris.push(uri);
        }
    }

    pub fn add_str(&mut self, uri: &str) -> ClientResult<()> {
        self.add(Uri::parse(uri)?);
        Ok(())
    }

    pub fn add_all(&mut self, uris: impl IntoIterator<Item = Uri>) {
        for uri in uris {
            self.add(uri);
        }
    }

    pub fn clear(&mut self) {
        self.uris.clear();
    }

    /// First graph, if any
    pub fn first(&self) -> Option<&Uri> {
        self.uris.first()
    }

    pub fn all(&self) -> &[Uri] {
        &self.uris
    }

    pub fn is_empty(&self) -> bool {
        self.uris.is_empty()
    }

    pub fn len(&self) -> usize {
        self.uris.len()
    }
}
