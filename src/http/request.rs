// src/http/request.rs
use std::fmt;

use http::Method;

/// Whether an endpoint answers with one resource or a list of them.
///
/// This is a property of the endpoint, not of the body: a collection that
/// happens to hold one element is still a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    Single,
    Collection,
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cardinality::Single => f.write_str("single object"),
            Cardinality::Collection => f.write_str("collection"),
        }
    }
}

/// A request before it hits the wire: method, path relative to the base URL
/// and query parameters whose value may be absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    method: Method,
    path: String,
    query: Vec<(String, Option<String>)>,
    cardinality: Cardinality,
}

impl RequestDescriptor {
    pub fn get(path: impl Into<String>, cardinality: Cardinality) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            query: Vec::new(),
            cardinality,
        }
    }

    /// Record a query parameter. `None` is kept in the descriptor but never
    /// serialized, so the key is left out of the URL entirely.
    pub fn param<V: ToString>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.query.push((key.into(), value.map(|v| v.to_string())));
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    /// Parameters that will actually be sent, in declaration order.
    pub fn query_pairs(&self) -> Vec<(&str, &str)> {
        self.query
            .iter()
            .filter_map(|(k, v)| v.as_deref().map(|v| (k.as_str(), v)))
            .collect()
    }
}
