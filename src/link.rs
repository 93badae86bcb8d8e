//! A link describes one operation: method, URL and its parameter fields.
//!
//! The schema tree stores links without looking inside them, except for the
//! URL it reports on collisions.

use crate::manifest::{Field, HttpMethod};

#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    /// Base URL joined with `path`.
    pub url: String,
    /// Path template, e.g. `/api/users/{id}/`.
    pub path: String,
    pub action: HttpMethod,
    pub fields: Vec<Field>,
    pub description: Option<String>,
    /// Request media type, set for methods with a body.
    pub encoding: Option<String>,
}

impl Link {
    pub fn new(url: impl Into<String>, path: impl Into<String>, action: HttpMethod) -> Self {
        Self {
            url: url.into(),
            path: path.into(),
            action,
            fields: Vec::new(),
            description: None,
            encoding: None,
        }
    }
}
