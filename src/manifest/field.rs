//! Parameter fields attached to links.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldLocation {
    Path,
    Query,
    Form,
    Body,
    Header,
}

impl FieldLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Form => "form",
            Self::Body => "body",
            Self::Header => "header",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Field {
    pub name: String,

    /// Where the field lives when it is not placed by the generator.
    #[serde(default = "default_location")]
    pub location: FieldLocation,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub description: String,

    #[serde(default = "default_type", rename = "type")]
    pub field_type: String,
}

fn default_location() -> FieldLocation {
    FieldLocation::Query
}

fn default_type() -> String {
    "string".to_string()
}

impl Field {
    pub fn new(name: impl Into<String>, location: FieldLocation) -> Self {
        Self {
            name: name.into(),
            location,
            required: false,
            description: String::new(),
            field_type: default_type(),
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Same field, moved to another location.
    pub fn at(&self, location: FieldLocation) -> Self {
        Self {
            location,
            ..self.clone()
        }
    }
}
