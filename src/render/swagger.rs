//! Swagger 2.0 encoding of a settled schema document.

use crate::config::Settings;
use crate::generator::SchemaDocument;
use crate::link::Link;
use crate::manifest::{Field, FieldLocation, HttpMethod};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::warn;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwaggerDocument {
    pub swagger: &'static str,
    pub info: Info,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<String>,
    pub paths: IndexMap<String, IndexMap<String, Operation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_definitions: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Info {
    pub title: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub operation_id: String,
    pub responses: IndexMap<String, Response>,
    pub parameters: Vec<Parameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Response {
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(rename = "in")]
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

/// Encode `doc` as Swagger 2.0, then apply the configured overrides for
/// `schemes` and `securityDefinitions`.
pub fn render_swagger(doc: &SchemaDocument, settings: &Settings) -> SwaggerDocument {
    let base = doc.base_url.as_ref();

    let schemes = if settings.schemes.is_empty() {
        base.and_then(|b| b.scheme.clone()).into_iter().collect()
    } else {
        settings.schemes.clone()
    };

    SwaggerDocument {
        swagger: "2.0",
        info: Info {
            title: doc.title.clone(),
            description: doc.description.clone().unwrap_or_default(),
            version: String::new(),
        },
        host: base.and_then(|b| b.host.clone()),
        schemes,
        paths: paths_object(doc),
        security_definitions: settings.security_definitions.clone(),
    }
}

pub fn render_swagger_json(doc: &SchemaDocument, settings: &Settings) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&render_swagger(doc, settings))?)
}

fn paths_object(doc: &SchemaDocument) -> IndexMap<String, IndexMap<String, Operation>> {
    let mut paths: IndexMap<String, IndexMap<String, Operation>> = IndexMap::new();
    for (keys, link) in doc.content.iter_links() {
        let (operation_id, tags) = match keys.split_first() {
            Some((first, rest)) if !rest.is_empty() => (rest.join("_"), vec![first.clone()]),
            _ => (keys.join("_"), vec![]),
        };

        let method = link.action.lower().to_string();
        let operations = paths.entry(link.path.clone()).or_default();
        if operations.contains_key(&method) {
            warn!(
                "operation {} {} appears twice in schema, keeping {}",
                link.action, link.path, operation_id
            );
        }
        operations.insert(method, operation(operation_id, link, tags));
    }
    paths
}

fn operation(operation_id: String, link: &Link, tags: Vec<String>) -> Operation {
    let encoding = link.encoding.as_deref();
    Operation {
        operation_id,
        responses: responses(link.action),
        parameters: parameters(&link.fields, encoding),
        description: link.description.clone().filter(|d| !d.is_empty()),
        consumes: encoding.map(str::to_string).into_iter().collect(),
        tags,
    }
}

fn responses(method: HttpMethod) -> IndexMap<String, Response> {
    let status = match method {
        HttpMethod::Post => "201",
        HttpMethod::Delete => "204",
        _ => "200",
    };
    let mut out = IndexMap::new();
    out.insert(
        status.to_string(),
        Response {
            description: String::new(),
        },
    );
    out
}

fn is_form_encoding(encoding: Option<&str>) -> bool {
    matches!(
        encoding,
        Some("multipart/form-data") | Some("application/x-www-form-urlencoded")
    )
}

/// Swagger parameters for a link's fields.
///
/// `form` fields become `formData` parameters under form encodings; under any
/// other encoding they are folded into a single `data` body parameter whose
/// schema lists them as properties.
pub fn parameters(fields: &[Field], encoding: Option<&str>) -> Vec<Parameter> {
    let mut parameters = Vec::new();
    let mut properties = Map::new();
    let mut required: Vec<String> = Vec::new();

    for field in fields {
        let items = (field.field_type == "array").then(|| json!({ "type": "string" }));
        match field.location {
            FieldLocation::Form if is_form_encoding(encoding) => parameters.push(Parameter {
                name: field.name.clone(),
                required: Some(field.required),
                location: "formData".to_string(),
                description: Some(field.description.clone()),
                param_type: Some(field.field_type.clone()),
                items,
                schema: None,
            }),
            FieldLocation::Form => {
                let mut property = json!({
                    "description": field.description,
                    "type": field.field_type,
                });
                if let Some(items) = items {
                    property["items"] = items;
                }
                properties.insert(field.name.clone(), property);
                if field.required {
                    required.push(field.name.clone());
                }
            }
            FieldLocation::Body => {
                let schema = if encoding == Some("application/octet-stream") {
                    json!({ "type": "string", "format": "binary" })
                } else {
                    json!({})
                };
                parameters.push(Parameter {
                    name: field.name.clone(),
                    required: Some(field.required),
                    location: "body".to_string(),
                    description: Some(field.description.clone()),
                    param_type: None,
                    items: None,
                    schema: Some(schema),
                });
            }
            FieldLocation::Path | FieldLocation::Query | FieldLocation::Header => {
                parameters.push(Parameter {
                    name: field.name.clone(),
                    required: Some(field.required || field.location == FieldLocation::Path),
                    location: field.location.as_str().to_string(),
                    description: Some(field.description.clone()),
                    param_type: Some(field.field_type.clone()),
                    items,
                    schema: None,
                })
            }
        }
    }

    if !properties.is_empty() {
        let mut schema = json!({ "type": "object", "properties": properties });
        if !required.is_empty() {
            schema["required"] = json!(required);
        }
        parameters.push(Parameter {
            name: "data".to_string(),
            required: None,
            location: "body".to_string(),
            description: None,
            param_type: None,
            items: None,
            schema: Some(schema),
        });
    }

    parameters
}
