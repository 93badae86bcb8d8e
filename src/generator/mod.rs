//! Schema generation: endpoints -> links -> settled schema tree.
//!
//! Order of work per call:
//! 1) drop endpoints whose view is excluded, coerce `{pk}` paths
//! 2) compute the common path prefix over what is left
//! 3) build a link per endpoint and insert it at its derived key path
//! 4) settle pending leaves into named children

pub mod keys;
pub mod paths;

pub use keys::{get_keys, is_custom_action, is_list_view};
pub use paths::{BaseUrl, coerce_path, common_path, determine_path_prefix};

use crate::link::Link;
use crate::manifest::{Endpoint, Field, FieldLocation, HttpMethod};
use crate::tree::{LinkNode, TreeError, insert};
use regex::Regex;
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::{debug, info};

pub const JSON_ENCODING: &str = "application/json";

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("The schema generator did not return a schema document: no endpoints to describe")]
    EmptySchema,

    #[error("{method} {path} is routed twice once path variables are coerced")]
    DuplicateRoute { method: HttpMethod, path: String },

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("bad path pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// A settled schema tree plus document metadata, ready to render.
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    pub title: String,
    pub description: Option<String>,
    pub base_url: Option<BaseUrl>,
    pub content: LinkNode,
}

#[derive(Debug, Clone, Default)]
pub struct GeneratorOptions {
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub coerce_path_pk: bool,
}

pub struct SchemaGenerator {
    options: GeneratorOptions,
    base_url: Option<BaseUrl>,
    endpoints: Vec<Endpoint>,
    path_var: Regex,
}

impl SchemaGenerator {
    pub fn new(options: GeneratorOptions, endpoints: Vec<Endpoint>) -> Result<Self, GeneratorError> {
        let base_url = options.url.as_deref().map(BaseUrl::parse).transpose()?;
        let path_var = Regex::new(r"\{([^{}]+)\}")?;

        Ok(Self {
            options,
            base_url,
            endpoints,
            path_var,
        })
    }

    pub fn coerce_path(&self, path: &str) -> String {
        if self.options.coerce_path_pk {
            coerce_path(path)
        } else {
            path.to_string()
        }
    }

    /// Build the link for one endpoint.
    ///
    /// Every link starts with an optional `Authorization` header field. When
    /// the view declares custom fields for the endpoint's action, those (after
    /// the view's `coreapi_fields`) replace the generated path, body and
    /// filter fields; otherwise `coreapi_fields` are appended after them.
    pub fn get_link(&self, path: &str, endpoint: &Endpoint) -> Link {
        let url = match &self.base_url {
            Some(base) => base.join(path),
            None => path.to_string(),
        };
        let view = &endpoint.view;
        let action = endpoint.action.as_deref();

        let mut link = Link::new(url, path, endpoint.method);
        link.description = view.description_for(action).map(str::to_string);

        let mut generated: Vec<Field> = self
            .path_var
            .captures_iter(path)
            .map(|caps| Field::new(&caps[1], FieldLocation::Path).required(true))
            .collect();

        if endpoint.method.has_body() {
            // A partial update never requires a body field.
            let partial = endpoint.method == HttpMethod::Patch;
            generated.extend(
                view.serializer_fields_for(action)
                    .iter()
                    .map(|f| f.at(FieldLocation::Form).required(f.required && !partial)),
            );
            link.encoding = Some(JSON_ENCODING.to_string());
        }

        if is_list_view(path, endpoint) {
            generated.extend(view.filter_fields.iter().map(|f| f.at(FieldLocation::Query)));
        }

        let header = Field::new("Authorization", FieldLocation::Header).description("Authorization");
        let mut fields = vec![header];
        match view.custom_fields_for(action) {
            Some(custom) => {
                fields.extend(view.coreapi_fields.iter().cloned());
                fields.extend(custom.iter().cloned());
            }
            None => {
                fields.extend(generated);
                fields.extend(view.coreapi_fields.iter().cloned());
            }
        }
        link.fields = fields;
        link
    }

    /// Populate a schema tree with every included endpoint.
    ///
    /// Returns `None` when no endpoint survives exclusion. The returned tree
    /// still holds pending leaves; see `get_schema` for the settled form.
    pub fn get_links(&self) -> Result<Option<LinkNode>, GeneratorError> {
        let mut view_endpoints: Vec<(String, &Endpoint)> = Vec::new();
        let mut seen: BTreeSet<(String, HttpMethod)> = BTreeSet::new();
        for endpoint in &self.endpoints {
            if endpoint.view.exclude_from_schema {
                debug!(
                    "skipping {} {}: view {} is excluded from schema",
                    endpoint.method, endpoint.path, endpoint.view.name
                );
                continue;
            }
            let path = self.coerce_path(&endpoint.path);
            if !seen.insert((path.clone(), endpoint.method)) {
                return Err(GeneratorError::DuplicateRoute {
                    method: endpoint.method,
                    path,
                });
            }
            view_endpoints.push((path, endpoint));
        }

        if view_endpoints.is_empty() {
            return Ok(None);
        }

        let paths: Vec<&str> = view_endpoints.iter().map(|(p, _)| p.as_str()).collect();
        let prefix = determine_path_prefix(&paths);
        debug!("path prefix {} over {} endpoints", prefix, paths.len());

        let mut links = LinkNode::new();
        for (path, endpoint) in &view_endpoints {
            let link = self.get_link(path, endpoint);
            let subpath = path.strip_prefix(prefix.as_str()).unwrap_or(path.as_str());
            let keys = get_keys(subpath, endpoint);
            debug!("insert {} {} at {:?}", endpoint.method, path, keys);
            insert(&mut links, &keys, link)?;
        }

        info!(
            "generated {} links ({} excluded)",
            view_endpoints.len(),
            self.endpoints.len() - view_endpoints.len()
        );
        Ok(Some(links))
    }

    /// The settled schema document. An empty endpoint set is an error.
    pub fn get_schema(&self) -> Result<SchemaDocument, GeneratorError> {
        let mut content = self.get_links()?.ok_or(GeneratorError::EmptySchema)?;
        content.distribute_links();

        Ok(SchemaDocument {
            title: self.options.title.clone(),
            description: self.options.description.clone(),
            base_url: self.base_url.clone(),
            content,
        })
    }
}
