//! Endpoint manifest (manifest.json): the routes a schema is generated for.
//!
//! JSON shape:
//! {
//!   "title": "Account API",              // optional document title
//!   "url": "http://localhost:8000/",     // optional base URL
//!   "views": {
//!     "UserViewSet": {
//!       "description": "User related operations",
//!       "serializer_fields": [{ "name": "email", "required": true }],
//!       "actions": { "login": { "serializer_fields": [...] } },
//!       "filter_fields": [],
//!       "coreapi_fields": [],
//!       "custom_route_swagger": { "login": [...] },
//!       "exclude_from_schema": false
//!     }
//!   },
//!   "endpoints": [
//!     { "path": "/users/", "method": "GET", "view": "UserViewSet",
//!       "action": "list", "action_map": { "get": "list", "post": "create" } }
//!   ]
//! }
//!
//! Views are shared by name; validation resolves each endpoint's view into a
//! shared handle and rejects dangling references and duplicate routes.

use crate::manifest::{Field, HttpMethod};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifestError {
    #[error("endpoint {method} {path} references unknown view {view}")]
    UnknownView {
        path: String,
        method: HttpMethod,
        view: String,
    },

    #[error("endpoint path must start with '/': {0}")]
    RelativePath(String),

    #[error("duplicate endpoint in manifest: {method} {path}")]
    DuplicateEndpoint { path: String, method: HttpMethod },

    #[error("action map of {method} {path} has unknown method key {key}")]
    BadActionMap {
        path: String,
        method: HttpMethod,
        key: String,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub views: BTreeMap<String, ViewSpec>,

    #[serde(default)]
    pub endpoints: Vec<RawEndpoint>,
}

/// View metadata shared by every endpoint routed to the view.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewSpec {
    #[serde(skip)]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Request body fields for actions without their own list.
    #[serde(default)]
    pub serializer_fields: Vec<Field>,

    #[serde(default)]
    pub actions: BTreeMap<String, ActionSpec>,

    /// Query fields offered on list views.
    #[serde(default)]
    pub filter_fields: Vec<Field>,

    /// Extra fields appended to every link of the view.
    #[serde(default)]
    pub coreapi_fields: Vec<Field>,

    /// Per-action fields that replace the generated ones.
    #[serde(default)]
    pub custom_route_swagger: BTreeMap<String, Vec<Field>>,

    #[serde(default)]
    pub exclude_from_schema: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActionSpec {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub serializer_fields: Option<Vec<Field>>,
}

impl ViewSpec {
    pub fn description_for(&self, action: Option<&str>) -> Option<&str> {
        action
            .and_then(|a| self.actions.get(a))
            .and_then(|a| a.description.as_deref())
            .or(self.description.as_deref())
    }

    pub fn serializer_fields_for(&self, action: Option<&str>) -> &[Field] {
        action
            .and_then(|a| self.actions.get(a))
            .and_then(|a| a.serializer_fields.as_deref())
            .unwrap_or(&self.serializer_fields)
    }

    pub fn custom_fields_for(&self, action: Option<&str>) -> Option<&[Field]> {
        action
            .and_then(|a| self.custom_route_swagger.get(a))
            .map(Vec::as_slice)
    }
}

/// Raw endpoint shape as it appears in manifest.json.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawEndpoint {
    pub path: String,
    pub method: HttpMethod,
    pub view: String,

    #[serde(default)]
    pub action: Option<String>,

    /// Lowercase method -> action for every method routed to this path.
    #[serde(default)]
    pub action_map: BTreeMap<String, String>,
}

/// Validated endpoint ready for schema generation.
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub path: String,
    pub method: HttpMethod,
    pub action: Option<String>,
    pub action_map: BTreeMap<String, String>,
    pub view: Arc<ViewSpec>,
}

impl Endpoint {
    pub fn new(path: impl Into<String>, method: HttpMethod, view: Arc<ViewSpec>) -> Self {
        Self {
            path: path.into(),
            method,
            action: None,
            action_map: BTreeMap::new(),
            view,
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        let action = action.into();
        if self.action_map.is_empty() {
            self.action_map
                .insert(self.method.lower().to_string(), action.clone());
        }
        self.action = Some(action);
        self
    }

    pub fn with_action_map(mut self, pairs: &[(&str, &str)]) -> Self {
        self.action_map = pairs
            .iter()
            .map(|(m, a)| (m.to_string(), a.to_string()))
            .collect();
        self
    }
}

#[derive(Debug, Clone)]
pub struct ValidatedManifest {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub endpoints: Vec<Endpoint>,
}

impl Manifest {
    /// Resolve view references, check paths and routes, keep endpoint order.
    pub fn validate_and_build(&self) -> Result<ValidatedManifest, ManifestError> {
        let views: BTreeMap<&str, Arc<ViewSpec>> = self
            .views
            .iter()
            .map(|(name, view)| {
                let mut view = view.clone();
                view.name = name.clone();
                (name.as_str(), Arc::new(view))
            })
            .collect();

        let mut seen: BTreeSet<(&str, HttpMethod)> = BTreeSet::new();
        let mut endpoints = Vec::with_capacity(self.endpoints.len());
        for raw in &self.endpoints {
            if !raw.path.starts_with('/') {
                return Err(ManifestError::RelativePath(raw.path.clone()));
            }

            let view = views
                .get(raw.view.as_str())
                .cloned()
                .ok_or_else(|| ManifestError::UnknownView {
                    path: raw.path.clone(),
                    method: raw.method,
                    view: raw.view.clone(),
                })?;

            if !seen.insert((raw.path.as_str(), raw.method)) {
                return Err(ManifestError::DuplicateEndpoint {
                    path: raw.path.clone(),
                    method: raw.method,
                });
            }

            if let Some(key) = raw
                .action_map
                .keys()
                .find(|k| HttpMethod::try_from(k.as_str()).is_err())
            {
                return Err(ManifestError::BadActionMap {
                    path: raw.path.clone(),
                    method: raw.method,
                    key: key.clone(),
                });
            }

            let mut action_map = raw.action_map.clone();
            if let Some(action) = &raw.action {
                action_map
                    .entry(raw.method.lower().to_string())
                    .or_insert_with(|| action.clone());
            }

            endpoints.push(Endpoint {
                path: raw.path.clone(),
                method: raw.method,
                action: raw.action.clone(),
                action_map,
                view,
            });
        }

        Ok(ValidatedManifest {
            title: self.title.clone(),
            url: self.url.clone(),
            description: self.description.clone(),
            endpoints,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(json: &str) -> Manifest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn resolves_views_and_keeps_order() {
        let manifest = parse(
            r#"{
                "views": { "UserViewSet": { "description": "Users" } },
                "endpoints": [
                    { "path": "/users/", "method": "get", "view": "UserViewSet", "action": "list",
                      "action_map": { "get": "list", "post": "create" } },
                    { "path": "/users/", "method": "POST", "view": "UserViewSet", "action": "create" }
                ]
            }"#,
        );
        let validated = manifest.validate_and_build().unwrap();

        assert_eq!(validated.endpoints.len(), 2);
        assert_eq!(validated.endpoints[0].method, HttpMethod::Get);
        assert_eq!(validated.endpoints[0].view.name, "UserViewSet");
        assert_eq!(validated.endpoints[0].action_map.len(), 2);
        assert_eq!(
            validated.endpoints[1].action_map.get("post").map(String::as_str),
            Some("create")
        );
        assert!(Arc::ptr_eq(&validated.endpoints[0].view, &validated.endpoints[1].view));
    }

    #[test]
    fn rejects_unknown_view() {
        let manifest = parse(
            r#"{ "endpoints": [ { "path": "/x/", "method": "GET", "view": "Missing" } ] }"#,
        );
        assert_eq!(
            manifest.validate_and_build().unwrap_err(),
            ManifestError::UnknownView {
                path: "/x/".to_string(),
                method: HttpMethod::Get,
                view: "Missing".to_string(),
            }
        );
    }

    #[test]
    fn rejects_duplicate_routes_and_relative_paths() {
        let dup = parse(
            r#"{ "views": { "V": {} }, "endpoints": [
                { "path": "/x/", "method": "GET", "view": "V" },
                { "path": "/x/", "method": "get", "view": "V" } ] }"#,
        );
        assert!(matches!(
            dup.validate_and_build(),
            Err(ManifestError::DuplicateEndpoint { .. })
        ));

        let relative = parse(
            r#"{ "views": { "V": {} }, "endpoints": [ { "path": "x/", "method": "GET", "view": "V" } ] }"#,
        );
        assert_eq!(
            relative.validate_and_build().unwrap_err(),
            ManifestError::RelativePath("x/".to_string())
        );
    }

    #[test]
    fn rejects_bad_action_map_keys() {
        let manifest = parse(
            r#"{ "views": { "V": {} }, "endpoints": [
                { "path": "/x/", "method": "GET", "view": "V", "action_map": { "fetch": "list" } } ] }"#,
        );
        assert!(matches!(
            manifest.validate_and_build(),
            Err(ManifestError::BadActionMap { .. })
        ));
    }

    #[test]
    fn action_specific_metadata_falls_back_to_view() {
        let manifest = parse(
            r#"{ "views": { "V": {
                "description": "view doc",
                "serializer_fields": [ { "name": "email" } ],
                "actions": { "login": { "description": "login doc",
                    "serializer_fields": [ { "name": "password", "required": true } ] } }
            } } }"#,
        );
        let view = &manifest.views["V"];

        assert_eq!(view.description_for(Some("login")), Some("login doc"));
        assert_eq!(view.description_for(Some("list")), Some("view doc"));
        assert_eq!(view.serializer_fields_for(Some("login"))[0].name, "password");
        assert_eq!(view.serializer_fields_for(None)[0].name, "email");
        assert!(view.custom_fields_for(Some("login")).is_none());
    }
}
