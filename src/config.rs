//! Swagger settings: JSON file, then environment, then command line.

use crate::generator::GeneratorOptions;
use crate::manifest::ValidatedManifest;
use anyhow::Context;
use serde::Deserialize;
use serde_json::{Value, json};
use std::{env, fs};
use tracing::{debug, info};

pub const DEFAULT_TITLE: &str = "API";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,

    /// Rename `{pk}` path variables to `{id}`.
    pub coerce_path_pk: bool,

    /// Copied verbatim into `securityDefinitions`; omitted when null.
    pub security_definitions: Option<Value>,
    pub schemes: Vec<String>,

    // Swagger UI
    pub use_session_auth: bool,
    pub login_url: String,
    pub logout_url: String,
    pub doc_expansion: Option<String>,
    pub apis_sorter: Option<String>,
    pub operations_sorter: Option<String>,
    pub show_request_headers: bool,
    pub supported_submit_methods: Vec<String>,
    pub validator_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: None,
            url: None,
            description: None,
            coerce_path_pk: true,
            security_definitions: Some(json!({ "basic": { "type": "basic" } })),
            schemes: vec!["http".to_string(), "https".to_string()],
            use_session_auth: true,
            login_url: "/api-auth/login/".to_string(),
            logout_url: "/api-auth/logout/".to_string(),
            doc_expansion: None,
            apis_sorter: None,
            operations_sorter: None,
            show_request_headers: false,
            supported_submit_methods: ["get", "post", "put", "delete", "patch"]
                .iter()
                .map(|m| m.to_string())
                .collect(),
            validator_url: Some(String::new()),
        }
    }
}

impl Settings {
    /// Read settings from `path` (defaults when absent), then apply
    /// `SCHEMA_TITLE` / `SCHEMA_URL` from the environment.
    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        let mut settings = match path {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("read settings file {}", path))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parse settings file {}", path))?
            }
            None => {
                debug!("no settings file given, using defaults");
                Settings::default()
            }
        };

        settings.apply_env();
        Ok(settings)
    }

    fn apply_env(&mut self) {
        if let Some(title) = var("SCHEMA_TITLE") {
            self.title = Some(title);
        }
        if let Some(url) = var("SCHEMA_URL") {
            self.url = Some(url);
        }
    }

    /// Command-line values win over everything already loaded.
    pub fn override_with(&mut self, title: Option<String>, url: Option<String>) {
        if title.is_some() {
            self.title = title;
        }
        if url.is_some() {
            self.url = url;
        }
    }

    /// Generator options; settings take precedence over the manifest.
    pub fn generator_options(&self, manifest: &ValidatedManifest) -> GeneratorOptions {
        GeneratorOptions {
            title: self
                .title
                .clone()
                .or_else(|| manifest.title.clone())
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            description: self
                .description
                .clone()
                .or_else(|| manifest.description.clone()),
            url: self.url.clone().or_else(|| manifest.url.clone()),
            coerce_path_pk: self.coerce_path_pk,
        }
    }

    /// The settings object handed to Swagger UI.
    pub fn ui_settings(&self) -> Value {
        json!({
            "apisSorter": self.apis_sorter,
            "docExpansion": self.doc_expansion,
            "operationsSorter": self.operations_sorter,
            "showRequestHeaders": self.show_request_headers,
            "supportedSubmitMethods": self.supported_submit_methods,
            "validatorUrl": self.validator_url,
        })
    }
}

fn var(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => {
            info!("{key} set, overriding settings");
            Some(value)
        }
        _ => None,
    }
}
