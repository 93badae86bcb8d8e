//! Manifest layer: JSON shapes for routed endpoints + validated structures.
//!
//! This module is intentionally separate from schema generation and rendering.
//! It owns:
//! - HttpMethod and Field (the vocabulary of links)
//! - Manifest (views + endpoints) and its validation

pub mod endpoints;
pub mod field;
pub mod method;

pub use endpoints::{ActionSpec, Endpoint, Manifest, ManifestError, ValidatedManifest, ViewSpec};
pub use field::{Field, FieldLocation};
pub use method::HttpMethod;

use anyhow::Context;
use std::fs;

/// Read and validate a manifest file.
pub fn load_manifest(path: &str) -> anyhow::Result<ValidatedManifest> {
    let text = fs::read_to_string(path).with_context(|| format!("read manifest file {}", path))?;
    let manifest: Manifest =
        serde_json::from_str(&text).with_context(|| format!("parse manifest file {}", path))?;
    let validated = manifest
        .validate_and_build()
        .with_context(|| format!("validate manifest file {}", path))?;

    tracing::debug!(
        endpoints = validated.endpoints.len(),
        views = manifest.views.len(),
        "loaded manifest {}",
        path
    );
    Ok(validated)
}
