//! Swagger/OpenAPI generation for routed REST endpoints.
//!
//! Endpoints from a manifest are reduced to key paths and links, grouped into
//! a schema tree, settled, and rendered as Swagger 2.0 JSON or a Swagger UI
//! page.

pub mod config;
pub mod generator;
pub mod link;
pub mod manifest;
pub mod render;
pub mod tree;

pub type Result<T> = anyhow::Result<T>;

pub use config::Settings;
pub use generator::{GeneratorError, GeneratorOptions, SchemaDocument, SchemaGenerator};
pub use link::Link;
pub use tree::{LinkNode, SchemaCollisionError, TreeError};

/// Load settings and manifest, then generate the settled schema.
pub fn build_schema(
    manifest_path: &str,
    settings: &Settings,
) -> Result<SchemaDocument> {
    let manifest = manifest::load_manifest(manifest_path)?;
    let options = settings.generator_options(&manifest);
    let generator = SchemaGenerator::new(options, manifest.endpoints)?;
    Ok(generator.get_schema()?)
}
