//! Output formats for a settled schema document.

pub mod html;
pub mod swagger;

pub use html::render_swagger_ui;
pub use swagger::{SwaggerDocument, render_swagger, render_swagger_json};
