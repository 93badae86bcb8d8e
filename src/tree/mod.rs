//! Schema tree: nested named links with collision detection.
//!
//! Endpoints are inserted by key path, then `LinkNode::distribute_links`
//! settles the pending leaves into uniquely named children. The settled tree
//! is what the renderers consume.

pub mod error;
pub mod insert;
pub mod node;

pub use error::{SchemaCollisionError, TreeError};
pub use insert::insert;
pub use node::{Entry, LinkNode};
