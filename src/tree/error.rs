use thiserror::Error;

/// Two endpoints map onto key paths that cannot both live in one tree:
/// one of them wants a position as a branch that the other holds as a link.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "\nSchema Naming Collision.\n\n\
     Link for URL path {value_url} cannot be inserted into schema.\n\
     Position conflicts with link for URL path {target_url}.\n\n\
     Attempted to insert link with keys: {keys:?}.\n\n\
     Adjust URLs to avoid naming collision or customise key derivation\n\
     to change the schema structure.\n"
)]
pub struct SchemaCollisionError {
    pub value_url: String,
    pub target_url: String,
    pub keys: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error(transparent)]
    Collision(#[from] SchemaCollisionError),

    #[error("cannot insert link for URL path {url} with an empty key path")]
    EmptyKeyPath { url: String },
}
