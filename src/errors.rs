use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A candidate product failed a field check.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("field `{0}` must not be empty")]
    MissingField(&'static str),

    #[error("field `{0}` must be positive")]
    NotPositive(&'static str),
}

/// Errors a [`ProductStore`](crate::storage::ProductStore) operation can return.
///
/// A lookup that matches nothing is not an error; those operations return
/// `Ok(None)` instead.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("product code `{0}` already exists")]
    DuplicateCode(String),

    #[error("could not read product file {}: {source}", .path.display())]
    Load { path: PathBuf, source: io::Error },

    #[error("product file {} is not a valid product array: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("could not write product file {}: {source}", .path.display())]
    Persist { path: PathBuf, source: io::Error },
}
