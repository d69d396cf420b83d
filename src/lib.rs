//! File-backed product store: a JSON array on disk mirrored by an in-memory
//! sequence, with validated add/update/delete and lookup by id.

pub mod errors;
pub mod models;
pub mod storage;

pub use errors::{StoreError, ValidationError};
pub use models::{Product, ProductDraft, ProductPatch};
pub use storage::ProductStore;
