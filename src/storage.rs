use std::path::PathBuf;

use tokio::fs;
use tracing::{debug, info, warn};

use crate::errors::StoreError;
use crate::models::{Product, ProductDraft, ProductPatch};

/// File-backed product store.
///
/// Owns the in-memory product sequence and mirrors it to a single JSON file
/// holding a pretty-printed array. Reads (`list`, `get`) re-synchronize with
/// the file before scanning; mutations operate on the current in-memory
/// sequence and rewrite the whole file before reporting success. A mutation
/// whose write fails is rolled back in memory, so memory and disk never
/// diverge silently.
pub struct ProductStore {
    path: PathBuf,
    products: Vec<Product>,
    last_id: u64,
}

impl ProductStore {
    /// Opens the store at `path`, creating the backing file with an empty
    /// array when it does not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if !path.exists() {
            fs::write(&path, "[]").await.map_err(|source| StoreError::Persist {
                path: path.clone(),
                source,
            })?;
            info!(path = %path.display(), "created empty product file");
        }
        let mut store = ProductStore {
            path,
            products: Vec::new(),
            last_id: 0,
        };
        store.reload().await?;
        Ok(store)
    }

    /// Reads the backing file and replaces the in-memory sequence wholesale.
    ///
    /// The last-assigned id is recomputed from the maximum id present. On
    /// failure the previous in-memory state is kept.
    pub async fn reload(&mut self) -> Result<(), StoreError> {
        let raw = fs::read_to_string(&self.path).await.map_err(|source| {
            warn!(path = %self.path.display(), %source, "could not read product file");
            StoreError::Load {
                path: self.path.clone(),
                source,
            }
        })?;
        let products: Vec<Product> = serde_json::from_str(&raw).map_err(|source| {
            warn!(path = %self.path.display(), %source, "product file is not a valid product array");
            StoreError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;
        self.last_id = products.iter().map(|p| p.id).max().unwrap_or(0);
        self.products = products;
        debug!(count = self.products.len(), "reloaded products");
        Ok(())
    }

    /// Serializes the full sequence and replaces the backing file.
    ///
    /// The array is written to a sibling `.tmp` file first and renamed over
    /// the target, so readers never observe a partial write.
    pub async fn persist(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.products).map_err(|source| {
            StoreError::Persist {
                path: self.path.clone(),
                source: source.into(),
            }
        })?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        let write = async {
            fs::write(&tmp, json).await?;
            fs::rename(&tmp, &self.path).await
        };
        write.await.map_err(|source| {
            warn!(path = %self.path.display(), %source, "could not save products");
            StoreError::Persist {
                path: self.path.clone(),
                source,
            }
        })?;
        debug!(path = %self.path.display(), count = self.products.len(), "saved products");
        Ok(())
    }

    /// Validates and stores a new product, assigning the next id.
    ///
    /// Returns the stored product. The draft is rejected before any state
    /// change when a field is missing or its `code` is already taken.
    pub async fn add(&mut self, draft: ProductDraft) -> Result<Product, StoreError> {
        if let Err(err) = draft.validate() {
            warn!(%err, "rejected product");
            return Err(err.into());
        }
        if self.products.iter().any(|p| p.code == draft.code) {
            warn!(code = %draft.code, "rejected product: code already exists");
            return Err(StoreError::DuplicateCode(draft.code));
        }

        let product = draft.into_product(self.last_id + 1);
        self.products.push(product.clone());
        if let Err(err) = self.persist().await {
            self.products.pop();
            return Err(err);
        }
        self.last_id = product.id;
        info!(id = product.id, title = %product.title, "added product");
        Ok(product)
    }

    /// Reloads from disk, then returns the products in stored order.
    pub async fn list(&mut self) -> Result<&[Product], StoreError> {
        self.reload().await?;
        Ok(&self.products)
    }

    /// Reloads from disk, then looks up a product by id.
    ///
    /// An unknown id is a normal outcome, not an error.
    pub async fn get(&mut self, id: u64) -> Result<Option<Product>, StoreError> {
        self.reload().await?;
        let found = self.products.iter().find(|p| p.id == id).cloned();
        if found.is_none() {
            info!(id, "product not found");
        }
        Ok(found)
    }

    /// Applies a partial update to the product with `id` and persists.
    ///
    /// Scans the current in-memory sequence without reloading first. Returns
    /// the updated product, or `Ok(None)` when no product matches (nothing is
    /// written in that case).
    pub async fn update(
        &mut self,
        id: u64,
        patch: ProductPatch,
    ) -> Result<Option<Product>, StoreError> {
        let Some(index) = self.products.iter().position(|p| p.id == id) else {
            info!(id, "product not found");
            return Ok(None);
        };
        if let Err(err) = patch.validate() {
            warn!(id, %err, "rejected update");
            return Err(err.into());
        }
        if let Some(code) = &patch.code {
            if self.products.iter().any(|p| p.id != id && p.code == *code) {
                warn!(id, code = %code, "rejected update: code already exists");
                return Err(StoreError::DuplicateCode(code.clone()));
            }
        }

        let previous = self.products[index].clone();
        patch.apply(&mut self.products[index]);
        if let Err(err) = self.persist().await {
            self.products[index] = previous;
            return Err(err);
        }
        let updated = self.products[index].clone();
        info!(id, title = %updated.title, "updated product");
        Ok(Some(updated))
    }

    /// Renames the product with `id`, leaving every other field untouched.
    pub async fn update_title(
        &mut self,
        id: u64,
        title: &str,
    ) -> Result<Option<Product>, StoreError> {
        let patch = ProductPatch {
            title: Some(title.to_owned()),
            ..ProductPatch::default()
        };
        self.update(id, patch).await
    }

    /// Removes the product with `id`, preserving the order of the rest.
    ///
    /// Scans the current in-memory sequence without reloading first. Returns
    /// the removed product, or `Ok(None)` when no product matches.
    pub async fn delete(&mut self, id: u64) -> Result<Option<Product>, StoreError> {
        let Some(index) = self.products.iter().position(|p| p.id == id) else {
            info!(id, "product not found");
            return Ok(None);
        };

        let removed = self.products.remove(index);
        if let Err(err) = self.persist().await {
            self.products.insert(index, removed);
            return Err(err);
        }
        info!(id, title = %removed.title, "deleted product");
        Ok(Some(removed))
    }
}
