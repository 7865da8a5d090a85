//! JSON file-based product store.
//!
//! Keeps the whole relation in memory and rewrites the file after every
//! mutation. Writes are atomic (write-to-temp + rename) so a crash never leaves
//! a truncated file behind.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(1) after the initial load
//! - **Write**: O(n), the full dataset is serialized each time
//! - **Best for**: local catalogs, demos, tests

use crate::domain::{CatalogError, NewProduct, Product, ProductPatch, Result};
use crate::storage::backend::ProductStore;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

const FORMAT_VERSION: u32 = 1;

/// On-disk container.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    /// Version of the file format for future migrations.
    version: u32,

    /// Products in insertion order.
    #[serde(default)]
    products: Vec<Product>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            products: Vec::new(),
        }
    }
}

/// JSON file product store.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "products": [
///     { "id": 1, "product_name": "Safety Glasses", "brand": "Acme", "item_weight": 50 }
///   ]
/// }
/// ```
#[derive(Debug)]
pub struct JsonStore {
    file_path: PathBuf,
    data: StorageData,

    /// Set when in-memory data has not reached disk yet.
    dirty: bool,
}

impl JsonStore {
    /// Opens the store at `file_path`, creating an empty one if the file is
    /// missing. Parent directories are created as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - The file exists but is not valid store JSON
    /// - The file contains duplicate product ids
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use product_hub::storage::{JsonStore, ProductStore};
    ///
    /// let mut store = JsonStore::open("/tmp/products.json")?;
    /// let products = store.list()?;
    /// # Ok::<(), product_hub::CatalogError>(())
    /// ```
    pub fn open(file_path: impl Into<PathBuf>) -> Result<Self> {
        let file_path = file_path.into();
        tracing::debug!(path = ?file_path, "opening JSON product store");

        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty store");
            StorageData::default()
        };

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| CatalogError::Storage(format!("failed to parse JSON: {e}")))?;

        if data.version > FORMAT_VERSION {
            return Err(CatalogError::Storage(format!(
                "unsupported store version {} (expected at most {FORMAT_VERSION})",
                data.version
            )));
        }

        let mut seen = HashSet::new();
        if let Some(duplicate) = data.products.iter().find(|p| !seen.insert(p.id)) {
            return Err(CatalogError::Storage(format!(
                "duplicate product id {} in {}",
                duplicate.id,
                path.display()
            )));
        }

        tracing::debug!(
            version = data.version,
            products = data.products.len(),
            "loaded store data"
        );
        Ok(data)
    }

    /// Persists pending changes via temp file and rename.
    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| CatalogError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!(path = ?self.file_path, "store saved");
        Ok(())
    }

    /// Saves the current data, restoring `previous` if the write fails so a
    /// failed mutation leaves neither memory nor disk changed.
    fn commit(&mut self, previous: StorageData) -> Result<()> {
        self.dirty = true;
        if let Err(e) = self.save_to_file() {
            tracing::error!(error = %e, "save failed, rolling back");
            self.data = previous;
            self.dirty = false;
            return Err(e);
        }
        Ok(())
    }

    fn position(&self, id: i64) -> Result<usize> {
        self.data
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or(CatalogError::ProductNotFound(id))
    }
}

impl ProductStore for JsonStore {
    fn list(&mut self) -> Result<Vec<Product>> {
        let _span = tracing::debug_span!("json_list").entered();
        tracing::debug!(count = self.data.products.len(), "listing products");
        Ok(self.data.products.clone())
    }

    fn insert(&mut self, product: &NewProduct) -> Result<Product> {
        let _span = tracing::debug_span!("json_insert", product_id = product.id).entered();

        if self.data.products.iter().any(|p| p.id == product.id) {
            return Err(CatalogError::Storage(format!(
                "duplicate key: product {} already exists",
                product.id
            )));
        }

        let stored = Product::from(product.clone());
        let previous = self.data.clone();
        self.data.products.push(stored.clone());
        self.commit(previous)?;

        tracing::debug!("product inserted");
        Ok(stored)
    }

    fn update(&mut self, id: i64, patch: &ProductPatch) -> Result<Product> {
        let _span = tracing::debug_span!("json_update", product_id = id).entered();

        let index = self.position(id)?;
        let previous = self.data.clone();
        let product = &mut self.data.products[index];
        patch.apply_to(product);
        let updated = product.clone();
        self.commit(previous)?;

        tracing::debug!("product updated");
        Ok(updated)
    }

    fn delete(&mut self, id: i64) -> Result<()> {
        let _span = tracing::debug_span!("json_delete", product_id = id).entered();

        let index = self.position(id)?;
        let previous = self.data.clone();
        self.data.products.remove(index);
        self.commit(previous)?;

        tracing::debug!("product deleted");
        Ok(())
    }

    fn delete_many(&mut self, ids: &[i64]) -> Result<usize> {
        let _span = tracing::debug_span!("json_delete_many", requested = ids.len()).entered();

        let targets: HashSet<i64> = ids.iter().copied().collect();
        let previous = self.data.clone();
        self.data.products.retain(|p| !targets.contains(&p.id));
        let removed = previous.products.len() - self.data.products.len();

        if removed > 0 {
            self.commit(previous)?;
        }

        tracing::debug!(removed, "products deleted");
        Ok(removed)
    }
}

impl Drop for JsonStore {
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty data on drop");
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save on drop");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::open(dir.path().join("products.json")).unwrap();
        (dir, store)
    }

    #[test]
    fn missing_file_opens_empty() {
        let (_dir, mut store) = store();
        assert!(store.list().unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn insert_persists_and_rejects_duplicates() {
        let (dir, mut store) = store();
        store.insert(&NewProduct::from_required(1, "Glasses")).unwrap();

        let err = store.insert(&NewProduct::from_required(1, "Other")).unwrap_err();
        assert!(matches!(err, CatalogError::Storage(_)));

        let mut reopened = JsonStore::open(dir.path().join("products.json")).unwrap();
        let products = reopened.list().unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].product_name, "Glasses");
    }

    #[test]
    fn update_and_delete_missing_product_fail() {
        let (_dir, mut store) = store();
        let patch = ProductPatch::from(&Product::new(9, "Nope"));
        assert!(matches!(store.update(9, &patch), Err(CatalogError::ProductNotFound(9))));
        assert!(matches!(store.delete(9), Err(CatalogError::ProductNotFound(9))));
    }

    #[test]
    fn delete_many_ignores_unknown_ids() {
        let (_dir, mut store) = store();
        for id in 1..=3 {
            store.insert(&NewProduct::from_required(id, format!("Item {id}"))).unwrap();
        }
        assert_eq!(store.delete_many(&[1, 3, 42]).unwrap(), 2);
        let ids: Vec<i64> = store.list().unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn failed_save_leaves_store_unchanged() {
        let (dir, mut store) = store();
        store.insert(&NewProduct::from_required(1, "Glasses")).unwrap();
        std::fs::create_dir(dir.path().join("products.tmp")).unwrap();

        assert!(store.insert(&NewProduct::from_required(7, "Gloves")).is_err());
        let patch = ProductPatch::from(&Product::new(1, "Renamed"));
        assert!(store.update(1, &patch).is_err());
        assert!(store.delete(1).is_err());
        assert!(store.delete_many(&[1]).is_err());

        let products = store.list().unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].product_name, "Glasses");

        drop(store);
        let mut reopened = JsonStore::open(dir.path().join("products.json")).unwrap();
        let ids: Vec<i64> = reopened.list().unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(JsonStore::open(&path), Err(CatalogError::Storage(_))));
    }

    #[test]
    fn duplicate_ids_on_disk_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(
            &path,
            r#"{"version":1,"products":[{"id":1,"product_name":"A"},{"id":1,"product_name":"B"}]}"#,
        )
        .unwrap();
        assert!(matches!(JsonStore::open(&path), Err(CatalogError::Storage(_))));
    }
}
