//! Product store abstraction.
//!
//! [`ProductStore`] mirrors the five calls the console makes against the
//! `products` relation. Each call is an isolated request; there is no
//! transaction or batching beyond what [`ProductStore::delete_many`] offers.

use crate::domain::{NewProduct, Product, ProductPatch, Result};

/// Backend holding the `products` relation.
///
/// # Implementations
///
/// - [`crate::storage::JsonStore`]: local JSON file with atomic writes
/// - [`crate::storage::RestStore`]: PostgREST-style HTTP API
pub trait ProductStore: Send {
    /// Returns every product, in the store's natural order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list(&mut self) -> Result<Vec<Product>>;

    /// Inserts a product and returns the stored row.
    ///
    /// # Errors
    ///
    /// Fails if the id is already taken or the write fails.
    fn insert(&mut self, product: &NewProduct) -> Result<Product>;

    /// Overwrites the columns carried by `patch` on product `id`.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::CatalogError::ProductNotFound`] if no such product
    /// exists, or if the write fails.
    fn update(&mut self, id: i64, patch: &ProductPatch) -> Result<Product>;

    /// Deletes product `id`.
    ///
    /// # Errors
    ///
    /// Fails if the write fails. Local stores also fail with
    /// [`crate::CatalogError::ProductNotFound`] when no such product exists;
    /// remote stores treat that case as already deleted.
    fn delete(&mut self, id: i64) -> Result<()>;

    /// Deletes every listed product that exists. Returns how many were removed.
    ///
    /// # Errors
    ///
    /// Fails if the write fails.
    fn delete_many(&mut self, ids: &[i64]) -> Result<usize>;
}

impl<S: ProductStore + ?Sized> ProductStore for Box<S> {
    fn list(&mut self) -> Result<Vec<Product>> {
        (**self).list()
    }

    fn insert(&mut self, product: &NewProduct) -> Result<Product> {
        (**self).insert(product)
    }

    fn update(&mut self, id: i64, patch: &ProductPatch) -> Result<Product> {
        (**self).update(id, patch)
    }

    fn delete(&mut self, id: i64) -> Result<()> {
        (**self).delete(id)
    }

    fn delete_many(&mut self, ids: &[i64]) -> Result<usize> {
        (**self).delete_many(ids)
    }
}
