//! PostgREST-style HTTP product store.
//!
//! Talks to the `products` relation of a hosted Postgres service through its
//! REST interface:
//!
//! | Operation | Request |
//! |---|---|
//! | list | `GET /rest/v1/products?select=*` |
//! | insert | `POST /rest/v1/products` |
//! | update | `PATCH /rest/v1/products?id=eq.{id}` |
//! | delete | `DELETE /rest/v1/products?id=eq.{id}` |
//! | delete many | `DELETE /rest/v1/products?id=in.(a,b,c)` |
//!
//! Mutations send `Prefer: return=representation` so the affected rows come
//! back in the response body. Every failure surfaces as
//! [`CatalogError::Transport`].
//!
//! Deleting an id that matches no row succeeds, as it does on the service.

use crate::domain::{CatalogError, NewProduct, Product, ProductPatch, Result};
use crate::storage::backend::ProductStore;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use std::time::Duration;

const TABLE: &str = "products";

/// HTTP product store.
#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    table_url: String,
}

impl RestStore {
    /// Creates a store rooted at `base_url` (the service URL, without
    /// `/rest/v1`). The API key is sent both as `apikey` and as a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] if the key is not a valid header value
    /// or the client cannot be built.
    pub fn new(base_url: &str, api_key: Option<&str>, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(key) = api_key.filter(|k| !k.is_empty()) {
            let apikey = HeaderValue::from_str(key)
                .map_err(|e| CatalogError::Config(format!("invalid API key: {e}")))?;
            let bearer = HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|e| CatalogError::Config(format!("invalid API key: {e}")))?;
            headers.insert("apikey", apikey);
            headers.insert(AUTHORIZATION, bearer);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            table_url: format!("{}/rest/v1/{TABLE}", base_url.trim_end_matches('/')),
        })
    }

    #[must_use]
    pub fn table_url(&self) -> &str {
        &self.table_url
    }

    fn returning(builder: RequestBuilder) -> RequestBuilder {
        builder.header("Prefer", "return=representation")
    }

    /// Sends a request and decodes the returned rows.
    fn rows(builder: RequestBuilder) -> Result<Vec<Product>> {
        let response = builder.send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(CatalogError::Transport(format!("{status}: {}", body.trim())));
        }
        response
            .json::<Vec<Product>>()
            .map_err(|e| CatalogError::Transport(format!("invalid response body: {e}")))
    }

    fn single(rows: Vec<Product>, id: i64) -> Result<Product> {
        rows.into_iter().next().ok_or(CatalogError::ProductNotFound(id))
    }
}

/// Renders `ids` as a PostgREST `in.(…)` filter value.
fn in_filter(ids: &[i64]) -> String {
    let joined = ids.iter().map(i64::to_string).collect::<Vec<_>>().join(",");
    format!("in.({joined})")
}

impl ProductStore for RestStore {
    fn list(&mut self) -> Result<Vec<Product>> {
        let _span = tracing::debug_span!("rest_list").entered();
        let products = Self::rows(self.client.get(&self.table_url).query(&[("select", "*")]))?;
        tracing::debug!(count = products.len(), "listed products");
        Ok(products)
    }

    fn insert(&mut self, product: &NewProduct) -> Result<Product> {
        let _span = tracing::debug_span!("rest_insert", product_id = product.id).entered();
        let rows = Self::rows(Self::returning(self.client.post(&self.table_url)).json(product))?;
        Self::single(rows, product.id)
    }

    fn update(&mut self, id: i64, patch: &ProductPatch) -> Result<Product> {
        let _span = tracing::debug_span!("rest_update", product_id = id).entered();
        let request = Self::returning(self.client.patch(&self.table_url))
            .query(&[("id", format!("eq.{id}"))])
            .json(patch);
        Self::single(Self::rows(request)?, id)
    }

    fn delete(&mut self, id: i64) -> Result<()> {
        let _span = tracing::debug_span!("rest_delete", product_id = id).entered();
        let request = Self::returning(self.client.delete(&self.table_url))
            .query(&[("id", format!("eq.{id}"))]);
        let removed = Self::rows(request)?.len();
        tracing::debug!(removed, "product deleted");
        Ok(())
    }

    fn delete_many(&mut self, ids: &[i64]) -> Result<usize> {
        let _span = tracing::debug_span!("rest_delete_many", requested = ids.len()).entered();
        if ids.is_empty() {
            return Ok(0);
        }
        let request = Self::returning(self.client.delete(&self.table_url))
            .query(&[("id", in_filter(ids))]);
        let removed = Self::rows(request)?.len();
        tracing::debug!(removed, "products deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_url_is_normalized() {
        let store = RestStore::new("https://db.example.com/", Some("key"), Duration::from_secs(5)).unwrap();
        assert_eq!(store.table_url(), "https://db.example.com/rest/v1/products");
    }

    #[test]
    fn in_filter_lists_ids() {
        assert_eq!(in_filter(&[3, 1, 2]), "in.(3,1,2)");
    }

    #[test]
    fn rejects_key_with_newline() {
        let err = RestStore::new("https://db.example.com", Some("bad\nkey"), Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, CatalogError::Config(_)));
    }
}
