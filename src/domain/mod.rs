//! Domain layer for the product catalog.
//!
//! Core types with no knowledge of storage backends, HTTP, or rendering.
//!
//! # Organization
//!
//! - [`error`]: Error taxonomy and result alias
//! - [`product`]: Product model plus create and update request shapes
//!
//! # Examples
//!
//! ```
//! use product_hub::domain::{Product, Result};
//!
//! fn load() -> Result<Product> {
//!     Ok(Product::new(1, "Safety Glasses"))
//! }
//! ```

pub mod error;
pub mod product;

pub use error::{CatalogError, Result};
pub use product::{Ingredients, NewProduct, Product, ProductPatch};
