//! Operator forms and their validation.
//!
//! - [`product_form`]: create/edit form for a single product

pub mod product_form;

pub use product_form::{ProductForm, GENERATED_ID_RANGE};
