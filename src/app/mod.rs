//! Application layer coordinating state, events, and actions.
//!
//! Sits between the console shim (`main.rs`) and the domain, storage and
//! enrichment layers. Everything the operator does flows through here.
//!
//! # Architecture
//!
//! ```text
//! Operator Input → Command → Event → handle_event → State Mutations → Actions
//!                                         ↑                              ↓
//!                                         └──── Completion Events ← Runtime
//! ```
//!
//! # Modules
//!
//! - [`filters`]: search and structured filter predicates
//! - [`vocabulary`]: filter-option derivation
//! - [`state`]: catalog view engine state
//! - [`actions`]: side effects and notifications
//! - [`handler`]: event processing
//! - [`runtime`]: action executor
//! - [`command`]: console line parsing
//!
//! # Example
//!
//! ```rust
//! use product_hub::app::{CatalogState, Event, handle_event};
//! use product_hub::domain::Product;
//!
//! let mut state = CatalogState::new();
//! let products = vec![Product::new(1, "Safety Glasses"), Product::new(2, "Goggles")];
//! handle_event(&mut state, &Event::ProductsLoaded(products))?;
//! handle_event(&mut state, &Event::SearchChanged("glass".to_string()))?;
//! assert_eq!(state.visible_ids(), vec![1]);
//! # Ok::<(), product_hub::CatalogError>(())
//! ```

pub mod actions;
pub mod command;
pub mod filters;
pub mod handler;
pub mod runtime;
pub mod state;
pub mod vocabulary;

pub use actions::{Action, Notification, Severity};
pub use command::{parse_command, Command};
pub use filters::{EnrichmentFilter, FilterCriteria, Selector, WeightRange};
pub use handler::{handle_event, Event};
pub use runtime::Runtime;
pub use state::{CatalogState, PendingEnrichment};
pub use vocabulary::FilterOptions;
