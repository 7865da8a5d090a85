//! AI-assisted product enrichment.
//!
//! A product is sent to an external service, which answers with a fuller
//! record. The operator reviews a text summary and then saves or discards it.
//! The service is optional: when it is unreachable or misbehaves, a canned mock
//! record is used instead and a warning is surfaced.
//!
//! ```text
//! Product → EnrichmentRequest → Enricher ─ok──→ Live(data)
//!                                   └─err─→ Fallback { mock, reason }
//!                                                 ↓
//!                     format_enrichment (review) → merge_enrichment → ProductPatch
//! ```
//!
//! # Modules
//!
//! - [`messages`]: request payload and response types
//! - [`client`]: [`Enricher`] trait and HTTP implementation
//! - [`mock`]: canned fallback record
//! - [`merge`]: enrichment result to update request
//! - [`format`]: review text

pub mod client;
pub mod format;
pub mod merge;
pub mod messages;
pub mod mock;

pub use client::{Enricher, HttpEnricher};
pub use format::format_enrichment;
pub use merge::merge_enrichment;
pub use messages::{EnrichedProduct, EnrichmentPayload, EnrichmentRequest, EnrichmentResult, NOT_AVAILABLE};
pub use mock::mock_enrichment;
