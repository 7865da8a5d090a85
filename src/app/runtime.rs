//! Action executor driving the event loop.
//!
//! [`Runtime`] owns the state and both collaborators. [`Runtime::dispatch`]
//! runs an event through [`handle_event`], executes the returned actions one at
//! a time, and feeds each completion event back in until nothing is left.
//!
//! ```text
//! dispatch(event) ──→ handle_event ──→ [Action] ──→ execute ──→ completion Event
//!        ↑                                                           │
//!        └───────────────────────────────────────────────────────────┘
//! ```
//!
//! Calls are sequential and never retried. A failing store call becomes an
//! error notification; a handler error (bad form, invalid selection) is
//! reported the same way and leaves the state unchanged.

use super::actions::{Action, Notification, Severity};
use super::handler::{handle_event, Event};
use super::state::CatalogState;
use crate::enrichment::Enricher;
use crate::storage::ProductStore;
use std::collections::VecDeque;

/// Notifications kept for display before the oldest are dropped.
const MAX_NOTIFICATIONS: usize = 50;

/// The console's event loop.
pub struct Runtime<S, E> {
    state: CatalogState,
    store: S,
    enricher: E,
    notifications: VecDeque<Notification>,
}

impl<S: ProductStore, E: Enricher> Runtime<S, E> {
    #[must_use]
    pub fn new(store: S, enricher: E) -> Self {
        Self {
            state: CatalogState::new(),
            store,
            enricher,
            notifications: VecDeque::new(),
        }
    }

    /// Processes `event` and everything it triggers.
    ///
    /// # Returns
    ///
    /// `true` if any step changed what should be on screen.
    pub fn dispatch(&mut self, event: Event) -> bool {
        let mut queue = VecDeque::from([event]);
        let mut render = false;

        while let Some(event) = queue.pop_front() {
            match handle_event(&mut self.state, &event) {
                Ok((changed, actions)) => {
                    render |= changed;
                    for action in actions {
                        if let Some(follow_up) = self.execute(action) {
                            queue.push_back(follow_up);
                        }
                    }
                }
                Err(e) => {
                    tracing::debug!(error = %e, "event rejected");
                    self.notify(Notification::error(e.to_string()));
                    render = true;
                }
            }
        }

        render
    }

    /// Runs one action against the collaborators.
    fn execute(&mut self, action: Action) -> Option<Event> {
        let _span = tracing::debug_span!("execute_action").entered();

        match action {
            Action::FetchProducts => Some(match self.store.list() {
                Ok(products) => Event::ProductsLoaded(products),
                Err(e) => Event::LoadFailed(e.to_string()),
            }),
            Action::InsertProduct(product) => Some(match self.store.insert(&product) {
                Ok(stored) => Event::ProductCreated(stored),
                Err(e) => failed("add product", &e),
            }),
            Action::UpdateProduct { id, patch } => Some(match self.store.update(id, &patch) {
                Ok(updated) => Event::ProductUpdated(updated),
                Err(e) => failed("update product", &e),
            }),
            Action::SaveEnrichment { id, patch } => Some(match self.store.update(id, &patch) {
                Ok(updated) => Event::EnrichmentSaved(updated),
                Err(e) => failed("save enrichment", &e),
            }),
            Action::DeleteProduct(id) => Some(match self.store.delete(id) {
                Ok(()) => Event::ProductDeleted(id),
                Err(e) => failed("delete product", &e),
            }),
            Action::DeleteProducts(ids) => Some(match self.store.delete_many(&ids) {
                Ok(removed) => Event::ProductsDeleted { ids, removed },
                Err(e) => failed("delete products", &e),
            }),
            Action::EnrichProduct(product) => {
                let result = self.enricher.enrich(&product);
                Some(Event::EnrichmentReceived {
                    product_id: product.id,
                    result,
                })
            }
            Action::Notify(notification) => {
                self.notify(notification);
                None
            }
        }
    }

    fn notify(&mut self, notification: Notification) {
        match notification.severity {
            Severity::Success => tracing::info!(message = %notification.message, "notification"),
            Severity::Warning => tracing::warn!(message = %notification.message, "notification"),
            Severity::Error => tracing::error!(message = %notification.message, "notification"),
        }
        if self.notifications.len() == MAX_NOTIFICATIONS {
            self.notifications.pop_front();
        }
        self.notifications.push_back(notification);
    }

    #[must_use]
    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    /// Notifications not yet taken, oldest first.
    pub fn notifications(&self) -> impl Iterator<Item = &Notification> + '_ {
        self.notifications.iter()
    }

    /// Removes and returns all pending notifications.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

fn failed(operation: &'static str, error: &crate::CatalogError) -> Event {
    Event::OperationFailed {
        operation,
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CatalogError, NewProduct, Product, ProductPatch, Result};
    use crate::enrichment::{EnrichedProduct, EnrichmentRequest};

    #[derive(Default)]
    struct MemoryStore {
        products: Vec<Product>,
        fail_writes: bool,
    }

    impl ProductStore for MemoryStore {
        fn list(&mut self) -> Result<Vec<Product>> {
            Ok(self.products.clone())
        }

        fn insert(&mut self, product: &NewProduct) -> Result<Product> {
            if self.fail_writes {
                return Err(CatalogError::Transport("offline".to_string()));
            }
            let product = Product::from(product.clone());
            self.products.push(product.clone());
            Ok(product)
        }

        fn update(&mut self, id: i64, patch: &ProductPatch) -> Result<Product> {
            let product = self
                .products
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or(CatalogError::ProductNotFound(id))?;
            patch.apply_to(product);
            Ok(product.clone())
        }

        fn delete(&mut self, id: i64) -> Result<()> {
            self.products.retain(|p| p.id != id);
            Ok(())
        }

        fn delete_many(&mut self, ids: &[i64]) -> Result<usize> {
            let before = self.products.len();
            self.products.retain(|p| !ids.contains(&p.id));
            Ok(before - self.products.len())
        }
    }

    struct Offline;

    impl Enricher for Offline {
        fn request(&self, _request: &EnrichmentRequest) -> Result<EnrichedProduct> {
            Err(CatalogError::EnrichmentUnavailable("offline".to_string()))
        }
    }

    fn runtime() -> Runtime<MemoryStore, Offline> {
        let store = MemoryStore {
            products: vec![Product::new(1, "Safety Glasses"), Product::new(2, "Goggles")],
            fail_writes: false,
        };
        let mut runtime = Runtime::new(store, Offline);
        runtime.dispatch(Event::Refresh);
        runtime
    }

    #[test]
    fn refresh_loads_products() {
        let runtime = runtime();
        assert_eq!(runtime.state().visible_ids(), vec![1, 2]);
    }

    #[test]
    fn delete_refetches() {
        let mut runtime = runtime();
        runtime.dispatch(Event::DeleteProduct(1));
        assert_eq!(runtime.state().visible_ids(), vec![2]);
        let notes = runtime.take_notifications();
        assert_eq!(notes, vec![Notification::success("Product deleted successfully")]);
    }

    #[test]
    fn store_failure_is_notified() {
        let mut runtime = runtime();
        runtime.store_mut().fail_writes = true;

        let mut form = crate::forms::ProductForm::for_create();
        form.id = "3".to_string();
        form.product_name = "Gloves".to_string();
        runtime.dispatch(Event::CreateProduct(form));

        let notes = runtime.take_notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].severity, Severity::Error);
        assert!(notes[0].message.starts_with("Failed to add product"));
        assert_eq!(runtime.state().visible_count(), 2);
    }

    #[test]
    fn rejected_event_is_notified() {
        let mut runtime = runtime();
        runtime.dispatch(Event::SearchChanged("gog".to_string()));
        assert!(runtime.dispatch(Event::ToggleSelection(1)));
        let notes = runtime.take_notifications();
        assert_eq!(notes[0].severity, Severity::Error);
        assert!(runtime.state().selected_ids().is_empty());
    }

    #[test]
    fn notifications_are_bounded() {
        let mut runtime = runtime();
        for _ in 0..(MAX_NOTIFICATIONS + 5) {
            runtime.dispatch(Event::DiscardEnrichment);
        }
        assert_eq!(runtime.notifications().count(), MAX_NOTIFICATIONS);
    }
}
