//! # Product Collection Store
//!
//! The single owner of the local product list. Every change to the list goes through a remote
//! round-trip first and is applied locally only once the remote store has confirmed it, so the
//! collection is never left half-mutated by a failed call.
//!
//! ## Concurrency
//!
//! All operations take `&self` and may run concurrently. State lives behind a
//! [`parking_lot::Mutex`] that is only ever locked between awaits.
//!
//! - Mutations on the same product are serialized by a pending-id set: while an update or removal
//!   of a product is in flight, another one for the same id fails with
//!   [`InventoryError::Conflict`].
//! - Loads are numbered. Only the most recently issued load may replace the collection; an older
//!   one that settles later is reported as [`LoadOutcome::Superseded`] and dropped.
//! - Mutations confirmed while a load is in flight are journaled and replayed onto the snapshot
//!   when it is applied, so a product removed (or added, or edited) during the round-trip does
//!   not come back (or vanish, or revert) when a snapshot taken earlier arrives.
//!
//! ## Reporting
//!
//! Besides returning a `Result`, every operation posts a transient message to the shared
//! [`Notifications`] handle and logs the outcome.

mod pending;

use crate::error::InventoryError;
use crate::filter::InventoryStats;
use crate::model::{Product, ProductFields, ProductId};
use crate::notifications::{self, Notifications};
use crate::remote::RemoteStore;
use parking_lot::Mutex;
use pending::PendingGuard;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

/// How a [`ProductCollectionStore::load`] call settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The fetched products replaced the collection.
    Applied { count: usize },
    /// A newer load was issued before this one settled; its result was discarded.
    Superseded,
}

#[derive(Debug, Clone, Copy)]
enum Operation {
    Load,
    Add,
    Update,
    Remove,
}

impl Operation {
    fn failure_message(self) -> &'static str {
        match self {
            Operation::Load => notifications::LOAD_FAILED,
            Operation::Add => notifications::ADD_FAILED,
            Operation::Update => notifications::UPDATE_FAILED,
            Operation::Remove => notifications::REMOVE_FAILED,
        }
    }
}

/// A mutation the remote store has confirmed.
#[derive(Debug, Clone)]
enum Settled {
    Added(Product),
    Updated(ProductId, ProductFields),
    Removed(ProductId),
}

impl Settled {
    /// Applies the change to `products`. Returns whether anything changed.
    fn apply_to(&self, products: &mut Vec<Product>) -> bool {
        match self {
            Settled::Added(product) => {
                match products.iter().position(|p| p.id == product.id) {
                    Some(index) => products[index] = product.clone(),
                    None => products.insert(0, product.clone()),
                }
                true
            }
            Settled::Updated(id, fields) => match products.iter_mut().find(|p| &p.id == id) {
                Some(product) => {
                    product.set_fields(fields.clone());
                    true
                }
                None => false,
            },
            Settled::Removed(id) => {
                let before = products.len();
                products.retain(|p| &p.id != id);
                products.len() != before
            }
        }
    }
}

#[derive(Debug, Default)]
struct StoreState {
    products: Vec<Product>,
    revision: u64,
    pending: HashSet<ProductId>,
    loads_issued: u64,
    loading: bool,
    /// Number of mutations confirmed so far.
    settled: u64,
    /// Mutations confirmed while a load was in flight, tagged with their sequence number.
    journal: Vec<(u64, Settled)>,
}

impl StoreState {
    fn position(&self, id: &ProductId) -> Option<usize> {
        self.products.iter().position(|p| &p.id == id)
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    /// Applies a confirmed mutation and journals it for the load in flight, if any.
    fn settle(&mut self, change: Settled) {
        self.settled += 1;
        if change.apply_to(&mut self.products) {
            self.touch();
        }
        if self.loading {
            self.journal.push((self.settled, change));
        }
    }

    /// Entries confirmed after `mark`. Empties the journal.
    fn drain_journal_since(&mut self, mark: u64) -> Vec<Settled> {
        self.journal
            .drain(..)
            .filter(|(seq, _)| *seq > mark)
            .map(|(_, change)| change)
            .collect()
    }
}

static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

/// The canonical local product collection, kept in sync with a [`RemoteStore`].
pub struct ProductCollectionStore<R: RemoteStore> {
    instance_id: u64,
    remote: R,
    state: Mutex<StoreState>,
    notifications: Notifications,
}

impl<R: RemoteStore> ProductCollectionStore<R> {
    pub fn new(remote: R, notifications: Notifications) -> Self {
        Self {
            instance_id: NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed),
            remote,
            state: Mutex::new(StoreState::default()),
            notifications,
        }
    }

    /// Replaces the collection with the remote store's contents, newest product first.
    ///
    /// On failure the previous collection is kept.
    pub async fn load(&self) -> Result<LoadOutcome, InventoryError> {
        let (generation, mark) = {
            let mut state = self.state.lock();
            state.loads_issued += 1;
            state.loading = true;
            (state.loads_issued, state.settled)
        };

        let result = self.remote.list().await;

        let mut state = self.state.lock();
        if generation != state.loads_issued {
            debug!(
                generation,
                latest = state.loads_issued,
                "Discarding stale load result"
            );
            return Ok(LoadOutcome::Superseded);
        }
        state.loading = false;
        let confirmed_since = state.drain_journal_since(mark);

        match result {
            Ok(mut products) => {
                products.sort_by(|a, b| b.id.cmp(&a.id));
                products.dedup_by(|a, b| a.id == b.id);
                for change in &confirmed_since {
                    change.apply_to(&mut products);
                }
                if !confirmed_since.is_empty() {
                    debug!(
                        replayed = confirmed_since.len(),
                        "Replayed mutations confirmed during load"
                    );
                }
                let count = products.len();
                state.products = products;
                state.touch();
                drop(state);
                info!(count, "Products loaded");
                Ok(LoadOutcome::Applied { count })
            }
            Err(e) => {
                drop(state);
                Err(self.report(Operation::Load, e.into()))
            }
        }
    }

    /// Creates a product remotely and puts the stored record at the head of the collection.
    pub async fn add(&self, name: &str, quantity: i64) -> Result<Product, InventoryError> {
        let fields = self.validate(Operation::Add, name, quantity)?;

        let product = self
            .remote
            .create(fields)
            .await
            .map_err(|e| self.report(Operation::Add, e.into()))?;

        self.state.lock().settle(Settled::Added(product.clone()));

        info!(product_id = %product.id, "Product added");
        self.notifications.success(notifications::ADDED);
        Ok(product)
    }

    /// Overwrites the name and quantity of `id`, keeping its position in the collection.
    ///
    /// The remote store is asked even if `id` is missing locally; in that case the call fails
    /// with [`InventoryError::NotFound`] after the remote update.
    pub async fn update(
        &self,
        id: &ProductId,
        name: &str,
        quantity: i64,
    ) -> Result<Product, InventoryError> {
        let fields = self.validate(Operation::Update, name, quantity)?;
        let _pending = PendingGuard::acquire(&self.state, id)
            .map_err(|e| self.report(Operation::Update, e))?;

        self.remote
            .update(id.clone(), fields.clone())
            .await
            .map_err(|e| self.report(Operation::Update, e.into()))?;

        let updated = {
            let mut state = self.state.lock();
            state.settle(Settled::Updated(id.clone(), fields));
            state.position(id).map(|index| state.products[index].clone())
        };

        match updated {
            Some(product) => {
                info!(product_id = %id, "Product updated");
                self.notifications.success(notifications::UPDATED);
                Ok(product)
            }
            None => Err(self.report(Operation::Update, InventoryError::NotFound(id.clone()))),
        }
    }

    /// Deletes `id` remotely, then drops it from the collection.
    ///
    /// Only reachable through [`DeletionWorkflow`](crate::deletion::DeletionWorkflow).
    pub(crate) async fn remove(&self, id: &ProductId) -> Result<(), InventoryError> {
        let _pending = PendingGuard::acquire(&self.state, id)
            .map_err(|e| self.report(Operation::Remove, e))?;

        self.remote
            .delete(id.clone())
            .await
            .map_err(|e| self.report(Operation::Remove, e.into()))?;

        self.state.lock().settle(Settled::Removed(id.clone()));

        info!(product_id = %id, "Product removed");
        self.notifications.success(notifications::REMOVED);
        Ok(())
    }

    /// Snapshot of the collection.
    pub fn products(&self) -> Vec<Product> {
        self.state.lock().products.clone()
    }

    /// Runs `f` against the collection without copying it.
    ///
    /// `f` must not call back into the store.
    pub fn with_products<O>(&self, f: impl FnOnce(&[Product]) -> O) -> O {
        f(&self.state.lock().products)
    }

    pub fn get(&self, id: &ProductId) -> Option<Product> {
        let state = self.state.lock();
        state.position(id).map(|index| state.products[index].clone())
    }

    pub fn len(&self) -> usize {
        self.state.lock().products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().products.is_empty()
    }

    /// True while the most recently issued load has not settled.
    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }

    /// True while an update or removal of `id` is in flight.
    pub fn is_pending(&self, id: &ProductId) -> bool {
        self.state.lock().pending.contains(id)
    }

    /// Incremented on every change to the collection.
    pub fn revision(&self) -> u64 {
        self.state.lock().revision
    }

    /// Distinguishes this store from every other one in the process.
    ///
    /// Revisions are per store, so a cache keyed on [`revision`](Self::revision) must key on this
    /// too.
    pub fn instance_id(&self) -> u64 {
        self.instance_id
    }

    /// Stock counts over the whole collection, ignoring any filter.
    pub fn stats(&self) -> InventoryStats {
        self.with_products(InventoryStats::of)
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    fn validate(
        &self,
        operation: Operation,
        name: &str,
        quantity: i64,
    ) -> Result<ProductFields, InventoryError> {
        ProductFields::validate(name, quantity).map_err(|e| self.report(operation, e))
    }

    fn report(&self, operation: Operation, error: InventoryError) -> InventoryError {
        warn!(?operation, error = %error, "Inventory operation failed");
        let message = match &error {
            InventoryError::Validation(_) => notifications::INVALID_INPUT,
            _ => operation.failure_message(),
        };
        self.notifications.error(message);
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::ProductClient;
    use remote_store::mock::{
        create_mock_client, expect_create, expect_delete, expect_list, expect_update, MockClient,
    };
    use remote_store::{StoreError, StoreRequest};
    use std::sync::Arc;
    use tokio::sync::mpsc;

    type TestStore = ProductCollectionStore<ProductClient>;

    fn scripted() -> (MockClient<Product>, TestStore) {
        let mock = MockClient::<Product>::new();
        let store = ProductCollectionStore::new(
            ProductClient::new(mock.client()),
            Notifications::default(),
        );
        (mock, store)
    }

    /// A store wired to a manual mock, already loaded with `products`.
    async fn seeded(
        products: Vec<Product>,
    ) -> (Arc<TestStore>, mpsc::Receiver<StoreRequest<Product>>) {
        let (client, mut requests) = create_mock_client::<Product>(10);
        let store = Arc::new(ProductCollectionStore::new(
            ProductClient::new(client),
            Notifications::default(),
        ));

        let loading = tokio::spawn({
            let store = store.clone();
            async move { store.load().await }
        });
        expect_list(&mut requests)
            .await
            .expect("Expected List request")
            .send(Ok(products))
            .unwrap();
        loading.await.unwrap().unwrap();

        (store, requests)
    }

    #[tokio::test]
    async fn test_load_orders_newest_first() {
        let (mut mock, store) = scripted();
        mock.expect_list().return_ok(vec![
            Product::new(1, "A", 1),
            Product::new(3, "C", 3),
            Product::new(2, "B", 2),
        ]);

        assert!(!store.is_loading());
        let outcome = store.load().await.unwrap();
        assert_eq!(outcome, LoadOutcome::Applied { count: 3 });
        assert!(!store.is_loading());

        let ids: Vec<u32> = store.products().iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        mock.verify();
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_collection() {
        let (mut mock, store) = scripted();
        mock.expect_list().return_ok(vec![Product::new(1, "A", 1)]);
        mock.expect_list().return_err(StoreError::Closed);

        store.load().await.unwrap();
        let revision = store.revision();

        let result = store.load().await;
        assert!(matches!(result, Err(InventoryError::Remote(_))));
        assert_eq!(store.products(), vec![Product::new(1, "A", 1)]);
        assert_eq!(store.revision(), revision);
        assert!(!store.is_loading());
        assert_eq!(
            store.notifications().current_error().as_deref(),
            Some(notifications::LOAD_FAILED)
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_stale_load_is_discarded() {
        let (client, mut requests) = create_mock_client::<Product>(10);
        let store = Arc::new(ProductCollectionStore::new(
            ProductClient::new(client),
            Notifications::default(),
        ));

        let first = tokio::spawn({
            let store = store.clone();
            async move { store.load().await }
        });
        let first_reply = expect_list(&mut requests).await.unwrap();

        let second = tokio::spawn({
            let store = store.clone();
            async move { store.load().await }
        });
        let second_reply = expect_list(&mut requests).await.unwrap();
        assert!(store.is_loading());

        second_reply.send(Ok(vec![Product::new(2, "New", 5)])).unwrap();
        assert_eq!(
            second.await.unwrap().unwrap(),
            LoadOutcome::Applied { count: 1 }
        );
        assert!(!store.is_loading());

        first_reply.send(Ok(vec![Product::new(1, "Old", 5)])).unwrap();
        assert_eq!(first.await.unwrap().unwrap(), LoadOutcome::Superseded);
        assert_eq!(store.products(), vec![Product::new(2, "New", 5)]);
    }

    #[tokio::test]
    async fn test_stale_load_failure_is_not_reported() {
        let (client, mut requests) = create_mock_client::<Product>(10);
        let store = Arc::new(ProductCollectionStore::new(
            ProductClient::new(client),
            Notifications::default(),
        ));

        let first = tokio::spawn({
            let store = store.clone();
            async move { store.load().await }
        });
        let first_reply = expect_list(&mut requests).await.unwrap();
        let second = tokio::spawn({
            let store = store.clone();
            async move { store.load().await }
        });
        let second_reply = expect_list(&mut requests).await.unwrap();

        first_reply.send(Err(StoreError::Dropped)).unwrap();
        assert_eq!(first.await.unwrap().unwrap(), LoadOutcome::Superseded);
        assert_eq!(store.notifications().current_error(), None);
        assert!(store.is_loading());

        second_reply.send(Ok(Vec::new())).unwrap();
        second.await.unwrap().unwrap();
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_add_prepends_remote_record() {
        let (mut mock, store) = scripted();
        mock.expect_list().return_ok(vec![Product::new(1, "Old", 3)]);
        mock.expect_create().return_ok(Product::new(2, "Widget", 12));

        store.load().await.unwrap();
        let created = store.add("  Widget ", 12).await.unwrap();

        assert_eq!(created, Product::new(2, "Widget", 12));
        assert_eq!(
            store.products(),
            vec![Product::new(2, "Widget", 12), Product::new(1, "Old", 3)]
        );
        assert_eq!(
            store.notifications().current_success().as_deref(),
            Some(notifications::ADDED)
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_add_failure_leaves_collection_unchanged() {
        let (mut mock, store) = scripted();
        mock.expect_create().return_err(StoreError::Closed);

        let result = store.add("Widget", 1).await;
        assert!(matches!(result, Err(InventoryError::Remote(_))));
        assert!(store.is_empty());
        assert_eq!(store.revision(), 0);
        assert_eq!(
            store.notifications().current_error().as_deref(),
            Some(notifications::ADD_FAILED)
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_remote() {
        let (mock, store) = scripted();

        assert!(matches!(
            store.add("   ", 3).await,
            Err(InventoryError::Validation(_))
        ));
        assert!(matches!(
            store.add("Widget", -1).await,
            Err(InventoryError::Validation(_))
        ));
        assert!(matches!(
            store.update(&ProductId(1), "", 1).await,
            Err(InventoryError::Validation(_))
        ));

        assert_eq!(mock.request_count(), 0);
        assert_eq!(
            store.notifications().current_error().as_deref(),
            Some(notifications::INVALID_INPUT)
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_update_replaces_in_place() {
        let (mut mock, store) = scripted();
        mock.expect_list().return_ok(vec![
            Product::new(3, "C", 30),
            Product::new(2, "B", 20),
            Product::new(1, "A", 10),
        ]);
        mock.expect_update(ProductId(2)).return_ok(());

        store.load().await.unwrap();
        let updated = store.update(&ProductId(2), " Bee ", 4).await.unwrap();

        assert_eq!(updated, Product::new(2, "Bee", 4));
        assert_eq!(
            store.products(),
            vec![
                Product::new(3, "C", 30),
                Product::new(2, "Bee", 4),
                Product::new(1, "A", 10),
            ]
        );
        assert!(!store.is_pending(&ProductId(2)));
        mock.verify();
    }

    #[tokio::test]
    async fn test_update_of_unknown_id_still_asks_remote() {
        let (mut mock, store) = scripted();
        mock.expect_update(ProductId(9)).return_ok(());

        let result = store.update(&ProductId(9), "Ghost", 1).await;
        assert_eq!(result, Err(InventoryError::NotFound(ProductId(9))));
        assert_eq!(mock.request_count(), 1);
        mock.verify();
    }

    #[tokio::test]
    async fn test_concurrent_update_on_same_id_conflicts() {
        let (store, mut requests) = seeded(vec![Product::new(1, "A", 1)]).await;

        let first = tokio::spawn({
            let store = store.clone();
            async move { store.update(&ProductId(1), "First", 2).await }
        });
        let (id, fields, responder) = expect_update(&mut requests)
            .await
            .expect("Expected Update request");
        assert_eq!(id, ProductId(1));
        assert_eq!(fields.name, "First");
        assert!(store.is_pending(&ProductId(1)));

        let second = store.update(&ProductId(1), "Second", 3).await;
        assert_eq!(second, Err(InventoryError::Conflict(ProductId(1))));

        responder.send(Ok(())).unwrap();
        first.await.unwrap().unwrap();
        assert_eq!(store.get(&ProductId(1)), Some(Product::new(1, "First", 2)));
        assert!(!store.is_pending(&ProductId(1)));
    }

    #[tokio::test]
    async fn test_remove_while_update_in_flight_conflicts() {
        let (store, mut requests) = seeded(vec![Product::new(1, "A", 1)]).await;

        let updating = tokio::spawn({
            let store = store.clone();
            async move { store.update(&ProductId(1), "A2", 2).await }
        });
        let (_, _, responder) = expect_update(&mut requests).await.unwrap();

        assert_eq!(
            store.remove(&ProductId(1)).await,
            Err(InventoryError::Conflict(ProductId(1)))
        );
        assert_eq!(
            store.notifications().current_error().as_deref(),
            Some(notifications::REMOVE_FAILED)
        );
        assert!(requests.try_recv().is_err());

        responder.send(Ok(())).unwrap();
        updating.await.unwrap().unwrap();
        assert_eq!(store.products(), vec![Product::new(1, "A2", 2)]);
        assert!(!store.is_pending(&ProductId(1)));
    }

    #[tokio::test]
    async fn test_mutations_on_different_ids_overlap() {
        let (store, mut requests) =
            seeded(vec![Product::new(2, "B", 1), Product::new(1, "A", 1)]).await;

        let first = tokio::spawn({
            let store = store.clone();
            async move { store.update(&ProductId(1), "A2", 5).await }
        });
        let (_, _, first_reply) = expect_update(&mut requests).await.unwrap();

        let second = tokio::spawn({
            let store = store.clone();
            async move { store.update(&ProductId(2), "B2", 6).await }
        });
        let (_, _, second_reply) = expect_update(&mut requests).await.unwrap();

        second_reply.send(Ok(())).unwrap();
        first_reply.send(Ok(())).unwrap();
        second.await.unwrap().unwrap();
        first.await.unwrap().unwrap();

        assert_eq!(
            store.products(),
            vec![Product::new(2, "B2", 6), Product::new(1, "A2", 5)]
        );
    }

    #[tokio::test]
    async fn test_remove_failure_retains_entry() {
        let (store, mut requests) = seeded(vec![Product::new(1, "A", 1)]).await;

        let removing = tokio::spawn({
            let store = store.clone();
            async move { store.remove(&ProductId(1)).await }
        });
        let (id, responder) = expect_delete(&mut requests).await.unwrap();
        responder
            .send(Err(StoreError::NotFound(id.to_string())))
            .unwrap();

        assert!(matches!(
            removing.await.unwrap(),
            Err(InventoryError::Remote(_))
        ));
        assert_eq!(store.products(), vec![Product::new(1, "A", 1)]);
        assert_eq!(
            store.notifications().current_error().as_deref(),
            Some(notifications::REMOVE_FAILED)
        );
    }

    #[tokio::test]
    async fn test_remove_drops_entry_after_remote_success() {
        let (mut mock, store) = scripted();
        mock.expect_list()
            .return_ok(vec![Product::new(2, "B", 0), Product::new(1, "A", 15)]);
        mock.expect_delete(ProductId(2)).return_ok(());

        store.load().await.unwrap();
        store.remove(&ProductId(2)).await.unwrap();

        assert_eq!(store.products(), vec![Product::new(1, "A", 15)]);
        assert_eq!(
            store.notifications().current_success().as_deref(),
            Some(notifications::REMOVED)
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_remove_during_load_is_not_undone_by_snapshot() {
        let (store, mut requests) =
            seeded(vec![Product::new(2, "B", 1), Product::new(1, "A", 1)]).await;

        let loading = tokio::spawn({
            let store = store.clone();
            async move { store.load().await }
        });
        let list_reply = expect_list(&mut requests).await.unwrap();

        let removing = tokio::spawn({
            let store = store.clone();
            async move { store.remove(&ProductId(2)).await }
        });
        let (_, delete_reply) = expect_delete(&mut requests).await.unwrap();
        delete_reply.send(Ok(())).unwrap();
        removing.await.unwrap().unwrap();
        assert_eq!(store.products(), vec![Product::new(1, "A", 1)]);

        // Taken before the delete reached the remote store.
        list_reply
            .send(Ok(vec![Product::new(2, "B", 1), Product::new(1, "A", 1)]))
            .unwrap();
        assert_eq!(
            loading.await.unwrap().unwrap(),
            LoadOutcome::Applied { count: 1 }
        );
        assert_eq!(store.products(), vec![Product::new(1, "A", 1)]);
    }

    #[tokio::test]
    async fn test_add_during_load_survives_snapshot() {
        let (store, mut requests) = seeded(vec![Product::new(1, "A", 1)]).await;

        let loading = tokio::spawn({
            let store = store.clone();
            async move { store.load().await }
        });
        let list_reply = expect_list(&mut requests).await.unwrap();

        let adding = tokio::spawn({
            let store = store.clone();
            async move { store.add("New", 5).await }
        });
        let (fields, create_reply) = expect_create(&mut requests).await.unwrap();
        assert_eq!(fields.name, "New");
        create_reply.send(Ok(Product::new(2, "New", 5))).unwrap();
        adding.await.unwrap().unwrap();

        list_reply.send(Ok(vec![Product::new(1, "A", 1)])).unwrap();
        assert_eq!(
            loading.await.unwrap().unwrap(),
            LoadOutcome::Applied { count: 2 }
        );
        assert_eq!(
            store.products(),
            vec![Product::new(2, "New", 5), Product::new(1, "A", 1)]
        );
    }

    #[tokio::test]
    async fn test_update_during_load_keeps_new_values() {
        let (store, mut requests) = seeded(vec![Product::new(1, "A", 1)]).await;

        let loading = tokio::spawn({
            let store = store.clone();
            async move { store.load().await }
        });
        let list_reply = expect_list(&mut requests).await.unwrap();

        let updating = tokio::spawn({
            let store = store.clone();
            async move { store.update(&ProductId(1), "A2", 9).await }
        });
        let (_, _, update_reply) = expect_update(&mut requests).await.unwrap();
        update_reply.send(Ok(())).unwrap();
        updating.await.unwrap().unwrap();

        list_reply.send(Ok(vec![Product::new(1, "A", 1)])).unwrap();
        loading.await.unwrap().unwrap();
        assert_eq!(store.products(), vec![Product::new(1, "A2", 9)]);
    }

    #[tokio::test]
    async fn test_mutations_before_load_are_not_replayed() {
        let (store, mut requests) = seeded(vec![Product::new(1, "A", 1)]).await;

        let adding = tokio::spawn({
            let store = store.clone();
            async move { store.add("New", 5).await }
        });
        let (_, create_reply) = expect_create(&mut requests).await.unwrap();
        create_reply.send(Ok(Product::new(2, "New", 5))).unwrap();
        adding.await.unwrap().unwrap();

        // Deleted elsewhere before this load was issued.
        let loading = tokio::spawn({
            let store = store.clone();
            async move { store.load().await }
        });
        expect_list(&mut requests)
            .await
            .unwrap()
            .send(Ok(vec![Product::new(1, "A", 1)]))
            .unwrap();
        loading.await.unwrap().unwrap();
        assert_eq!(store.products(), vec![Product::new(1, "A", 1)]);
    }

    #[tokio::test]
    async fn test_stats_count_whole_collection() {
        let (mut mock, store) = scripted();
        mock.expect_list().return_ok(vec![
            Product::new(4, "D", 0),
            Product::new(3, "C", 5),
            Product::new(2, "B", 10),
            Product::new(1, "A", 80),
        ]);

        store.load().await.unwrap();
        let stats = store.stats();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.regular, 2);
        assert_eq!(stats.low, 1);
        assert_eq!(stats.out_of_stock, 1);
    }
}
