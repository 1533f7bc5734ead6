//! Filter parameters and the memoized filtered view.

use super::{filter, EmptyReason, StockMode};
use crate::model::Product;
use crate::remote::RemoteStore;
use crate::store::ProductCollectionStore;

/// Current search text and stock mode.
///
/// The revision moves only when a setter actually changes a value, so setting the same search
/// twice does not invalidate a [`FilteredView`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    search: String,
    mode: StockMode,
    revision: u64,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn mode(&self) -> StockMode {
        self.mode
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if search != self.search {
            self.search = search;
            self.revision += 1;
        }
    }

    pub fn set_mode(&mut self, mode: StockMode) {
        if mode != self.mode {
            self.mode = mode;
            self.revision += 1;
        }
    }

    /// Back to an empty search over all stock levels.
    pub fn reset(&mut self) {
        self.set_search(String::new());
        self.set_mode(StockMode::All);
    }
}

/// Everything a projection was computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ViewKey {
    store: u64,
    revision: u64,
    search: String,
    mode: StockMode,
}

/// The filtered projection of a store, recomputed only when its inputs change.
///
/// The cache is keyed on the store's identity and revision and on the filter's values, so one
/// view may be refreshed against different stores or filter states.
#[derive(Debug, Default)]
pub struct FilteredView {
    key: Option<ViewKey>,
    products: Vec<Product>,
    recomputations: u64,
}

impl FilteredView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Brings the view up to date with `store` and `filter_state` and returns it.
    pub fn refresh<R: RemoteStore>(
        &mut self,
        store: &ProductCollectionStore<R>,
        filter_state: &FilterState,
    ) -> &[Product] {
        // Revision first: a change landing in between only forces one more recomputation.
        let revision = store.revision();
        let fresh = self.key.as_ref().is_some_and(|key| {
            key.store == store.instance_id()
                && key.revision == revision
                && key.search == filter_state.search()
                && key.mode == filter_state.mode()
        });
        if !fresh {
            self.products = store.with_products(|products| {
                filter(products, filter_state.search(), filter_state.mode())
            });
            self.key = Some(ViewKey {
                store: store.instance_id(),
                revision,
                search: filter_state.search().to_owned(),
                mode: filter_state.mode(),
            });
            self.recomputations += 1;
        }
        &self.products
    }

    /// Why the last refreshed view is empty, if it is.
    pub fn empty_reason<R: RemoteStore>(
        &self,
        store: &ProductCollectionStore<R>,
    ) -> Option<EmptyReason> {
        EmptyReason::of(store.len(), self.products.len())
    }

    /// How many times the projection has been recomputed.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }
}
