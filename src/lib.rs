//! # Inventory Sync
//!
//! A client-side inventory manager: a local product collection kept in sync with a remote CRUD
//! store, with search and stock filtering over it and a confirmation step before anything is
//! deleted.
//!
//! ## Core Components
//!
//! - **[model]**: [`Product`](model::Product), its writable [`ProductFields`](model::ProductFields)
//!   and stock classification.
//! - **[remote]**: the [`RemoteStore`](remote::RemoteStore) contract and
//!   [`ProductClient`](remote::ProductClient), its implementation over the `remote-store` actor.
//! - **[store]**: [`ProductCollectionStore`](store::ProductCollectionStore), the single owner of
//!   the local collection.
//! - **[filter]**: the pure [`filter`](filter::filter) function, statistics and the memoized
//!   [`FilteredView`](filter::FilteredView).
//! - **[deletion]** and **[form]**: the two state holders that issue mutations.
//! - **[notifications]**: transient success and error messages.
//! - **[config]** and **[lifecycle]**: configuration, tracing setup and the running
//!   [`InventorySystem`](lifecycle::InventorySystem).
//!
//! ## Quick Start
//!
//! ```rust
//! use inventory_sync::config::InventoryConfig;
//! use inventory_sync::deletion::DeletionWorkflow;
//! use inventory_sync::filter::{FilterState, FilteredView, StockMode};
//! use inventory_sync::form::FormController;
//! use inventory_sync::lifecycle::InventorySystem;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let system = InventorySystem::new(&InventoryConfig::default());
//!     system.store.load().await?;
//!
//!     let mut form = FormController::new();
//!     form.set_name("Hex bolt");
//!     form.set_quantity("4");
//!     let bolt = form.submit(&system.store).await?;
//!
//!     let mut filter = FilterState::new();
//!     filter.set_mode(StockMode::Low);
//!     let mut view = FilteredView::new();
//!     assert_eq!(view.refresh(&system.store, &filter), &[bolt.clone()]);
//!
//!     let mut deletion = DeletionWorkflow::new();
//!     deletion.request(bolt);
//!     deletion.confirm(&system.store).await?;
//!     assert!(system.store.is_empty());
//!
//!     system.shutdown().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Testing
//!
//! See [`remote_store::mock`] for driving the store against scripted or hand-answered remote
//! replies without spawning the real actor.

pub mod config;
pub mod deletion;
pub mod error;
pub mod filter;
pub mod form;
pub mod lifecycle;
pub mod model;
pub mod notifications;
pub mod remote;
pub mod store;

pub use error::InventoryError;
