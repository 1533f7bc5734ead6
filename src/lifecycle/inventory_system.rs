use crate::config::InventoryConfig;
use crate::notifications::Notifications;
use crate::remote::{self, ProductClient};
use crate::store::ProductCollectionStore;
use tracing::{error, info};

/// A running inventory: the remote product store and the local collection synced with it.
///
/// # Example
///
/// ```rust
/// use inventory_sync::config::InventoryConfig;
/// use inventory_sync::lifecycle::InventorySystem;
///
/// #[tokio::main]
/// async fn main() -> Result<(), String> {
///     let system = InventorySystem::new(&InventoryConfig::default());
///     system.store.load().await.map_err(|e| e.to_string())?;
///     system.store.add("Widget", 3).await.map_err(|e| e.to_string())?;
///     assert_eq!(system.store.len(), 1);
///     system.shutdown().await
/// }
/// ```
pub struct InventorySystem {
    /// The local collection, backed by the spawned remote store.
    pub store: ProductCollectionStore<ProductClient>,

    /// Task running the remote store actor.
    handle: tokio::task::JoinHandle<()>,
}

impl InventorySystem {
    /// Spawns the remote store and wires a collection store to it.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: &InventoryConfig) -> Self {
        let (actor, client) = remote::new(config.remote.buffer_size);
        let handle = tokio::spawn(actor.run());

        let notifications = Notifications::new(config.notifications.display_for());
        let store = ProductCollectionStore::new(client, notifications);

        Self { store, handle }
    }

    /// Shared handle to the messages the store posts.
    pub fn notifications(&self) -> Notifications {
        self.store.notifications().clone()
    }

    /// Closes the remote store channel and waits for the actor to finish.
    ///
    /// Fails if the actor task panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down inventory...");

        // Dropping the store drops the only client, which ends the actor's loop.
        drop(self.store);

        if let Err(e) = self.handle.await {
            error!("Remote store task failed: {:?}", e);
            return Err(format!("Remote store task failed: {:?}", e));
        }

        info!("Inventory shutdown complete.");
        Ok(())
    }
}
