//! # System Lifecycle
//!
//! Starting and stopping a complete inventory.
//!
//! [`InventorySystem`] spawns the remote store actor, wraps its client in a
//! [`ProductClient`](crate::remote::ProductClient) and builds the
//! [`ProductCollectionStore`](crate::store::ProductCollectionStore) on top of it, all sharing one
//! [`Notifications`](crate::notifications::Notifications) handle.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop the store** - the store owns the only client, so this closes the channel
//! 2. **Actor detects closure** - `receiver.recv()` returns `None`, the actor logs its final size
//! 3. **Await completion** - [`InventorySystem::shutdown`] waits for the actor task
//!
//! ## Observability
//!
//! [`setup_tracing`] installs the subscriber. See the [`tracing`](self::tracing) module.

pub mod inventory_system;
pub mod tracing;

pub use inventory_system::*;
pub use self::tracing::*;
