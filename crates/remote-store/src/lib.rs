//! # Remote Store
//!
//! A small CRUD service for a single record type, served by a Tokio actor.
//!
//! The inventory client treats its persistence backend as an opaque service that can list,
//! create, update and delete records. This crate is that service for tests, demos and local use:
//! a [`StoreActor`] owns the records and answers requests one at a time, and a cloneable
//! [`StoreClient`] sends it requests over a channel.
//!
//! ## Architecture Overview
//!
//! 1. **Record Layer** ([`StoreRecord`]) - what a record looks like and which writes it accepts
//! 2. **Runtime Layer** ([`StoreActor`]) - request loop, id assignment, ordering
//! 3. **Interface Layer** ([`StoreClient`]) - async request/response calls
//!
//! ## Example
//!
//! ```rust
//! use remote_store::{StoreActor, StoreRecord};
//!
//! #[derive(Clone, Debug)]
//! struct Note { id: u32, text: String }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("empty note")]
//! struct EmptyNote;
//!
//! impl StoreRecord for Note {
//!     type Id = u32;
//!     type Fields = String;
//!     type Error = EmptyNote;
//!
//!     fn from_fields(id: u32, text: String) -> Result<Self, EmptyNote> {
//!         Ok(Self { id, text })
//!     }
//!
//!     fn on_create(&mut self) -> Result<(), EmptyNote> {
//!         if self.text.is_empty() { Err(EmptyNote) } else { Ok(()) }
//!     }
//!
//!     fn apply(&mut self, text: String) -> Result<(), EmptyNote> {
//!         self.text = text;
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = StoreActor::<Note>::new(10);
//!     tokio::spawn(actor.run());
//!
//!     let first = client.create("first".into()).await.unwrap();
//!     let second = client.create("second".into()).await.unwrap();
//!     assert_eq!((first.id, second.id), (1, 2));
//!
//!     // Newest first.
//!     let listed = client.list().await.unwrap();
//!     assert_eq!(listed[0].text, "second");
//!
//!     assert!(client.create(String::new()).await.is_err());
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - The actor runs in its own Tokio task and handles requests sequentially.
//! - Any number of clients may have requests in flight; replies arrive on per-request oneshot
//!   channels, so completion order across clients is up to the scheduler.
//! - Dropping every client closes the channel and ends the actor loop.
//!
//! ## Testing
//!
//! The [`mock`] module replaces the actor with scripted replies or with responders the test
//! holds on to.

pub mod actor;
pub mod client;
pub mod error;
pub mod message;
pub mod mock;
pub mod record;

pub use actor::StoreActor;
pub use client::StoreClient;
pub use error::StoreError;
pub use message::{Response, StoreRequest};
pub use record::StoreRecord;
