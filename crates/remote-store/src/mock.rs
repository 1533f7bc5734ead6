//! # Mock Store & Testing Guide
//!
//! Utilities for testing code that talks to a [`StoreClient`] without running a real
//! [`StoreActor`](crate::StoreActor).
//!
//! ## When to use which
//!
//! | | [`MockClient`] | [`create_mock_client`] + `expect_*` | Real `StoreActor` |
//! |---|---|---|---|
//! | **Replies** | Scripted up front | Sent by the test, whenever it likes | Real state |
//! | **Ordering control** | FIFO, immediate | Full (hold a responder, answer later) | Scheduler |
//! | **Error injection** | `return_err` | Send any `Err` | Only via record hooks |
//! | **Use case** | Straight-line client logic | In-flight / racing requests | End-to-end |
//!
//! ## Scripted replies
//!
//! ```rust
//! use remote_store::mock::MockClient;
//! use remote_store::{StoreError, StoreRecord};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Note { id: u32, text: String }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("note error")]
//! struct NoteError;
//!
//! impl StoreRecord for Note {
//!     type Id = u32;
//!     type Fields = String;
//!     type Error = NoteError;
//!     fn from_fields(id: u32, text: String) -> Result<Self, NoteError> { Ok(Self { id, text }) }
//!     fn apply(&mut self, text: String) -> Result<(), NoteError> { self.text = text; Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Note>::new();
//!     mock.expect_create().return_ok(Note { id: 7, text: "hi".into() });
//!     mock.expect_delete(7).return_err(StoreError::Closed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.create("hi".into()).await.unwrap().id, 7);
//!     assert!(matches!(client.delete(7).await, Err(StoreError::Closed)));
//!
//!     mock.verify();
//! }
//! ```
//!
//! ## Holding a request in flight
//!
//! [`create_mock_client`] hands the receiving end of the channel to the test. The `expect_*`
//! helpers pull the next request and return its payload together with the responder, so the
//! test decides when (and whether) the caller gets an answer:
//!
//! ```rust,ignore
//! let (client, mut requests) = create_mock_client::<Product>(10);
//! let pending = tokio::spawn(async move { client.update(ProductId(1), fields).await });
//! let (id, fields, responder) = expect_update(&mut requests).await.unwrap();
//! // ... the update is now in flight; poke at the caller here ...
//! responder.send(Ok(())).unwrap();
//! ```

use crate::client::StoreClient;
use crate::error::StoreError;
use crate::message::{Response, StoreRequest};
use crate::record::StoreRecord;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// A scripted reply for the next request the mock receives.
enum Expectation<T: StoreRecord> {
    List {
        response: Result<Vec<T>, StoreError>,
    },
    Create {
        response: Result<T, StoreError>,
    },
    Update {
        id: T::Id,
        response: Result<(), StoreError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), StoreError>,
    },
}

struct MockState<T: StoreRecord> {
    expectations: VecDeque<Expectation<T>>,
    failures: Vec<String>,
}

/// A mock store that answers requests from a queue of scripted expectations.
///
/// Requests are matched against expectations in FIFO order. A request that does not match the
/// next expectation (wrong operation, wrong id, or no expectation left) is recorded as a failure
/// and its responder is dropped, so the caller sees [`StoreError::Dropped`]. [`MockClient::verify`]
/// panics if any failure was recorded or any expectation is left over.
pub struct MockClient<T: StoreRecord> {
    client: StoreClient<T>,
    state: Arc<Mutex<MockState<T>>>,
    received: Arc<AtomicUsize>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: StoreRecord> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: StoreRecord> MockClient<T> {
    /// Creates a new mock with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let state = Arc::new(Mutex::new(MockState {
            expectations: VecDeque::new(),
            failures: Vec::new(),
        }));
        let received = Arc::new(AtomicUsize::new(0));

        let task_state = state.clone();
        let task_received = received.clone();
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                task_received.fetch_add(1, Ordering::SeqCst);
                let mut state = task_state.lock().unwrap();
                let expectation = state.expectations.pop_front();

                match (request, expectation) {
                    (StoreRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update {
                            id: expected,
                            response,
                        }),
                    ) => reply_if_same_id(
                        &mut state.failures,
                        "update",
                        &expected,
                        &id,
                        respond_to,
                        response,
                    ),
                    (
                        StoreRequest::Delete { id, respond_to },
                        Some(Expectation::Delete {
                            id: expected,
                            response,
                        }),
                    ) => reply_if_same_id(
                        &mut state.failures,
                        "delete",
                        &expected,
                        &id,
                        respond_to,
                        response,
                    ),
                    (request, _) => {
                        state
                            .failures
                            .push(format!("unexpected request: {}", describe(&request)));
                    }
                }
            }
        });

        Self {
            client: StoreClient::new(sender),
            state,
            received,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> StoreClient<T> {
        self.client.clone()
    }

    /// Number of requests the mock has received so far, matched or not.
    pub fn request_count(&self) -> usize {
        self.received.load(Ordering::SeqCst)
    }

    /// Expects a `list` request.
    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        ExpectationBuilder::new(self.state.clone(), |response| Expectation::List { response })
    }

    /// Expects a `create` request.
    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(self.state.clone(), |response| Expectation::Create {
            response,
        })
    }

    /// Expects an `update` request for `id`.
    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        ExpectationBuilder::new(self.state.clone(), move |response| Expectation::Update {
            id,
            response,
        })
    }

    /// Expects a `delete` request for `id`.
    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        ExpectationBuilder::new(self.state.clone(), move |response| Expectation::Delete {
            id,
            response,
        })
    }

    /// Verifies that every expectation was consumed and no request went unmatched.
    pub fn verify(&self) {
        let state = self.state.lock().unwrap();
        if !state.failures.is_empty() {
            panic!("Mock store saw unexpected requests: {:?}", state.failures);
        }
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }
}

/// Builder that completes an expectation with either a success or an error reply.
pub struct ExpectationBuilder<T: StoreRecord, R> {
    state: Arc<Mutex<MockState<T>>>,
    build: Box<dyn FnOnce(Result<R, StoreError>) -> Expectation<T> + Send>,
}

impl<T: StoreRecord, R> ExpectationBuilder<T, R> {
    fn new(
        state: Arc<Mutex<MockState<T>>>,
        build: impl FnOnce(Result<R, StoreError>) -> Expectation<T> + Send + 'static,
    ) -> Self {
        Self {
            state,
            build: Box::new(build),
        }
    }

    /// Replies with `value`.
    pub fn return_ok(self, value: R) {
        let expectation = (self.build)(Ok(value));
        self.state.lock().unwrap().expectations.push_back(expectation);
    }

    /// Replies with `error`.
    pub fn return_err(self, error: StoreError) {
        let expectation = (self.build)(Err(error));
        self.state.lock().unwrap().expectations.push_back(expectation);
    }
}

fn reply_if_same_id<I: PartialEq + std::fmt::Display, R>(
    failures: &mut Vec<String>,
    operation: &str,
    expected: &I,
    actual: &I,
    respond_to: Response<R>,
    response: Result<R, StoreError>,
) {
    if expected == actual {
        let _ = respond_to.send(response);
    } else {
        failures.push(format!("{operation} expected for {expected}, got {actual}"));
    }
}

fn describe<T: StoreRecord>(request: &StoreRequest<T>) -> String {
    match request {
        StoreRequest::List { .. } => "list".to_string(),
        StoreRequest::Create { fields, .. } => format!("create {fields:?}"),
        StoreRequest::Update { id, .. } => format!("update {id}"),
        StoreRequest::Delete { id, .. } => format!("delete {id}"),
    }
}

// =============================================================================
// MANUAL HELPERS
// =============================================================================

/// Creates a client together with the receiving end of its channel.
///
/// Use with the `expect_*` helpers below to hold requests in flight and answer them in any order.
pub fn create_mock_client<T: StoreRecord>(
    buffer_size: usize,
) -> (StoreClient<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(sender), receiver)
}

/// Waits for the next request and returns its responder if it is a List request.
pub async fn expect_list<T: StoreRecord>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<Response<Vec<T>>> {
    match receiver.recv().await {
        Some(StoreRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Waits for the next request and returns its payload and responder if it is a Create request.
pub async fn expect_create<T: StoreRecord>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Fields, Response<T>)> {
    match receiver.recv().await {
        Some(StoreRequest::Create { fields, respond_to }) => Some((fields, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns its id, payload and responder if it is an Update.
pub async fn expect_update<T: StoreRecord>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Id, T::Fields, Response<()>)> {
    match receiver.recv().await {
        Some(StoreRequest::Update {
            id,
            fields,
            respond_to,
        }) => Some((id, fields, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns its id and responder if it is a Delete request.
pub async fn expect_delete<T: StoreRecord>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Id, Response<()>)> {
    match receiver.recv().await {
        Some(StoreRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}
