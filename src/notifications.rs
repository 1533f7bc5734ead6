//! Transient user-facing messages.
//!
//! The store reports every settled operation here: one slot for the latest success, one for the
//! latest error. A message is visible for a fixed duration after it was posted and then reads as
//! `None`. Posting into a slot replaces whatever it held.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

pub const DEFAULT_DISPLAY_DURATION: Duration = Duration::from_millis(3000);

pub const ADDED: &str = "Product added successfully.";
pub const UPDATED: &str = "Product updated successfully.";
pub const REMOVED: &str = "Product removed successfully.";

pub const LOAD_FAILED: &str = "Could not load products.";
pub const ADD_FAILED: &str = "Could not add the product.";
pub const UPDATE_FAILED: &str = "Could not save the changes.";
pub const REMOVE_FAILED: &str = "Could not remove the product.";
pub const INVALID_INPUT: &str = "Please fill in every field correctly.";

#[derive(Debug, Clone)]
struct Posted {
    text: String,
    expires_at: Instant,
}

#[derive(Debug, Default)]
struct Slots {
    success: Option<Posted>,
    error: Option<Posted>,
}

/// Cloneable handle to the success and error slots. Clones share the same slots.
#[derive(Debug, Clone)]
pub struct Notifications {
    slots: Arc<Mutex<Slots>>,
    display_for: Duration,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(DEFAULT_DISPLAY_DURATION)
    }
}

impl Notifications {
    pub fn new(display_for: Duration) -> Self {
        Self {
            slots: Arc::new(Mutex::new(Slots::default())),
            display_for,
        }
    }

    pub fn display_for(&self) -> Duration {
        self.display_for
    }

    pub fn success(&self, text: impl Into<String>) {
        let posted = self.stamp(text);
        self.slots.lock().success = Some(posted);
    }

    pub fn error(&self, text: impl Into<String>) {
        let posted = self.stamp(text);
        self.slots.lock().error = Some(posted);
    }

    /// The current success message, if one was posted and has not expired.
    pub fn current_success(&self) -> Option<String> {
        visible(&self.slots.lock().success)
    }

    /// The current error message, if one was posted and has not expired.
    pub fn current_error(&self) -> Option<String> {
        visible(&self.slots.lock().error)
    }

    /// Empties both slots.
    pub fn clear(&self) {
        let mut slots = self.slots.lock();
        slots.success = None;
        slots.error = None;
    }

    fn stamp(&self, text: impl Into<String>) -> Posted {
        Posted {
            text: text.into(),
            expires_at: Instant::now() + self.display_for,
        }
    }
}

fn visible(slot: &Option<Posted>) -> Option<String> {
    slot.as_ref()
        .filter(|posted| Instant::now() < posted.expires_at)
        .map(|posted| posted.text.clone())
}
