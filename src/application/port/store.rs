// SPDX-License-Identifier: MPL-2.0
//! Remote image store port definition.
//!
//! This module defines the [`ImageStore`] trait: a key-value store whose
//! collection path holds a mapping from keys to image records, and which
//! pushes the complete value at that path whenever it changes.
//!
//! Adapters live in [`crate::infrastructure`].

use crate::domain::gallery::CollectionPath;
use serde_json::Value;
use std::fmt;

// =============================================================================
// StoreError
// =============================================================================

/// Errors reported by a store subscription.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The connection to the store failed or dropped.
    Connection(String),

    /// The store refused access to the path.
    PermissionDenied(String),

    /// The credential used for the subscription was revoked.
    AuthRevoked,

    /// The store ended the subscription on its side.
    Cancelled(String),

    /// The adapter needs an async runtime and none is running.
    NoRuntime,
}

impl StoreError {
    /// Returns true when the adapter will not deliver anything else after
    /// this error.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StoreError::Connection(_))
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Connection(msg) => write!(f, "Store connection failed: {msg}"),
            StoreError::PermissionDenied(msg) => write!(f, "Permission denied: {msg}"),
            StoreError::AuthRevoked => write!(f, "Store credential revoked"),
            StoreError::Cancelled(msg) => write!(f, "Subscription cancelled: {msg}"),
            StoreError::NoRuntime => write!(f, "No async runtime available"),
        }
    }
}

impl std::error::Error for StoreError {}

// =============================================================================
// StoreEvent
// =============================================================================

/// One notification delivered to a subscription listener.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// The complete current value at the subscribed path. `None` when the
    /// path holds nothing.
    Snapshot(Option<Value>),

    /// The subscription hit an error.
    Failed(StoreError),
}

/// Callback receiving the events of one subscription.
pub type SnapshotListener = Box<dyn FnMut(StoreEvent) + Send>;

// =============================================================================
// StoreSubscription
// =============================================================================

/// Handle keeping a subscription alive.
///
/// Cancelling (or dropping) the handle releases the subscription. The
/// release runs at most once.
pub struct StoreSubscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl StoreSubscription {
    /// Wraps the adapter-specific release action.
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Releases the subscription.
    pub fn cancel(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for StoreSubscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for StoreSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreSubscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

// =============================================================================
// ImageStore Trait
// =============================================================================

/// Live, read-only access to a collection of image records.
///
/// # Contract
///
/// - `listener` is called zero or more times, only after `subscribe`
///   returns or from within it, and never after the returned handle is
///   released and the release has completed.
/// - Every [`StoreEvent::Snapshot`] carries the full value at `path`.
///
/// # Errors
///
/// Returns an error when the subscription cannot be opened at all.
pub trait ImageStore: Send + Sync {
    fn subscribe(
        &self,
        path: &CollectionPath,
        listener: SnapshotListener,
    ) -> Result<StoreSubscription, StoreError>;
}
