// SPDX-License-Identifier: MPL-2.0
//! Gallery data sync.
//!
//! Subscribes once to the image collection, turns every snapshot into an
//! ordered list of records, and publishes a [`GalleryState`] to a callback.
//! The subscription lives as long as the returned [`Unsubscribe`] handle.
//!
//! # Error policy
//!
//! - Malformed entries are left out of the list and listed in
//!   [`GalleryState::skipped`].
//! - A snapshot that cannot be converted at all falls back to an empty list.
//! - A subscription error keeps the last known list.
//! - Both clear `loading`; neither is retried here. Retrying belongs to the
//!   store adapter.

use crate::application::port::store::{ImageStore, SnapshotListener, StoreError, StoreEvent};
use crate::domain::gallery::{
    records_from_snapshot, CollectionPath, ImageRecord, SnapshotParseError, SnapshotRecords,
};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

// =============================================================================
// GalleryState
// =============================================================================

/// Failure attached to a published state.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncError {
    /// The snapshot could not be converted to records.
    SnapshotParse(SnapshotParseError),
    /// The store subscription reported an error.
    Subscription(StoreError),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::SnapshotParse(e) => write!(f, "Unreadable snapshot: {e}"),
            SyncError::Subscription(e) => write!(f, "Subscription failed: {e}"),
        }
    }
}

impl std::error::Error for SyncError {}

/// What the view renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryState {
    pub images: Vec<ImageRecord>,
    /// True only until the first snapshot or error arrives.
    pub loading: bool,
    pub error: Option<SyncError>,
    /// Entries of the last snapshot that were not usable records.
    pub skipped: Vec<SnapshotParseError>,
}

impl Default for GalleryState {
    fn default() -> Self {
        Self {
            images: Vec::new(),
            loading: true,
            error: None,
            skipped: Vec::new(),
        }
    }
}

// =============================================================================
// SnapshotReducer
// =============================================================================

/// Folds store events into gallery states.
///
/// Remembers the last list so subscription errors can keep it.
#[derive(Debug, Default)]
pub struct SnapshotReducer {
    images: Vec<ImageRecord>,
}

impl SnapshotReducer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the state published after `event`.
    pub fn apply(&mut self, event: StoreEvent) -> GalleryState {
        let mut skipped = Vec::new();
        let error = match event {
            StoreEvent::Snapshot(value) => match records_from_snapshot(value.as_ref()) {
                Ok(SnapshotRecords {
                    images,
                    skipped: left_out,
                }) => {
                    self.images = images;
                    skipped = left_out;
                    None
                }
                Err(parse_error) => {
                    self.images.clear();
                    Some(SyncError::SnapshotParse(parse_error))
                }
            },
            StoreEvent::Failed(store_error) => Some(SyncError::Subscription(store_error)),
        };

        GalleryState {
            images: self.images.clone(),
            loading: false,
            error,
            skipped,
        }
    }
}

// =============================================================================
// GalleryDataSync
// =============================================================================

type UpdateCallback = Box<dyn FnMut(GalleryState) + Send>;

/// Callback slot shared between the store listener and the handle.
struct Emitter {
    active: bool,
    on_update: UpdateCallback,
}

impl Emitter {
    fn emit(shared: &Mutex<Emitter>, state: GalleryState) {
        let mut emitter = shared.lock().unwrap_or_else(PoisonError::into_inner);
        if emitter.active {
            (emitter.on_update)(state);
        }
    }
}

/// Keeps one store subscription feeding gallery states to a callback.
#[derive(Clone)]
pub struct GalleryDataSync {
    store: Arc<dyn ImageStore>,
    path: CollectionPath,
}

impl GalleryDataSync {
    /// Creates a sync over an injected store handle.
    pub fn new(store: Arc<dyn ImageStore>, path: CollectionPath) -> Self {
        Self { store, path }
    }

    #[must_use]
    pub fn path(&self) -> &CollectionPath {
        &self.path
    }

    /// The injected store handle.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn ImageStore> {
        &self.store
    }

    /// Opens the subscription and starts publishing states to `on_update`.
    ///
    /// `on_update` may be called from the store adapter's thread. If the
    /// store refuses the subscription, one error state is published before
    /// this returns.
    ///
    /// `on_update` must not release the returned handle from inside the
    /// callback.
    pub fn start<F>(&self, on_update: F) -> Unsubscribe
    where
        F: FnMut(GalleryState) + Send + 'static,
    {
        let emitter = Arc::new(Mutex::new(Emitter {
            active: true,
            on_update: Box::new(on_update),
        }));

        let sink = Arc::clone(&emitter);
        let mut reducer = SnapshotReducer::new();
        let listener: SnapshotListener = Box::new(move |event| {
            let state = reducer.apply(event);
            Emitter::emit(&sink, state);
        });

        let subscription = match self.store.subscribe(&self.path, listener) {
            Ok(subscription) => Some(subscription),
            Err(error) => {
                Emitter::emit(
                    &emitter,
                    GalleryState {
                        images: Vec::new(),
                        loading: false,
                        error: Some(SyncError::Subscription(error)),
                        skipped: Vec::new(),
                    },
                );
                None
            }
        };

        Unsubscribe {
            emitter,
            subscription,
        }
    }
}

impl fmt::Debug for GalleryDataSync {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GalleryDataSync")
            .field("path", &self.path)
            .finish()
    }
}

// =============================================================================
// Unsubscribe
// =============================================================================

/// Handle returned by [`GalleryDataSync::start`].
///
/// Releasing it stops all emissions; once [`Unsubscribe::unsubscribe`]
/// returns, the callback is never invoked again. Dropping the handle
/// releases it too.
pub struct Unsubscribe {
    emitter: Arc<Mutex<Emitter>>,
    subscription: Option<crate::application::port::store::StoreSubscription>,
}

impl Unsubscribe {
    /// Releases the subscription. Safe to call any number of times.
    pub fn unsubscribe(&mut self) {
        self.emitter
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .active = false;

        if let Some(subscription) = self.subscription.take() {
            subscription.cancel();
        }
    }

    /// Returns true until the handle is released.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.emitter
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .active
    }
}

impl Drop for Unsubscribe {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unsubscribe")
            .field("active", &self.is_active())
            .finish()
    }
}
