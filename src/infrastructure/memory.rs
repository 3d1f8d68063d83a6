// SPDX-License-Identifier: MPL-2.0
//! In-process image store.
//!
//! Values are set from code (tests) or loaded from a JSON file (the
//! `--snapshot` flag). Listeners are notified synchronously on the thread
//! that changes a value.

use crate::application::port::store::{
    ImageStore, SnapshotListener, StoreError, StoreEvent, StoreSubscription,
};
use crate::domain::gallery::CollectionPath;
use crate::error::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError, Weak};

struct Registered {
    id: u64,
    path: String,
    listener: SnapshotListener,
}

#[derive(Default)]
struct Inner {
    values: HashMap<String, Value>,
    listeners: Vec<Registered>,
    next_id: u64,
}

impl Inner {
    fn notify(&mut self, path: &str, event: &StoreEvent) {
        for registered in self.listeners.iter_mut().filter(|r| r.path == path) {
            (registered.listener)(event.clone());
        }
    }
}

fn normalize(path: &str) -> String {
    path.trim().trim_matches('/').to_string()
}

/// Image store held in memory.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `value` at `path`.
    #[must_use]
    pub fn with_value(path: &str, value: Value) -> Self {
        let store = Self::new();
        store
            .lock()
            .values
            .insert(normalize(path), value);
        store
    }

    /// Creates a store serving the JSON document in `file` at `collection`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn from_snapshot_file(collection: &CollectionPath, file: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(file)?;
        let value: Value = serde_json::from_str(&content)?;
        Ok(Self::with_value(collection.as_str(), value))
    }

    /// Replaces the value at `path` and notifies its listeners.
    ///
    /// Setting `null` clears the path.
    pub fn set(&self, path: &str, value: Value) {
        let path = normalize(path);
        let mut inner = self.lock();
        let snapshot = if value.is_null() {
            inner.values.remove(&path);
            None
        } else {
            inner.values.insert(path.clone(), value.clone());
            Some(value)
        };
        inner.notify(&path, &StoreEvent::Snapshot(snapshot));
    }

    /// Clears the value at `path` and notifies its listeners.
    pub fn remove(&self, path: &str) {
        self.set(path, Value::Null);
    }

    /// Reports `error` to the listeners of `path`.
    pub fn fail(&self, path: &str, error: StoreError) {
        let path = normalize(path);
        self.lock().notify(&path, &StoreEvent::Failed(error));
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ImageStore for MemoryStore {
    fn subscribe(
        &self,
        path: &CollectionPath,
        mut listener: SnapshotListener,
    ) -> std::result::Result<StoreSubscription, StoreError> {
        let path = path.as_str().to_string();
        let mut inner = self.lock();

        listener(StoreEvent::Snapshot(inner.values.get(&path).cloned()));

        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push(Registered { id, path, listener });

        let weak: Weak<Mutex<Inner>> = Arc::downgrade(&self.inner);
        Ok(StoreSubscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .listeners
                    .retain(|registered| registered.id != id);
            }
        }))
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("MemoryStore")
            .field("paths", &inner.values.keys().collect::<Vec<_>>())
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn recording_listener() -> (SnapshotListener, Arc<Mutex<Vec<StoreEvent>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let listener: SnapshotListener = Box::new(move |event| sink.lock().unwrap().push(event));
        (listener, events)
    }

    fn temple_web() -> CollectionPath {
        CollectionPath::new("temple_web").expect("valid path")
    }

    #[test]
    fn subscribe_delivers_current_value_first() {
        let store = MemoryStore::with_value("/temple_web/", json!({ "a": 1 }));
        let (listener, events) = recording_listener();

        let _subscription = store.subscribe(&temple_web(), listener).expect("subscribed");
        assert_eq!(
            *events.lock().unwrap(),
            vec![StoreEvent::Snapshot(Some(json!({ "a": 1 })))]
        );
    }

    #[test]
    fn empty_path_delivers_none() {
        let store = MemoryStore::new();
        let (listener, events) = recording_listener();

        let _subscription = store.subscribe(&temple_web(), listener).expect("subscribed");
        assert_eq!(*events.lock().unwrap(), vec![StoreEvent::Snapshot(None)]);
    }

    #[test]
    fn changes_reach_only_matching_paths() {
        let store = MemoryStore::new();
        let (listener, events) = recording_listener();
        let _subscription = store.subscribe(&temple_web(), listener).expect("subscribed");

        store.set("other", json!({ "x": 1 }));
        store.set("temple_web", json!({ "y": 2 }));
        store.remove("temple_web");
        store.fail("temple_web", StoreError::AuthRevoked);

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 4);
        assert_eq!(events[1], StoreEvent::Snapshot(Some(json!({ "y": 2 }))));
        assert_eq!(events[2], StoreEvent::Snapshot(None));
        assert_eq!(events[3], StoreEvent::Failed(StoreError::AuthRevoked));
    }

    #[test]
    fn cancelled_subscription_is_removed() {
        let store = MemoryStore::new();
        let (listener, events) = recording_listener();
        let subscription = store.subscribe(&temple_web(), listener).expect("subscribed");

        subscription.cancel();
        store.set("temple_web", json!({ "y": 2 }));

        assert_eq!(store.listener_count(), 0);
        assert_eq!(events.lock().unwrap().len(), 1);
    }

    #[test]
    fn loads_snapshot_file() {
        let dir = tempdir().expect("failed to create temp dir");
        let file = dir.path().join("snapshot.json");
        std::fs::write(&file, r#"{"k1":{"id":"k1","url":"https://img/1.jpg"}}"#)
            .expect("failed to write snapshot");

        let store = MemoryStore::from_snapshot_file(&temple_web(), &file).expect("loaded");
        let (listener, events) = recording_listener();
        let _subscription = store.subscribe(&temple_web(), listener).expect("subscribed");

        assert!(matches!(
            &events.lock().unwrap()[0],
            StoreEvent::Snapshot(Some(value)) if value["k1"]["id"] == "k1"
        ));
    }

    #[test]
    fn invalid_snapshot_file_errors() {
        let dir = tempdir().expect("failed to create temp dir");
        let file = dir.path().join("broken.json");
        std::fs::write(&file, "{ nope").expect("failed to write snapshot");

        let result = MemoryStore::from_snapshot_file(&temple_web(), &file);
        assert!(matches!(result, Err(crate::error::Error::Snapshot(_))));
    }
}
