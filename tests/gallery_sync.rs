// SPDX-License-Identifier: MPL-2.0
//! End-to-end behavior of the gallery data sync over in-process stores.

use serde_json::json;
use shilpkar_gallery::application::port::store::{
    ImageStore, SnapshotListener, StoreError, StoreEvent, StoreSubscription,
};
use shilpkar_gallery::application::sync::{GalleryDataSync, GalleryState, SyncError};
use shilpkar_gallery::domain::gallery::{CollectionPath, ImageRecord, SnapshotParseError};
use shilpkar_gallery::infrastructure::MemoryStore;
use std::sync::{Arc, Mutex};

fn temple_web() -> CollectionPath {
    CollectionPath::new("temple_web").expect("valid path")
}

type States = Arc<Mutex<Vec<GalleryState>>>;

fn start(sync: &GalleryDataSync) -> (shilpkar_gallery::application::sync::Unsubscribe, States) {
    let states: States = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&states);
    let handle = sync.start(move |state| sink.lock().unwrap().push(state));
    (handle, states)
}

/// Store that keeps pushing to its listener even after release, and can be
/// driven by hand.
#[derive(Default)]
struct StubStore {
    listener: Arc<Mutex<Option<SnapshotListener>>>,
    refuse: Option<StoreError>,
}

impl StubStore {
    fn push(&self, event: StoreEvent) {
        if let Some(listener) = self.listener.lock().unwrap().as_mut() {
            listener(event);
        }
    }
}

impl ImageStore for StubStore {
    fn subscribe(
        &self,
        _path: &CollectionPath,
        listener: SnapshotListener,
    ) -> Result<StoreSubscription, StoreError> {
        if let Some(error) = &self.refuse {
            return Err(error.clone());
        }
        *self.listener.lock().unwrap() = Some(listener);
        Ok(StoreSubscription::new(|| {}))
    }
}

#[test]
fn two_records_arrive_in_value_order() {
    let store = Arc::new(MemoryStore::with_value(
        "temple_web",
        json!({
            "a": { "id": "1", "url": "u1" },
            "b": { "id": "2", "url": "u2" },
        }),
    ));
    let sync = GalleryDataSync::new(store, temple_web());

    let (_handle, states) = start(&sync);
    let states = states.lock().unwrap();
    assert_eq!(
        states.last(),
        Some(&GalleryState {
            images: vec![ImageRecord::new("1", "u1"), ImageRecord::new("2", "u2")],
            loading: false,
            error: None,
            skipped: Vec::new(),
        })
    );
}

#[test]
fn many_records_keep_document_order() {
    let mut payload = serde_json::Map::new();
    for i in (0..25).rev() {
        payload.insert(
            format!("key{i}"),
            json!({ "id": format!("id{i}"), "url": format!("https://img/{i}.jpg") }),
        );
    }
    let store = Arc::new(MemoryStore::with_value(
        "temple_web",
        serde_json::Value::Object(payload),
    ));
    let sync = GalleryDataSync::new(store, temple_web());

    let (_handle, states) = start(&sync);
    let states = states.lock().unwrap();
    let ids: Vec<_> = states[0].images.iter().map(|image| image.id.as_str()).collect();
    let expected: Vec<String> = (0..25).rev().map(|i| format!("id{i}")).collect();
    assert_eq!(ids, expected);
    assert!(!states[0].loading);
}

#[test]
fn null_snapshot_gives_empty_list() {
    let store = Arc::new(MemoryStore::new());
    let sync = GalleryDataSync::new(Arc::clone(&store) as Arc<dyn ImageStore>, temple_web());

    let (_handle, states) = start(&sync);
    store.set("temple_web", json!({ "a": { "id": "a", "url": "u" } }));
    store.set("temple_web", serde_json::Value::Null);

    let states = states.lock().unwrap();
    assert_eq!(
        states.last(),
        Some(&GalleryState {
            images: Vec::new(),
            loading: false,
            error: None,
            skipped: Vec::new(),
        })
    );
}

#[test]
fn error_before_any_snapshot_clears_loading() {
    let store = Arc::new(StubStore::default());
    let sync = GalleryDataSync::new(Arc::clone(&store) as Arc<dyn ImageStore>, temple_web());

    let (_handle, states) = start(&sync);
    assert!(states.lock().unwrap().is_empty());

    store.push(StoreEvent::Failed(StoreError::PermissionDenied("rules".into())));

    let states = states.lock().unwrap();
    assert_eq!(states.len(), 1);
    assert!(states[0].images.is_empty());
    assert!(!states[0].loading);
    assert_eq!(
        states[0].error,
        Some(SyncError::Subscription(StoreError::PermissionDenied("rules".into())))
    );
}

#[test]
fn refused_subscription_is_published_as_error() {
    let store = Arc::new(StubStore {
        refuse: Some(StoreError::NoRuntime),
        ..StubStore::default()
    });
    let sync = GalleryDataSync::new(store, temple_web());

    let (_handle, states) = start(&sync);
    let states = states.lock().unwrap();
    assert_eq!(states.len(), 1);
    assert_eq!(
        states[0].error,
        Some(SyncError::Subscription(StoreError::NoRuntime))
    );
}

#[test]
fn no_emissions_after_unsubscribe_even_if_store_keeps_pushing() {
    let store = Arc::new(StubStore::default());
    let sync = GalleryDataSync::new(Arc::clone(&store) as Arc<dyn ImageStore>, temple_web());

    let (mut handle, states) = start(&sync);
    store.push(StoreEvent::Snapshot(Some(json!({ "a": { "id": "a", "url": "u" } }))));
    assert_eq!(states.lock().unwrap().len(), 1);

    handle.unsubscribe();
    store.push(StoreEvent::Snapshot(Some(json!({ "b": { "id": "b", "url": "v" } }))));
    store.push(StoreEvent::Failed(StoreError::AuthRevoked));

    assert_eq!(states.lock().unwrap().len(), 1);
}

#[test]
fn double_unsubscribe_is_harmless() {
    let store = Arc::new(MemoryStore::new());
    let sync = GalleryDataSync::new(Arc::clone(&store) as Arc<dyn ImageStore>, temple_web());

    let (mut handle, _states) = start(&sync);
    handle.unsubscribe();
    handle.unsubscribe();
    drop(handle);

    assert_eq!(store.listener_count(), 0);
}

#[test]
fn malformed_entry_is_skipped_and_good_records_survive() {
    let store = Arc::new(MemoryStore::new());
    let sync = GalleryDataSync::new(Arc::clone(&store) as Arc<dyn ImageStore>, temple_web());

    let (_handle, states) = start(&sync);
    store.set(
        "temple_web",
        json!({
            "a": { "id": "a", "url": "u1" },
            "b": { "id": "b", "url": "u2" },
            "c": { "id": "c" },
        }),
    );

    let states = states.lock().unwrap();
    let last = states.last().expect("state published");
    assert_eq!(
        last.images,
        vec![ImageRecord::new("a", "u1"), ImageRecord::new("b", "u2")]
    );
    assert!(last.error.is_none());
    assert_eq!(
        last.skipped,
        vec![SnapshotParseError::MissingField {
            key: "c".to_string(),
            field: "url"
        }]
    );
}

#[test]
fn scalar_payload_empties_the_list() {
    let store = Arc::new(MemoryStore::with_value(
        "temple_web",
        json!({ "a": { "id": "a", "url": "u" } }),
    ));
    let sync = GalleryDataSync::new(Arc::clone(&store) as Arc<dyn ImageStore>, temple_web());

    let (_handle, states) = start(&sync);
    store.set("temple_web", json!(17));

    let states = states.lock().unwrap();
    let last = states.last().expect("state published");
    assert!(last.images.is_empty());
    assert!(matches!(last.error, Some(SyncError::SnapshotParse(_))));
}
