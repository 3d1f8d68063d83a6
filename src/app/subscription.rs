// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! - The gallery sync bridge turns data sync callbacks into messages.
//! - The tick drives carousels and animations.
//! - Window events track the width, the Escape key and close requests.

use super::Message;
use crate::application::sync::{GalleryDataSync, GalleryState};
use crate::ui::design_tokens::motion;
use crate::ui::gallery;
use iced::futures::channel::mpsc::Sender;
use iced::futures::SinkExt;
use iced::{event, keyboard, stream, time, window, Subscription};
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Tick interval while nothing animates; enough to notice carousel turns.
const IDLE_TICK: Duration = Duration::from_millis(100);

/// Identity of one running data sync.
///
/// Two keys are equal when they wrap the same store handle and path, so the
/// bridge keeps running across redraws and restarts only if the sync is
/// replaced.
struct SyncKey(GalleryDataSync);

impl Hash for SyncKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(self.0.store()).cast::<()>().hash(state);
        self.0.path().hash(state);
    }
}

/// Bridges the data sync into the iced runtime.
///
/// The sync starts when the subscription is first polled and is released
/// when iced drops the stream.
pub fn gallery_sync(sync: Option<&GalleryDataSync>) -> Subscription<Message> {
    match sync {
        Some(sync) => Subscription::run_with(SyncKey(sync.clone()), sync_stream)
            .map(|state| Message::Gallery(gallery::Message::Synced(state))),
        None => Subscription::none(),
    }
}

fn sync_stream(key: &SyncKey) -> impl iced::futures::Stream<Item = GalleryState> {
    let sync = key.0.clone();

    stream::channel(16, move |mut output: Sender<GalleryState>| async move {
        let (tx, mut rx) = mpsc::unbounded_channel();

        // Released on drop, when iced cancels this future.
        let _unsubscribe = sync.start(move |state| {
            let _ = tx.send(state);
        });

        while let Some(state) = rx.recv().await {
            if output.send(state).await.is_err() {
                break;
            }
        }
    })
}

/// Frame-rate tick while animating, idle tick otherwise.
pub fn tick(animating: bool) -> Subscription<Message> {
    let interval = if animating { motion::FRAME } else { IDLE_TICK };
    time::every(interval).map(Message::Tick)
}

/// Window resizes, close requests and the Escape key.
pub fn window_events() -> Subscription<Message> {
    event::listen_with(|event, status, _window_id| match event {
        event::Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized(size)),
        event::Event::Window(window::Event::CloseRequested) => Some(Message::CloseRequested),
        event::Event::Keyboard(keyboard::Event::KeyPressed {
            key: keyboard::Key::Named(keyboard::key::Named::Escape),
            ..
        }) if status == event::Status::Ignored => Some(Message::EscapePressed),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gallery::CollectionPath;
    use crate::infrastructure::MemoryStore;
    use iced::futures::StreamExt;
    use serde_json::json;

    #[tokio::test]
    async fn sync_stream_yields_states_and_releases_on_drop() {
        let store = Arc::new(MemoryStore::with_value(
            "temple_web",
            json!({ "a": { "url": "https://img/a.jpg" } }),
        ));
        let path = CollectionPath::new("temple_web").expect("valid path");
        let key = SyncKey(GalleryDataSync::new(store.clone(), path));

        let mut states = Box::pin(sync_stream(&key));
        let first = states.next().await.expect("first state");
        assert_eq!(first.images.len(), 1);
        assert_eq!(first.images[0].id, "a");
        assert_eq!(store.listener_count(), 1);

        store.set("temple_web", json!({}));
        let second = states.next().await.expect("second state");
        assert!(second.images.is_empty());

        drop(states);
        assert_eq!(store.listener_count(), 0);
    }
}
