// SPDX-License-Identifier: MPL-2.0
//! Realtime database adapter.
//!
//! Streams the collection path over the database's REST event-stream
//! endpoint (`GET <db>/<path>.json`, `Accept: text/event-stream`), keeps a
//! local mirror of the subtree and pushes the full mirror to the listener
//! after every `put` or `patch`.
//!
//! # Reconnection
//!
//! Dropped connections and transient HTTP statuses are retried with
//! exponential backoff. Only the first failure of an outage is reported to
//! the listener. The stream stops for good on HTTP 401/403, on `cancel` and
//! on `auth_revoked`.

pub mod sse;
pub mod tree;

use crate::application::port::store::{
    ImageStore, SnapshotListener, StoreError, StoreEvent, StoreSubscription,
};
use crate::diagnostics::{DiagnosticEventKind, DiagnosticsHandle};
use crate::domain::gallery::CollectionPath;
use crate::error::{NetworkError, Result};
use futures_util::StreamExt;
use reqwest::header::ACCEPT;
use reqwest::{StatusCode, Url};
use sse::{SseParser, StreamEvent};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tree::Mirror;

/// Environment variable holding the database credential.
pub const AUTH_ENV_VAR: &str = "SHILPKAR_GALLERY_DB_AUTH";

/// Connection settings for [`FirebaseStore`].
#[derive(Clone)]
pub struct FirebaseStoreConfig {
    /// Database root, e.g. `https://<project>.firebaseio.com`.
    pub database_url: String,
    /// Credential appended as the `auth` query parameter.
    pub auth: Option<String>,
    pub connect_timeout: Duration,
    pub reconnect_initial: Duration,
    pub reconnect_max: Duration,
}

impl FirebaseStoreConfig {
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            auth: None,
            connect_timeout: Duration::from_secs(10),
            reconnect_initial: Duration::from_millis(1_000),
            reconnect_max: Duration::from_millis(30_000),
        }
    }

    /// Picks up the credential from [`AUTH_ENV_VAR`] when set and non-empty.
    #[must_use]
    pub fn with_auth_from_env(mut self) -> Self {
        self.auth = std::env::var(AUTH_ENV_VAR)
            .ok()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());
        self
    }
}

impl fmt::Debug for FirebaseStoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FirebaseStoreConfig")
            .field("database_url", &self.database_url)
            .field("auth", &self.auth.as_ref().map(|_| "<redacted>"))
            .field("connect_timeout", &self.connect_timeout)
            .field("reconnect_initial", &self.reconnect_initial)
            .field("reconnect_max", &self.reconnect_max)
            .finish()
    }
}

/// Builds the streaming endpoint for `path`.
///
/// # Errors
///
/// Returns [`NetworkError::InvalidUrl`] if `database_url` is not an absolute
/// http(s) URL.
pub fn stream_url(
    database_url: &str,
    path: &CollectionPath,
    auth: Option<&str>,
) -> std::result::Result<Url, NetworkError> {
    let mut url = Url::parse(database_url.trim())
        .map_err(|e| NetworkError::InvalidUrl(format!("{database_url}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(NetworkError::InvalidUrl(database_url.to_string()));
    }

    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|()| NetworkError::InvalidUrl(database_url.to_string()))?;
        segments.pop_if_empty();
        let parts: Vec<&str> = path.segments().collect();
        if let Some((last, parents)) = parts.split_last() {
            segments.extend(parents);
            segments.push(&format!("{last}.json"));
        }
    }

    url.set_query(None);
    if let Some(token) = auth {
        url.query_pairs_mut().append_pair("auth", token);
    }
    Ok(url)
}

// =============================================================================
// Backoff
// =============================================================================

/// Reconnect delay schedule for one subscription.
#[derive(Debug, Clone)]
struct Backoff {
    initial: Duration,
    max: Duration,
    next: Duration,
    outage_reported: bool,
}

impl Backoff {
    fn new(initial: Duration, max: Duration) -> Self {
        let max = max.max(initial);
        Self {
            initial,
            max,
            next: initial,
            outage_reported: false,
        }
    }

    /// Called once data flows again.
    fn reset(&mut self) {
        self.next = self.initial;
        self.outage_reported = false;
    }

    fn next_delay(&mut self) -> Duration {
        let delay = self.next;
        self.next = (self.next * 2).min(self.max);
        delay
    }

    /// Returns true for the first failure since the last reset.
    fn report_outage(&mut self) -> bool {
        !std::mem::replace(&mut self.outage_reported, true)
    }
}

// =============================================================================
// Streaming task
// =============================================================================

type ListenerSlot = Arc<Mutex<Option<SnapshotListener>>>;

/// Calls the listener unless the subscription was released.
fn deliver(slot: &ListenerSlot, event: StoreEvent) -> bool {
    let mut guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
    match guard.as_mut() {
        Some(listener) => {
            listener(event);
            true
        }
        None => false,
    }
}

fn is_released(slot: &ListenerSlot) -> bool {
    slot.lock()
        .unwrap_or_else(PoisonError::into_inner)
        .is_none()
}

enum StreamEnd {
    /// Connection lost; worth retrying.
    Dropped(String),
    /// The server will not serve this subscription anymore.
    Terminal(StoreError),
    Released,
}

async fn stream_once(
    client: &reqwest::Client,
    url: &Url,
    slot: &ListenerSlot,
    backoff: &mut Backoff,
    diagnostics: Option<&DiagnosticsHandle>,
) -> StreamEnd {
    let response = match client
        .get(url.clone())
        .header(ACCEPT, "text/event-stream")
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => return StreamEnd::Dropped(NetworkError::from(e).to_string()),
    };

    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return StreamEnd::Terminal(StoreError::PermissionDenied(format!(
            "HTTP {}",
            status.as_u16()
        )));
    }
    if !status.is_success() {
        let error = NetworkError::Status(status.as_u16());
        return if error.is_transient() {
            StreamEnd::Dropped(error.to_string())
        } else {
            StreamEnd::Terminal(StoreError::Cancelled(error.to_string()))
        };
    }

    let mut parser = SseParser::new();
    let mut mirror = Mirror::new();
    let mut body = response.bytes_stream();

    while let Some(chunk) = body.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => return StreamEnd::Dropped(NetworkError::from(e).to_string()),
        };

        for message in parser.feed(&chunk) {
            match StreamEvent::from(message) {
                StreamEvent::Put { path, data } => mirror.apply_put(&path, data),
                StreamEvent::Patch { path, data } => mirror.apply_patch(&path, data),
                StreamEvent::KeepAlive => continue,
                StreamEvent::Cancel(reason) => {
                    return StreamEnd::Terminal(StoreError::Cancelled(reason));
                }
                StreamEvent::AuthRevoked => return StreamEnd::Terminal(StoreError::AuthRevoked),
                StreamEvent::Ignored(detail) => {
                    if let Some(diagnostics) = diagnostics {
                        diagnostics.log(DiagnosticEventKind::StreamEventIgnored { detail });
                    }
                    continue;
                }
            }

            backoff.reset();
            if !deliver(slot, StoreEvent::Snapshot(mirror.value().cloned())) {
                return StreamEnd::Released;
            }
        }
    }

    StreamEnd::Dropped(NetworkError::Connection("stream closed by server".into()).to_string())
}

async fn run(
    client: reqwest::Client,
    url: Url,
    slot: ListenerSlot,
    mut backoff: Backoff,
    diagnostics: Option<DiagnosticsHandle>,
) {
    loop {
        match stream_once(&client, &url, &slot, &mut backoff, diagnostics.as_ref()).await {
            StreamEnd::Released => return,
            StreamEnd::Terminal(error) => {
                deliver(&slot, StoreEvent::Failed(error));
                return;
            }
            StreamEnd::Dropped(reason) => {
                if backoff.report_outage()
                    && !deliver(&slot, StoreEvent::Failed(StoreError::Connection(reason)))
                {
                    return;
                }
                if is_released(&slot) {
                    return;
                }
                tokio::time::sleep(backoff.next_delay()).await;
            }
        }
    }
}

// =============================================================================
// FirebaseStore
// =============================================================================

/// [`ImageStore`] backed by the realtime database REST streaming API.
///
/// Each subscription runs as a task on the current tokio runtime.
#[derive(Debug, Clone)]
pub struct FirebaseStore {
    client: reqwest::Client,
    config: FirebaseStoreConfig,
    diagnostics: Option<DiagnosticsHandle>,
}

impl FirebaseStore {
    /// Creates the store and its HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the database URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: FirebaseStoreConfig) -> Result<Self> {
        Url::parse(config.database_url.trim())
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https"))
            .ok_or_else(|| NetworkError::InvalidUrl(config.database_url.clone()))?;

        // No overall timeout: the stream stays open indefinitely.
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            client,
            config,
            diagnostics: None,
        })
    }

    /// Reports stream events the client skips to `diagnostics`.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: DiagnosticsHandle) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    #[must_use]
    pub fn config(&self) -> &FirebaseStoreConfig {
        &self.config
    }
}

impl ImageStore for FirebaseStore {
    fn subscribe(
        &self,
        path: &CollectionPath,
        listener: SnapshotListener,
    ) -> std::result::Result<StoreSubscription, StoreError> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| StoreError::NoRuntime)?;
        let url = stream_url(&self.config.database_url, path, self.config.auth.as_deref())
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let slot: ListenerSlot = Arc::new(Mutex::new(Some(listener)));
        let backoff = Backoff::new(self.config.reconnect_initial, self.config.reconnect_max);
        let task = runtime.spawn(run(
            self.client.clone(),
            url,
            Arc::clone(&slot),
            backoff,
            self.diagnostics.clone(),
        ));

        Ok(StoreSubscription::new(move || {
            // Waits for an in-flight delivery to finish.
            slot.lock().unwrap_or_else(PoisonError::into_inner).take();
            task.abort();
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticsCollector;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;

    fn temple_web() -> CollectionPath {
        CollectionPath::new("temple_web").expect("valid path")
    }

    #[test]
    fn stream_url_appends_json_suffix() {
        let url = stream_url("https://demo.firebaseio.com/", &temple_web(), None)
            .expect("valid url");
        assert_eq!(url.as_str(), "https://demo.firebaseio.com/temple_web.json");
    }

    #[test]
    fn stream_url_handles_nested_path_and_auth() {
        let path = CollectionPath::new("galleries/temple_web").expect("valid path");
        let url = stream_url("https://demo.firebaseio.com", &path, Some("s3cr3t"))
            .expect("valid url");
        assert_eq!(
            url.as_str(),
            "https://demo.firebaseio.com/galleries/temple_web.json?auth=s3cr3t"
        );
    }

    #[test]
    fn stream_url_rejects_non_http_scheme() {
        assert!(matches!(
            stream_url("ftp://demo.firebaseio.com", &temple_web(), None),
            Err(NetworkError::InvalidUrl(_))
        ));
        assert!(matches!(
            stream_url("not a url", &temple_web(), None),
            Err(NetworkError::InvalidUrl(_))
        ));
    }

    #[test]
    fn store_rejects_invalid_database_url() {
        let result = FirebaseStore::new(FirebaseStoreConfig::new("file:///tmp/db"));
        assert!(matches!(
            result,
            Err(crate::error::Error::Network(NetworkError::InvalidUrl(_)))
        ));
    }

    #[test]
    fn config_debug_redacts_credential() {
        let mut config = FirebaseStoreConfig::new("https://demo.firebaseio.com");
        config.auth = Some("s3cr3t".into());
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("s3cr3t"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn backoff_doubles_up_to_max_and_resets() {
        let mut backoff = Backoff::new(Duration::from_millis(100), Duration::from_millis(350));
        assert_eq!(backoff.next_delay(), Duration::from_millis(100));
        assert_eq!(backoff.next_delay(), Duration::from_millis(200));
        assert_eq!(backoff.next_delay(), Duration::from_millis(350));
        assert_eq!(backoff.next_delay(), Duration::from_millis(350));

        backoff.reset();
        assert_eq!(backoff.next_delay(), Duration::from_millis(100));
    }

    #[test]
    fn backoff_reports_each_outage_once() {
        let mut backoff = Backoff::new(Duration::from_millis(1), Duration::from_millis(2));
        assert!(backoff.report_outage());
        assert!(!backoff.report_outage());
        backoff.reset();
        assert!(backoff.report_outage());
    }

    #[test]
    fn subscribe_without_runtime_fails() {
        let store = FirebaseStore::new(FirebaseStoreConfig::new("http://127.0.0.1:9"))
            .expect("valid config");
        let result = store.subscribe(&temple_web(), Box::new(|_| {}));
        assert!(matches!(result, Err(StoreError::NoRuntime)));
    }

    /// Serves `response` to the first connection, then keeps it open.
    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind");
        let addr = listener.local_addr().expect("bound address");
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("failed to accept");
            let mut request = vec![0u8; 4096];
            let _ = socket.read(&mut request).await;
            socket
                .write_all(response.as_bytes())
                .await
                .expect("failed to write");
            tokio::time::sleep(Duration::from_millis(300)).await;
        });
        format!("http://{addr}")
    }

    fn test_store(base: String) -> FirebaseStore {
        let mut config = FirebaseStoreConfig::new(base);
        config.reconnect_initial = Duration::from_millis(10);
        config.reconnect_max = Duration::from_millis(20);
        FirebaseStore::new(config).expect("valid config")
    }

    fn channel_listener() -> (SnapshotListener, mpsc::UnboundedReceiver<StoreEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let listener: SnapshotListener = Box::new(move |event| {
            let _ = sender.send(event);
        });
        (listener, receiver)
    }

    async fn next_event(receiver: &mut mpsc::UnboundedReceiver<StoreEvent>) -> StoreEvent {
        tokio::time::timeout(Duration::from_secs(5), receiver.recv())
            .await
            .expect("timed out waiting for event")
            .expect("channel closed")
    }

    #[tokio::test]
    async fn streams_put_and_patch_until_cancelled() {
        let base = serve_once(concat!(
            "HTTP/1.1 200 OK\r\ncontent-type: text/event-stream\r\nconnection: close\r\n\r\n",
            "event: put\ndata: {\"path\":\"/\",\"data\":{\"a\":{\"id\":\"a\",\"url\":\"u1\"}}}\n\n",
            "event: keep-alive\ndata: null\n\n",
            "event: patch\ndata: {\"path\":\"/\",\"data\":{\"b\":{\"id\":\"b\",\"url\":\"u2\"}}}\n\n",
            "event: cancel\ndata: \"Permission denied\"\n\n",
        ))
        .await;
        let store = test_store(base);
        let (listener, mut events) = channel_listener();
        let _subscription = store.subscribe(&temple_web(), listener).expect("subscribed");

        assert_eq!(
            next_event(&mut events).await,
            StoreEvent::Snapshot(Some(json!({ "a": { "id": "a", "url": "u1" } })))
        );
        assert_eq!(
            next_event(&mut events).await,
            StoreEvent::Snapshot(Some(json!({
                "a": { "id": "a", "url": "u1" },
                "b": { "id": "b", "url": "u2" },
            })))
        );
        assert_eq!(
            next_event(&mut events).await,
            StoreEvent::Failed(StoreError::Cancelled("Permission denied".into()))
        );
    }

    #[tokio::test]
    async fn unknown_stream_events_are_reported_to_diagnostics() {
        let base = serve_once(concat!(
            "HTTP/1.1 200 OK\r\ncontent-type: text/event-stream\r\nconnection: close\r\n\r\n",
            "event: rules_debug\ndata: null\n\n",
            "event: put\ndata: {\"path\":\"/\",\"data\":null}\n\n",
        ))
        .await;
        let mut collector = DiagnosticsCollector::default();
        let store = test_store(base).with_diagnostics(collector.handle());
        let (listener, mut events) = channel_listener();
        let _subscription = store.subscribe(&temple_web(), listener).expect("subscribed");

        assert_eq!(next_event(&mut events).await, StoreEvent::Snapshot(None));

        collector.process_pending();
        assert_eq!(
            collector.iter().next().map(|event| &event.kind),
            Some(&DiagnosticEventKind::StreamEventIgnored {
                detail: "rules_debug".into()
            })
        );
    }

    #[tokio::test]
    async fn unauthorized_is_terminal() {
        let base = serve_once(
            "HTTP/1.1 401 Unauthorized\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        )
        .await;
        let store = test_store(base);
        let (listener, mut events) = channel_listener();
        let _subscription = store.subscribe(&temple_web(), listener).expect("subscribed");

        let event = next_event(&mut events).await;
        assert!(matches!(
            event,
            StoreEvent::Failed(StoreError::PermissionDenied(_))
        ));
    }

    #[tokio::test]
    async fn dropped_stream_reports_outage_once() {
        let base = serve_once(concat!(
            "HTTP/1.1 200 OK\r\ncontent-type: text/event-stream\r\nconnection: close\r\n\r\n",
            "event: put\ndata: {\"path\":\"/\",\"data\":null}\n\n",
        ))
        .await;
        let store = test_store(base);
        let (listener, mut events) = channel_listener();
        let subscription = store.subscribe(&temple_web(), listener).expect("subscribed");

        assert_eq!(next_event(&mut events).await, StoreEvent::Snapshot(None));
        assert!(matches!(
            next_event(&mut events).await,
            StoreEvent::Failed(StoreError::Connection(_))
        ));

        // Reconnect attempts keep failing, but the outage was already reported.
        tokio::time::sleep(Duration::from_millis(100)).await;
        subscription.cancel();
        assert!(events.try_recv().is_err());
    }
}
