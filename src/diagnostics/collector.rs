// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector for aggregating and storing diagnostic events.
//!
//! Events are echoed to stderr when recorded and kept in a circular buffer.
//! The buffer is summarized, and optionally exported, when the session ends.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender};

use super::report::{write_atomic, DiagnosticReport, ExportError, ReportSummary};
use super::{BufferCapacity, CircularBuffer, DiagnosticEvent, DiagnosticEventKind, Severity};

/// Default channel capacity for event buffering.
const DEFAULT_CHANNEL_CAPACITY: usize = 100;

/// Handle for sending diagnostic events to the collector.
///
/// This handle is cheap to clone and can be shared across threads.
/// Events are sent via a bounded channel to avoid blocking the UI thread.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    /// Echoes and queues an event.
    ///
    /// Non-blocking: the event is dropped from the buffer (but still echoed)
    /// if the channel is full.
    pub fn log(&self, kind: DiagnosticEventKind) {
        let event = DiagnosticEvent::new(kind);
        eprintln!("{}", event.log_line());
        let _ = self.event_tx.try_send(event);
    }
}

/// Central collector for diagnostic events.
pub struct DiagnosticsCollector {
    buffer: CircularBuffer<DiagnosticEvent>,
    event_rx: Receiver<DiagnosticEvent>,
    event_tx: Sender<DiagnosticEvent>,
    started_at: Instant,
    started_at_utc: DateTime<Utc>,
}

impl DiagnosticsCollector {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        let (event_tx, event_rx) = bounded(DEFAULT_CHANNEL_CAPACITY);
        Self {
            buffer: CircularBuffer::new(capacity),
            event_rx,
            event_tx,
            started_at: Instant::now(),
            started_at_utc: Utc::now(),
        }
    }

    /// Creates a handle for sending events to this collector.
    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Drains the event channel into the buffer.
    ///
    /// Call this on each UI tick.
    pub fn process_pending(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.buffer.push(event);
        }
    }

    /// Echoes an event and stores it directly, bypassing the channel.
    pub fn log(&mut self, kind: DiagnosticEventKind) {
        let event = DiagnosticEvent::new(kind);
        eprintln!("{}", event.log_line());
        self.buffer.push(event);
    }

    /// Number of stored events at or above `severity`.
    #[must_use]
    pub fn count_at_least(&self, severity: Severity) -> usize {
        self.buffer
            .iter()
            .filter(|event| event.severity() >= severity)
            .count()
    }

    /// Returns an iterator over all stored events (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter()
    }

    #[must_use]
    pub fn last(&self) -> Option<&DiagnosticEvent> {
        self.buffer.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Per-severity counts of the stored events.
    #[must_use]
    pub fn summary(&self) -> ReportSummary {
        ReportSummary::from_events(self.buffer.iter())
    }

    /// Builds a report from the current buffer contents.
    #[must_use]
    pub fn report(&self) -> DiagnosticReport {
        let events: Vec<&DiagnosticEvent> = self.buffer.iter().collect();
        DiagnosticReport::new(self.started_at_utc, self.started_at, events.iter().copied())
    }

    /// Exports the stored events as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.report())
    }

    /// Writes the report to `path` atomically.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Io` if file operations fail, or
    /// `ExportError::Serialization` if JSON serialization fails.
    pub fn export_to_file(&self, path: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        let path = path.as_ref();
        let json = self.export_json()?;
        write_atomic(path, &json)?;
        Ok(path.to_path_buf())
    }
}

impl Default for DiagnosticsCollector {
    fn default() -> Self {
        Self::new(BufferCapacity::default())
    }
}

impl std::fmt::Debug for DiagnosticsCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticsCollector")
            .field("events", &self.buffer.len())
            .field("capacity", &self.buffer.capacity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn handle_events_arrive_after_processing() {
        let mut collector = DiagnosticsCollector::default();
        let handle = collector.handle();

        handle.log(DiagnosticEventKind::SnapshotReceived { image_count: 2 });
        assert!(collector.is_empty());

        collector.process_pending();
        assert_eq!(collector.len(), 1);
        assert_eq!(
            collector.last().map(|event| &event.kind),
            Some(&DiagnosticEventKind::SnapshotReceived { image_count: 2 })
        );
    }

    #[test]
    fn handle_works_across_threads() {
        let mut collector = DiagnosticsCollector::default();
        let handle = collector.handle();

        std::thread::spawn(move || {
            handle.log(DiagnosticEventKind::ImageFetchFailed {
                url: "https://img/a.jpg".into(),
                message: "timeout".into(),
            });
        })
        .join()
        .expect("thread panicked");

        collector.process_pending();
        assert_eq!(collector.count_at_least(Severity::Warning), 1);
    }

    #[test]
    fn full_channel_drops_events_without_blocking() {
        let mut collector = DiagnosticsCollector::default();
        let handle = collector.handle();

        for _ in 0..DEFAULT_CHANNEL_CAPACITY + 5 {
            handle.log(DiagnosticEventKind::ImageClosed);
        }

        collector.process_pending();
        assert_eq!(collector.len(), DEFAULT_CHANNEL_CAPACITY);
    }

    #[test]
    fn direct_log_is_stored_immediately() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::new(50));
        collector.log(DiagnosticEventKind::ImageOpened { id: "a".into() });
        collector.log(DiagnosticEventKind::ImageClosed);
        collector.log(DiagnosticEventKind::SubscriptionFailed {
            message: "reset".into(),
        });

        assert_eq!(collector.len(), 3);
        assert_eq!(collector.count_at_least(Severity::Info), 3);
        assert_eq!(collector.count_at_least(Severity::Error), 1);
        assert_eq!(collector.iter().count(), 3);
        assert_eq!(collector.summary().errors, 1);
    }

    #[test]
    fn export_writes_buffered_events() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("session.json");

        let mut collector = DiagnosticsCollector::default();
        collector.log(DiagnosticEventKind::SnapshotReceived { image_count: 4 });
        collector.log(DiagnosticEventKind::ImageOpened { id: "k1".into() });

        let written = collector.export_to_file(&path).expect("exported");
        assert_eq!(written, path);

        let content = std::fs::read_to_string(&path).expect("readable");
        let value: serde_json::Value = serde_json::from_str(&content).expect("valid json");
        assert_eq!(value["events"].as_array().map(Vec::len), Some(2));
        assert_eq!(value["events"][1]["type"], "image_opened");
        assert_eq!(value["events"][1]["id"], "k1");
        assert_eq!(value["summary"]["info"], 2);
    }

    #[test]
    fn export_to_missing_directory_fails() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("missing").join("session.json");

        let collector = DiagnosticsCollector::default();
        assert!(matches!(
            collector.export_to_file(&path),
            Err(ExportError::Io(_))
        ));
    }
}
