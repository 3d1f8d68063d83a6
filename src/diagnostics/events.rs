// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for gallery activity.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::time::Instant;

/// How serious an event is. Selects the stderr prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Severity::Info => "[INFO]",
            Severity::Warning => "[WARN]",
            Severity::Error => "[ERROR]",
        }
    }
}

/// The different kinds of diagnostic events.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// A snapshot was converted successfully.
    SnapshotReceived { image_count: usize },

    /// A snapshot could not be converted and the list was emptied.
    SnapshotParseFailed { message: String },

    /// One snapshot entry was left out of the list.
    SnapshotEntrySkipped { message: String },

    /// The database stream sent an event the client does not handle.
    StreamEventIgnored { detail: String },

    /// The store subscription reported an error.
    SubscriptionFailed { message: String },

    /// An image download failed.
    ImageFetchFailed { url: String, message: String },

    /// The lightbox opened on an image.
    ImageOpened { id: String },

    /// The lightbox closed.
    ImageClosed,

    /// Startup fell back to defaults (unreadable config, HTTP client setup).
    StartupWarning { message: String },
}

impl DiagnosticEventKind {
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticEventKind::SnapshotReceived { .. }
            | DiagnosticEventKind::StreamEventIgnored { .. }
            | DiagnosticEventKind::ImageOpened { .. }
            | DiagnosticEventKind::ImageClosed => Severity::Info,
            DiagnosticEventKind::SnapshotParseFailed { .. }
            | DiagnosticEventKind::SnapshotEntrySkipped { .. }
            | DiagnosticEventKind::ImageFetchFailed { .. }
            | DiagnosticEventKind::StartupWarning { .. } => Severity::Warning,
            DiagnosticEventKind::SubscriptionFailed { .. } => Severity::Error,
        }
    }
}

impl fmt::Display for DiagnosticEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticEventKind::SnapshotReceived { image_count } => {
                write!(f, "Gallery snapshot received ({image_count} images)")
            }
            DiagnosticEventKind::SnapshotParseFailed { message } => {
                write!(f, "Gallery snapshot rejected: {message}")
            }
            DiagnosticEventKind::SnapshotEntrySkipped { message } => {
                write!(f, "Gallery entry skipped: {message}")
            }
            DiagnosticEventKind::StreamEventIgnored { detail } => {
                write!(f, "Ignoring database stream event: {detail}")
            }
            DiagnosticEventKind::SubscriptionFailed { message } => {
                write!(f, "Gallery subscription failed: {message}")
            }
            DiagnosticEventKind::ImageFetchFailed { url, message } => {
                write!(f, "Failed to fetch image {url}: {message}")
            }
            DiagnosticEventKind::ImageOpened { id } => write!(f, "Opened image {id}"),
            DiagnosticEventKind::ImageClosed => write!(f, "Closed image"),
            DiagnosticEventKind::StartupWarning { message } => write!(f, "{message}"),
        }
    }
}

/// A diagnostic event with its capture time.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// Monotonic capture time, for ordering.
    pub timestamp: Instant,
    /// Wall-clock capture time, for display.
    pub recorded_at: DateTime<Utc>,
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            recorded_at: Utc::now(),
            kind,
        }
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    /// Line written to stderr for this event.
    #[must_use]
    pub fn log_line(&self) -> String {
        format!(
            "{} {} {}",
            self.severity().prefix(),
            self.recorded_at.format("%H:%M:%S"),
            self.kind
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_are_not_info() {
        let parse = DiagnosticEventKind::SnapshotParseFailed {
            message: "bad".into(),
        };
        let subscription = DiagnosticEventKind::SubscriptionFailed {
            message: "reset".into(),
        };
        assert_eq!(parse.severity(), Severity::Warning);
        assert_eq!(subscription.severity(), Severity::Error);
        assert_eq!(DiagnosticEventKind::ImageClosed.severity(), Severity::Info);
    }

    #[test]
    fn log_line_starts_with_level_prefix() {
        let event = DiagnosticEvent::new(DiagnosticEventKind::ImageFetchFailed {
            url: "https://img/a.jpg".into(),
            message: "HTTP status: 404".into(),
        });
        let line = event.log_line();
        assert!(line.starts_with("[WARN] "));
        assert!(line.ends_with("Failed to fetch image https://img/a.jpg: HTTP status: 404"));
    }

    #[test]
    fn skipped_entries_and_ignored_stream_events_are_logged() {
        let skipped = DiagnosticEventKind::SnapshotEntrySkipped {
            message: "entry 'c' has no usable 'url'".into(),
        };
        assert_eq!(skipped.severity(), Severity::Warning);
        assert_eq!(
            skipped.to_string(),
            "Gallery entry skipped: entry 'c' has no usable 'url'"
        );

        let ignored = DiagnosticEventKind::StreamEventIgnored {
            detail: "rules_debug".into(),
        };
        assert_eq!(ignored.severity(), Severity::Info);
    }

    #[test]
    fn snapshot_received_mentions_count() {
        let kind = DiagnosticEventKind::SnapshotReceived { image_count: 12 };
        assert_eq!(kind.to_string(), "Gallery snapshot received (12 images)");
    }
}
