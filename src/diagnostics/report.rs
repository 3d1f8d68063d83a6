// SPDX-License-Identifier: MPL-2.0
//! Session report written when the window closes.
//!
//! The report lists the buffered events with their offset from the start of
//! the session, and a per-severity count.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{DiagnosticEvent, DiagnosticEventKind, Severity};

/// Errors that can occur while writing a report.
#[derive(Debug)]
pub enum ExportError {
    Io(io::Error),
    Serialization(serde_json::Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Serialization(err) => write!(f, "serialization error: {err}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialization(err) => Some(err),
        }
    }
}

impl From<io::Error> for ExportError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err)
    }
}

/// One event as written to the report.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SerializableEvent {
    /// Milliseconds since the session started.
    pub timestamp_ms: u64,
    pub severity: Severity,
    #[serde(flatten)]
    pub kind: DiagnosticEventKind,
}

impl SerializableEvent {
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Session length in ms fits in u64
    pub fn new(event: &DiagnosticEvent, session_start: Instant) -> Self {
        Self {
            timestamp_ms: event
                .timestamp
                .saturating_duration_since(session_start)
                .as_millis() as u64,
            severity: event.severity(),
            kind: event.kind.clone(),
        }
    }
}

/// Event counts per severity.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct ReportSummary {
    pub info: usize,
    pub warnings: usize,
    pub errors: usize,
}

impl ReportSummary {
    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a DiagnosticEvent>) -> Self {
        events
            .into_iter()
            .fold(Self::default(), |mut summary, event| {
                match event.severity() {
                    Severity::Info => summary.info += 1,
                    Severity::Warning => summary.warnings += 1,
                    Severity::Error => summary.errors += 1,
                }
                summary
            })
    }
}

impl fmt::Display for ReportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} events ({} warnings, {} errors)",
            self.info + self.warnings + self.errors,
            self.warnings,
            self.errors
        )
    }
}

/// A complete session report ready for JSON export.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DiagnosticReport {
    pub app_version: String,
    /// RFC 3339.
    pub session_started_at: String,
    /// RFC 3339.
    pub generated_at: String,
    pub summary: ReportSummary,
    pub events: Vec<SerializableEvent>,
}

impl DiagnosticReport {
    #[must_use]
    pub fn new<'a>(
        session_started_at: DateTime<Utc>,
        session_start: Instant,
        events: impl IntoIterator<Item = &'a DiagnosticEvent> + Clone,
    ) -> Self {
        Self {
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            session_started_at: session_started_at.to_rfc3339(),
            generated_at: Utc::now().to_rfc3339(),
            summary: ReportSummary::from_events(events.clone()),
            events: events
                .into_iter()
                .map(|event| SerializableEvent::new(event, session_start))
                .collect(),
        }
    }
}

/// Writes `content` next to `path` first, then renames it into place.
///
/// # Errors
///
/// Returns the I/O error of the write or the rename.
pub fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, content)?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }
    Ok(())
}
