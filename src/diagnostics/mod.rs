// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for recording gallery activity.
//!
//! Events are echoed to stderr with a level prefix and kept in a
//! memory-bounded circular buffer. When the window closes the buffer is
//! summarized on stderr and, with `--diagnostics-report`, written as JSON.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Generic ring buffer with configurable capacity
//! - [`DiagnosticEvent`]: A recorded event and its capture time
//! - [`DiagnosticsCollector`]: Owns the buffer, drained on each UI tick
//! - [`DiagnosticsHandle`]: Cloneable sender usable from async tasks
//! - [`DiagnosticReport`]: JSON export of a session

mod buffer;
mod collector;
mod events;
mod report;

pub use buffer::{buffer_capacity_bounds, BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{DiagnosticEvent, DiagnosticEventKind, Severity};
pub use report::{DiagnosticReport, ExportError, ReportSummary, SerializableEvent};
