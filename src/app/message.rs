// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::ui::gallery;
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    Gallery(gallery::Message),
    Tick(Instant),
    WindowResized(iced::Size),
    EscapePressed,
    CloseRequested,
}

/// Runtime flags passed from the launcher.
#[derive(Debug, Default, Clone)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `hi`).
    pub lang: Option<String>,
    /// Overrides the database URL from `settings.toml`.
    pub database_url: Option<String>,
    /// Overrides the collection path from `settings.toml`.
    pub collection: Option<String>,
    /// Serve this JSON file through the in-memory store instead of the
    /// network.
    pub snapshot: Option<PathBuf>,
    /// Write the session's diagnostic events to this JSON file on exit.
    pub diagnostics_report: Option<PathBuf>,
}
