// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.

use super::{App, Message};
use crate::application::sync::{GalleryState, SyncError};
use crate::diagnostics::{DiagnosticEventKind, DiagnosticsHandle};
use crate::media;
use crate::ui::gallery::{self, Effect};
use iced::Task;

/// Routes a top-level message.
pub fn handle(app: &mut App, message: Message) -> Task<Message> {
    match message {
        Message::Gallery(message) => handle_gallery_message(app, message),
        Message::Tick(now) => {
            app.diagnostics.process_pending();
            handle_gallery_message(app, gallery::Message::Tick(now))
        }
        Message::WindowResized(size) => {
            app.window_width = size.width;
            Task::none()
        }
        Message::EscapePressed => handle_gallery_message(app, gallery::Message::CloseRequested),
        Message::CloseRequested => {
            finish_session(app);
            iced::exit()
        }
    }
}

/// Flushes the diagnostics buffer and reports the session before exit.
///
/// The summary always goes to stderr; the JSON report only when a path was
/// given on the command line.
fn finish_session(app: &mut App) {
    app.diagnostics.process_pending();
    eprintln!("[INFO] Session diagnostics: {}", app.diagnostics.summary());

    if let Some(path) = &app.report_path {
        match app.diagnostics.export_to_file(path) {
            Ok(path) => eprintln!("[INFO] Diagnostics report written to {}", path.display()),
            Err(error) => eprintln!("[ERROR] Diagnostics report failed: {error}"),
        }
    }
}

fn handle_gallery_message(app: &mut App, message: gallery::Message) -> Task<Message> {
    if let gallery::Message::Synced(state) = &message {
        for event in sync_events(state) {
            app.diagnostics.log(event);
        }
    }

    let (effect, task) = app.gallery.handle_message(message);
    let task = task.map(Message::Gallery);

    match effect {
        Effect::None => task,
        Effect::FetchImages(urls) => {
            let downloads = urls.into_iter().map(|url| {
                fetch_image(app.client.clone(), url, app.diagnostics.handle())
            });
            Task::batch(std::iter::once(task).chain(downloads))
        }
        Effect::ImageOpened(id) => {
            app.diagnostics.log(DiagnosticEventKind::ImageOpened { id });
            task
        }
        Effect::ImageClosed => {
            app.diagnostics.log(DiagnosticEventKind::ImageClosed);
            task
        }
    }
}

/// Diagnostic events recorded for a published gallery state: one for the
/// outcome, then one per skipped entry.
fn sync_events(state: &GalleryState) -> Vec<DiagnosticEventKind> {
    let outcome = match &state.error {
        None => DiagnosticEventKind::SnapshotReceived {
            image_count: state.images.len(),
        },
        Some(SyncError::SnapshotParse(e)) => DiagnosticEventKind::SnapshotParseFailed {
            message: e.to_string(),
        },
        Some(SyncError::Subscription(e)) => DiagnosticEventKind::SubscriptionFailed {
            message: e.to_string(),
        },
    };

    std::iter::once(outcome)
        .chain(state.skipped.iter().map(|e| DiagnosticEventKind::SnapshotEntrySkipped {
            message: e.to_string(),
        }))
        .collect()
}

fn fetch_image(
    client: reqwest::Client,
    url: String,
    diagnostics: DiagnosticsHandle,
) -> Task<Message> {
    let request_url = url.clone();
    Task::perform(
        async move {
            let result = media::fetch(client, request_url.clone()).await;
            if let Err(error) = &result {
                diagnostics.log(DiagnosticEventKind::ImageFetchFailed {
                    url: request_url,
                    message: error.to_string(),
                });
            }
            result
        },
        move |result| Message::Gallery(gallery::Message::ImageFetched { url, result }),
    )
}
