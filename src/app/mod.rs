// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration.
//!
//! The `App` struct wires together the gallery page, the data sync, image
//! downloads, localization and diagnostics, and translates component effects
//! into tasks.

pub mod config;
mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::application::port::store::{ImageStore, StoreError};
use crate::application::sync::{GalleryDataSync, GalleryState, SyncError};
use crate::diagnostics::{
    BufferCapacity, DiagnosticEventKind, DiagnosticsCollector, DiagnosticsHandle,
};
use crate::i18n::fluent::I18n;
use crate::infrastructure::{FirebaseStore, FirebaseStoreConfig, MemoryStore};
use crate::media;
use crate::ui::gallery;
use crate::ui::theming::AppTheme;
use config::Config;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    theme: AppTheme,
    gallery: gallery::State,
    /// `None` when no store could be set up; the gallery then shows the
    /// failure state.
    sync: Option<GalleryDataSync>,
    client: reqwest::Client,
    window_width: f32,
    diagnostics: DiagnosticsCollector,
    /// Where the session report goes when the window closes.
    report_path: Option<PathBuf>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("sync", &self.sync)
            .field("images", &self.gallery.gallery().images.len())
            .field("loading", &self.gallery.gallery().loading)
            .finish()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 800;
pub const WINDOW_DEFAULT_WIDTH: u32 = 1100;
pub const MIN_WINDOW_HEIGHT: u32 = 480;
pub const MIN_WINDOW_WIDTH: u32 = 360;

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    let icon = crate::icon::load_window_icon();

    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        icon,
        // Closing goes through `Message::CloseRequested` so the session
        // report can be written first.
        exit_on_close_request: false,
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    // iced 0.14 requires a `Fn` boot closure; flags are cloned per call.
    let boot = move || App::new(flags.clone());

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

/// Applies command-line overrides on top of the loaded configuration.
pub fn apply_overrides(config: &mut Config, flags: &Flags) {
    if let Some(url) = &flags.database_url {
        config.store.database_url = Some(url.clone());
    }
    if let Some(collection) = &flags.collection {
        config.store.collection_path = Some(collection.clone());
    }
}

/// Builds the data sync selected by `flags` and `config`.
///
/// Stream events the network store skips are reported to `diagnostics`.
///
/// # Errors
///
/// Returns the store error the gallery should display when no store can be
/// set up (malformed collection path, bad URL, unreadable snapshot file).
pub fn connect(
    config: &Config,
    flags: &Flags,
    diagnostics: DiagnosticsHandle,
) -> Result<GalleryDataSync, StoreError> {
    let path = config
        .store
        .collection_path()
        .map_err(|e| StoreError::Connection(e.to_string()))?;

    let store: Arc<dyn ImageStore> = match &flags.snapshot {
        Some(file) => Arc::new(
            MemoryStore::from_snapshot_file(&path, file)
                .map_err(|e| StoreError::Connection(e.to_string()))?,
        ),
        None => {
            let mut store_config = FirebaseStoreConfig::new(config.store.database_url())
                .with_auth_from_env();
            store_config.connect_timeout = config.network.connect_timeout();
            store_config.reconnect_initial = config.network.reconnect_initial();
            store_config.reconnect_max = config.network.reconnect_max();
            Arc::new(
                FirebaseStore::new(store_config)
                    .map_err(|e| StoreError::Connection(e.to_string()))?
                    .with_diagnostics(diagnostics),
            )
        }
    };

    Ok(GalleryDataSync::new(store, path))
}

impl App {
    /// Initializes application state from the configuration and `flags`.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (mut config, config_warning) = config::load();
        apply_overrides(&mut config, &flags);

        let i18n = I18n::new(flags.lang.clone(), &config);
        let mut diagnostics = DiagnosticsCollector::new(BufferCapacity::default());

        if let Some(warning) = config_warning {
            diagnostics.log(DiagnosticEventKind::StartupWarning { message: warning });
        }

        let client = media::remote::build_client(
            config.network.connect_timeout(),
            config.network.image_timeout(),
        )
        .unwrap_or_else(|e| {
            diagnostics.log(DiagnosticEventKind::StartupWarning {
                message: format!("Image client setup failed: {e}"),
            });
            reqwest::Client::new()
        });

        let mut app = App {
            i18n,
            theme: AppTheme::new(config.general.theme_mode),
            gallery: gallery::State::new(&config.slideshow, Instant::now()),
            sync: None,
            client,
            window_width: WINDOW_DEFAULT_WIDTH as f32,
            diagnostics,
            report_path: flags.diagnostics_report.clone(),
        };

        // The window manager may not honor the requested size.
        let measure = window::latest()
            .and_then(window::size)
            .map(Message::WindowResized);

        let connected = match connect(&config, &flags, app.diagnostics.handle()) {
            Ok(sync) => {
                app.sync = Some(sync);
                Task::none()
            }
            Err(error) => app.update(Message::Gallery(gallery::Message::Synced(GalleryState {
                images: Vec::new(),
                loading: false,
                error: Some(SyncError::Subscription(error)),
                skipped: Vec::new(),
            }))),
        };

        (app, Task::batch([measure, connected]))
    }

    fn title(&self) -> String {
        self.i18n.tr("window-title")
    }

    fn theme(&self) -> Theme {
        self.theme.iced_theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::gallery_sync(self.sync.as_ref()),
            subscription::tick(self.gallery.is_animating()),
            subscription::window_events(),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        update::handle(self, message)
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            gallery: &self.gallery,
            window_width: self.window_width,
        })
    }
}
