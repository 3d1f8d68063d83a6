// SPDX-License-Identifier: MPL-2.0
//! Gallery component encapsulating state and update logic.

use crate::app::config::SlideshowConfig;
use crate::application::sync::GalleryState;
use crate::domain::gallery::{ImageRecord, SlideLimit};
use crate::domain::selection::{ModalTarget, ScrollCommand, Selection};
use crate::error::NetworkError;
use crate::i18n::fluent::I18n;
use crate::media::ImageCache;
use crate::ui::carousel::{self, Carousel};
use crate::ui::design_tokens::motion;
use iced::widget::image::Handle;
use iced::widget::scrollable::RelativeOffset;
use iced::widget::{operation, Id};
use iced::{Element, Task};
use std::time::Instant;

/// Identifier of the page scrollable.
pub const SCROLLABLE_ID: &str = "gallery-page-scrollable";

/// Messages emitted by gallery widgets and fed by the app.
#[derive(Debug, Clone)]
pub enum Message {
    /// A new state published by the data sync.
    Synced(GalleryState),
    ImageFetched {
        url: String,
        result: Result<Handle, NetworkError>,
    },
    Tick(Instant),
    /// Open the image at this index of the current list.
    Select(usize),
    Modal(ModalTarget),
    /// Escape pressed.
    CloseRequested,
    Featured(carousel::Message),
    Scrolled(RelativeOffset),
}

/// Side effects the application should perform after handling a message.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Start downloads for these URLs.
    FetchImages(Vec<String>),
    ImageOpened(String),
    ImageClosed,
}

/// Environment information required to render the gallery.
pub struct ViewEnv<'a> {
    pub i18n: &'a I18n,
    /// Window width in logical pixels.
    pub window_width: f32,
}

/// Complete gallery component state.
pub struct State {
    pub(super) gallery: GalleryState,
    pub(super) selection: Selection,
    pub(super) images: ImageCache,
    pub(super) background: Carousel,
    pub(super) featured: Carousel,
    pub(super) slide_limit: SlideLimit,
    /// Page offset while scrolling is live.
    scroll: RelativeOffset,
    /// Offset saved when the lightbox suspended scrolling.
    saved_scroll: Option<RelativeOffset>,
    pub(super) started: Instant,
    pub(super) now: Instant,
}

impl State {
    #[must_use]
    pub fn new(slideshow: &SlideshowConfig, now: Instant) -> Self {
        Self {
            gallery: GalleryState::default(),
            selection: Selection::default(),
            images: ImageCache::new(),
            background: Carousel::new(
                slideshow.background_interval(),
                slideshow.background_transition(),
                now,
            ),
            featured: Carousel::new(
                slideshow.featured_interval(),
                slideshow.featured_transition(),
                now,
            )
            .pause_on_hover(),
            slide_limit: slideshow.slide_limit(),
            scroll: RelativeOffset::START,
            saved_scroll: None,
            started: now,
            now,
        }
    }

    #[must_use]
    pub fn gallery(&self) -> &GalleryState {
        &self.gallery
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn images(&self) -> &ImageCache {
        &self.images
    }

    /// Number of carousel slides for the current list.
    #[must_use]
    pub fn slide_count(&self) -> usize {
        self.slide_limit.slides_for(self.gallery.images.len())
    }

    /// True while scrolling is suspended by the lightbox.
    #[must_use]
    pub fn is_scroll_suspended(&self) -> bool {
        self.saved_scroll.is_some()
    }

    /// True while something on screen moves faster than the idle tick.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.gallery.loading
            || self.images.is_animating(self.now)
            || self.background.is_animating(self.now)
            || self.featured.is_animating(self.now)
    }

    /// Page gradient phase in `[0, 1)`.
    #[must_use]
    pub fn background_phase(&self) -> f32 {
        let period = motion::GRADIENT_PERIOD.as_secs_f32();
        let elapsed = self.now.saturating_duration_since(self.started).as_secs_f32();
        (elapsed % period) / period
    }

    pub fn handle_message(&mut self, message: Message) -> (Effect, Task<Message>) {
        match message {
            Message::Synced(state) => {
                self.gallery = state;
                let to_fetch = self
                    .images
                    .sync(self.gallery.images.iter().map(|image| image.url.as_str()));
                if to_fetch.is_empty() {
                    (Effect::None, Task::none())
                } else {
                    (Effect::FetchImages(to_fetch), Task::none())
                }
            }
            Message::ImageFetched { url, result } => {
                // Results for URLs dropped by a later snapshot are discarded.
                self.images.resolve(&url, result, Instant::now());
                (Effect::None, Task::none())
            }
            Message::Tick(now) => {
                self.now = now;
                let count = self.slide_count();
                self.background.tick(now, count);
                self.featured.tick(now, count);
                (Effect::None, Task::none())
            }
            Message::Select(index) => match self.gallery.images.get(index).cloned() {
                Some(image) => self.open(image),
                None => (Effect::None, Task::none()),
            },
            Message::Modal(target) => {
                let command = self.selection.click(target);
                self.closed(command)
            }
            Message::CloseRequested => {
                let command = self.selection.close();
                self.closed(command)
            }
            Message::Featured(message) => {
                let count = self.slide_count();
                self.featured.update(message, Instant::now(), count);
                (Effect::None, Task::none())
            }
            Message::Scrolled(offset) => {
                if !self.is_scroll_suspended() {
                    self.scroll = offset;
                }
                (Effect::None, Task::none())
            }
        }
    }

    pub fn view<'a>(&'a self, env: ViewEnv<'a>) -> Element<'a, Message> {
        super::view::view(self, env)
    }

    fn open(&mut self, image: ImageRecord) -> (Effect, Task<Message>) {
        let id = image.id.clone();
        let command = self.selection.select(image);
        let task = self.execute(command);
        (Effect::ImageOpened(id), task)
    }

    fn closed(&mut self, command: Option<ScrollCommand>) -> (Effect, Task<Message>) {
        match command {
            Some(command) => (Effect::ImageClosed, self.execute(Some(command))),
            None => (Effect::None, Task::none()),
        }
    }

    fn execute(&mut self, command: Option<ScrollCommand>) -> Task<Message> {
        match command {
            Some(ScrollCommand::Suspend) => {
                self.saved_scroll = Some(self.scroll);
                Task::none()
            }
            Some(ScrollCommand::Resume) => match self.saved_scroll.take() {
                Some(offset) => {
                    self.scroll = offset;
                    operation::snap_to(Id::new(SCROLLABLE_ID), offset)
                }
                None => Task::none(),
            },
            None => Task::none(),
        }
    }
}
