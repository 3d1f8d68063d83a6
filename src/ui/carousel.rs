// SPDX-License-Identifier: MPL-2.0
//! Auto-advancing crossfade slideshow.
//!
//! The state only tracks indices and timing; the slides themselves are the
//! first `n` gallery images, so the caller passes the slide count on every
//! call. Counts may change between calls when a new snapshot arrives.

use std::time::{Duration, Instant};

/// User input accepted by an interactive carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Next,
    Previous,
    GoTo(usize),
    Hovered(bool),
}

/// Slide visible during a crossfade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    pub index: usize,
    pub opacity: f32,
}

#[derive(Debug, Clone)]
pub struct Carousel {
    current: usize,
    /// Slide fading out and when the fade started.
    fading: Option<(usize, Instant)>,
    last_advance: Instant,
    interval: Duration,
    transition: Duration,
    pause_on_hover: bool,
    hovered: bool,
}

impl Carousel {
    #[must_use]
    pub fn new(interval: Duration, transition: Duration, now: Instant) -> Self {
        Self {
            current: 0,
            fading: None,
            last_advance: now,
            interval,
            transition,
            pause_on_hover: false,
            hovered: false,
        }
    }

    /// Stops auto-advance while the pointer is over the carousel.
    #[must_use]
    pub fn pause_on_hover(mut self) -> Self {
        self.pause_on_hover = true;
        self
    }

    #[must_use]
    pub fn current(&self, count: usize) -> usize {
        if count == 0 {
            0
        } else {
            self.current.min(count - 1)
        }
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.pause_on_hover && self.hovered
    }

    /// Advances when the interval has elapsed. Returns true on advance.
    pub fn tick(&mut self, now: Instant, count: usize) -> bool {
        if let Some((_, started)) = self.fading {
            if now.saturating_duration_since(started) >= self.transition {
                self.fading = None;
            }
        }

        if count < 2 || self.is_paused() {
            return false;
        }
        if now.saturating_duration_since(self.last_advance) < self.interval {
            return false;
        }
        self.show((self.current(count) + 1) % count, now, count);
        true
    }

    pub fn update(&mut self, message: Message, now: Instant, count: usize) {
        match message {
            Message::Next if count > 0 => {
                self.show((self.current(count) + 1) % count, now, count);
            }
            Message::Previous if count > 0 => {
                self.show((self.current(count) + count - 1) % count, now, count);
            }
            Message::GoTo(index) if index < count => self.show(index, now, count),
            Message::Hovered(hovered) => {
                if self.hovered && !hovered {
                    // Leaving restarts a full interval.
                    self.last_advance = now;
                }
                self.hovered = hovered;
            }
            _ => {}
        }
    }

    /// Slides to draw, bottom first. Two layers while fading.
    #[must_use]
    pub fn layers(&self, now: Instant, count: usize) -> Vec<Layer> {
        if count == 0 {
            return Vec::new();
        }
        let current = self.current(count);

        match self.fading {
            Some((previous, started)) if previous < count && previous != current => {
                let progress = self.progress(now, started);
                if progress >= 1.0 {
                    vec![Layer {
                        index: current,
                        opacity: 1.0,
                    }]
                } else {
                    vec![
                        Layer {
                            index: previous,
                            opacity: 1.0 - progress,
                        },
                        Layer {
                            index: current,
                            opacity: progress,
                        },
                    ]
                }
            }
            _ => vec![Layer {
                index: current,
                opacity: 1.0,
            }],
        }
    }

    /// True while a crossfade is running.
    #[must_use]
    pub fn is_animating(&self, now: Instant) -> bool {
        self.fading
            .is_some_and(|(_, started)| self.progress(now, started) < 1.0)
    }

    fn show(&mut self, index: usize, now: Instant, count: usize) {
        let current = self.current(count);
        if index != current {
            self.fading = Some((current, now));
        }
        self.current = index;
        self.last_advance = now;
    }

    fn progress(&self, now: Instant, started: Instant) -> f32 {
        if self.transition.is_zero() {
            return 1.0;
        }
        (now.saturating_duration_since(started).as_secs_f32() / self.transition.as_secs_f32())
            .clamp(0.0, 1.0)
    }
}
