// SPDX-License-Identifier: MPL-2.0
//! Lightbox selection state machine.
//!
//! The gallery shows at most one image full-screen. Transitions never touch
//! the window directly: entering or leaving the viewing state returns a
//! [`ScrollCommand`] that the presentation layer executes.

use super::gallery::ImageRecord;

/// Side effect requested by a selection transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollCommand {
    /// Stop the page from scrolling while the lightbox is open.
    Suspend,
    /// Give scrolling back to the page.
    Resume,
}

/// Where a click inside the open lightbox landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalTarget {
    /// The dimmed area around the image.
    Backdrop,
    /// The explicit close control.
    CloseButton,
    /// The displayed image itself.
    Image,
}

/// Which image, if any, is shown full-screen.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Selection {
    #[default]
    Idle,
    Viewing(ImageRecord),
}

impl Selection {
    /// Shows `image` full-screen.
    ///
    /// From `Idle` this requests [`ScrollCommand::Suspend`]. While already
    /// viewing, the image is replaced in place and no command is returned.
    pub fn select(&mut self, image: ImageRecord) -> Option<ScrollCommand> {
        let was_idle = matches!(self, Selection::Idle);
        *self = Selection::Viewing(image);
        was_idle.then_some(ScrollCommand::Suspend)
    }

    /// Closes the lightbox. No-op when nothing is selected.
    pub fn close(&mut self) -> Option<ScrollCommand> {
        match std::mem::take(self) {
            Selection::Idle => None,
            Selection::Viewing(_) => Some(ScrollCommand::Resume),
        }
    }

    /// Handles a click inside the open lightbox.
    ///
    /// Clicks on the image are swallowed so they never close it.
    pub fn click(&mut self, target: ModalTarget) -> Option<ScrollCommand> {
        match target {
            ModalTarget::Backdrop | ModalTarget::CloseButton => self.close(),
            ModalTarget::Image => None,
        }
    }

    /// Returns the image being viewed.
    #[must_use]
    pub fn selected(&self) -> Option<&ImageRecord> {
        match self {
            Selection::Idle => None,
            Selection::Viewing(image) => Some(image),
        }
    }

    #[must_use]
    pub fn is_viewing(&self) -> bool {
        matches!(self, Selection::Viewing(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> ImageRecord {
        ImageRecord::new(id, format!("https://img/{id}.jpg"))
    }

    #[test]
    fn select_from_idle_suspends_scroll() {
        let mut selection = Selection::default();
        assert_eq!(selection.select(record("a")), Some(ScrollCommand::Suspend));
        assert_eq!(selection.selected(), Some(&record("a")));
    }

    #[test]
    fn select_while_viewing_replaces_without_command() {
        let mut selection = Selection::default();
        selection.select(record("a"));

        assert_eq!(selection.select(record("b")), None);
        assert_eq!(selection.selected(), Some(&record("b")));
    }

    #[test]
    fn backdrop_click_closes_and_resumes() {
        let mut selection = Selection::default();
        selection.select(record("a"));

        assert_eq!(
            selection.click(ModalTarget::Backdrop),
            Some(ScrollCommand::Resume)
        );
        assert!(!selection.is_viewing());
    }

    #[test]
    fn close_button_closes() {
        let mut selection = Selection::default();
        selection.select(record("a"));

        assert_eq!(
            selection.click(ModalTarget::CloseButton),
            Some(ScrollCommand::Resume)
        );
        assert_eq!(selection, Selection::Idle);
    }

    #[test]
    fn image_click_keeps_viewing() {
        let mut selection = Selection::default();
        selection.select(record("a"));

        assert_eq!(selection.click(ModalTarget::Image), None);
        assert_eq!(selection.selected(), Some(&record("a")));
    }

    #[test]
    fn close_when_idle_is_noop() {
        let mut selection = Selection::default();
        assert_eq!(selection.close(), None);
        assert_eq!(selection.click(ModalTarget::Backdrop), None);
        assert_eq!(selection, Selection::Idle);
    }
}
