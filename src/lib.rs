// SPDX-License-Identifier: MPL-2.0
//! `shilpkar_gallery` is a live photo gallery for the Shilpkar Shinde Bandhu
//! temple-sculpture workshop, built with the Iced GUI framework.
//!
//! Image records stream from a realtime database; the page shows them in
//! slideshows and a responsive grid, with a lightbox and bilingual contact
//! details.

#![doc(html_root_url = "https://docs.rs/shilpkar_gallery/0.1.0")]

pub mod app;
pub mod application;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod icon;
pub mod infrastructure;
pub mod media;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
