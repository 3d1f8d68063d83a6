// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! Components follow the Elm-style "state down, messages up" pattern.
//!
//! - [`gallery`] - The gallery page and its lightbox
//! - [`carousel`] - Auto-advancing crossfade slideshow state
//! - [`contact`] - Static bilingual contact panels and business card
//! - [`title_bar`] - Branded title bar
//! - [`widgets`] - Custom Iced widgets (spinner)
//! - [`styles`] - Centralized styling (buttons, containers)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management

pub mod carousel;
pub mod contact;
pub mod design_tokens;
pub mod gallery;
pub mod styles;
pub mod theming;
pub mod title_bar;
pub mod widgets;
