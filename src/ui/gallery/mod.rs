// SPDX-License-Identifier: MPL-2.0
//! Gallery page: background and featured slideshows, responsive grid,
//! count label, banner, contact panels and the lightbox.

pub mod component;
pub mod layout;
mod modal;
mod view;

pub use component::{Effect, Message, State, ViewEnv, SCROLLABLE_ID};
pub use layout::{columns_for_width, tile_height_for_width};
