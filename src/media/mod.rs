// SPDX-License-Identifier: MPL-2.0
//! Media handling for gallery images.
//!
//! Gallery images live behind HTTP(S) URLs; [`remote`] downloads them on
//! demand and tracks their load state.

pub mod remote;

// Re-export commonly used types
pub use remote::{fetch, ImageCache, RemoteImage};
