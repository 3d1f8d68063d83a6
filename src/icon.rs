// SPDX-License-Identifier: MPL-2.0
//! Window icon loading.
//! Rasterizes the embedded brand SVG at runtime into an RGBA window icon.
//! Falls back to `None` if rendering fails.

use iced::window::{icon, Icon};
use resvg::usvg;

/// Edge length of the rasterized icon.
pub const ICON_SIZE: u32 = 128;

const SVG_SOURCE: &str = include_str!("../assets/branding/shilpkar_gallery.svg");

/// Rasterize the embedded SVG to `size`x`size` RGBA pixels.
/// Returns `None` if parsing or rendering fails.
pub fn rasterize(size: u32) -> Option<Vec<u8>> {
    let tree = usvg::Tree::from_data(SVG_SOURCE.as_bytes(), &usvg::Options::default()).ok()?;

    let orig_size = tree.size();
    let scale_x = size as f32 / orig_size.width();
    let scale_y = size as f32 / orig_size.height();
    let transform = tiny_skia::Transform::from_scale(scale_x, scale_y);

    let mut pixmap = tiny_skia::Pixmap::new(size, size)?;
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    Some(pixmap.data().to_vec())
}

pub fn load_window_icon() -> Option<Icon> {
    let pixels = rasterize(ICON_SIZE)?;
    icon::from_rgba(pixels, ICON_SIZE, ICON_SIZE).ok()
}
