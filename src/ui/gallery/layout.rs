// SPDX-License-Identifier: MPL-2.0
//! Responsive grid geometry.

use crate::app::config::{
    SINGLE_COLUMN_MAX_WIDTH, TILE_HEIGHT, TILE_HEIGHT_NARROW, TWO_COLUMN_MAX_WIDTH,
};
use std::ops::Range;

/// Number of grid columns for a window `width` in logical pixels.
#[must_use]
pub fn columns_for_width(width: f32) -> usize {
    if width < SINGLE_COLUMN_MAX_WIDTH {
        1
    } else if width < TWO_COLUMN_MAX_WIDTH {
        2
    } else {
        3
    }
}

/// Tile height for a window `width` in logical pixels.
#[must_use]
pub fn tile_height_for_width(width: f32) -> f32 {
    if is_narrow(width) {
        TILE_HEIGHT_NARROW
    } else {
        TILE_HEIGHT
    }
}

/// Phone-sized layout.
#[must_use]
pub fn is_narrow(width: f32) -> bool {
    width < SINGLE_COLUMN_MAX_WIDTH
}

/// Index ranges of `count` tiles laid out `columns` per row.
pub fn rows(count: usize, columns: usize) -> impl Iterator<Item = Range<usize>> {
    let columns = columns.max(1);
    (0..count)
        .step_by(columns)
        .map(move |start| start..(start + columns).min(count))
}
