// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Store**: Database location and collection path
//! - **Slideshow**: Carousel timing and slide count
//! - **Network**: Timeouts and reconnect backoff
//! - **Layout**: Grid breakpoints and tile sizes

// ==========================================================================
// Store Defaults
// ==========================================================================

/// Realtime database holding the gallery.
pub const DEFAULT_DATABASE_URL: &str = "https://dazzle-b3038-default-rtdb.firebaseio.com";

/// Path of the image collection inside the database.
pub const DEFAULT_COLLECTION_PATH: &str = "temple_web";

// ==========================================================================
// Slideshow Defaults
// ==========================================================================

/// Time a background slide stays before advancing (milliseconds).
pub const DEFAULT_BACKGROUND_INTERVAL_MS: u64 = 4_000;

/// Background crossfade duration (milliseconds).
pub const DEFAULT_BACKGROUND_TRANSITION_MS: u64 = 3_000;

/// Time a featured slide stays before advancing (milliseconds).
pub const DEFAULT_FEATURED_INTERVAL_MS: u64 = 3_000;

/// Featured crossfade duration (milliseconds).
pub const DEFAULT_FEATURED_TRANSITION_MS: u64 = 1_000;

/// Minimum slide interval (milliseconds).
pub const MIN_SLIDE_INTERVAL_MS: u64 = 1_000;

/// Maximum slide interval (milliseconds).
pub const MAX_SLIDE_INTERVAL_MS: u64 = 60_000;

/// Maximum crossfade duration (milliseconds). Zero disables the fade.
pub const MAX_TRANSITION_MS: u64 = 10_000;

/// Default number of leading images shown by the carousels.
pub const DEFAULT_MAX_SLIDES: usize = 5;

// ==========================================================================
// Network Defaults
// ==========================================================================

/// TCP/TLS connect timeout (seconds).
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Whole-request timeout for one image download (seconds).
pub const DEFAULT_IMAGE_TIMEOUT_SECS: u64 = 30;

/// Minimum timeout (seconds).
pub const MIN_TIMEOUT_SECS: u64 = 1;

/// Maximum timeout (seconds).
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// First reconnect delay after the stream drops (milliseconds).
pub const DEFAULT_RECONNECT_INITIAL_MS: u64 = 1_000;

/// Upper bound of the reconnect delay (milliseconds).
pub const DEFAULT_RECONNECT_MAX_MS: u64 = 30_000;

/// Minimum reconnect delay (milliseconds).
pub const MIN_RECONNECT_MS: u64 = 100;

/// Maximum reconnect delay (milliseconds).
pub const MAX_RECONNECT_MS: u64 = 600_000;

// ==========================================================================
// Layout Defaults
// ==========================================================================

/// Below this window width the grid uses one column (logical pixels).
pub const SINGLE_COLUMN_MAX_WIDTH: f32 = 600.0;

/// Below this window width the grid uses two columns (logical pixels).
pub const TWO_COLUMN_MAX_WIDTH: f32 = 900.0;

/// Grid tile height on regular windows.
pub const TILE_HEIGHT: f32 = 300.0;

/// Grid tile height on narrow windows.
pub const TILE_HEIGHT_NARROW: f32 = 250.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slideshow_defaults_are_within_bounds() {
        for interval in [DEFAULT_BACKGROUND_INTERVAL_MS, DEFAULT_FEATURED_INTERVAL_MS] {
            assert!((MIN_SLIDE_INTERVAL_MS..=MAX_SLIDE_INTERVAL_MS).contains(&interval));
        }
        for transition in [DEFAULT_BACKGROUND_TRANSITION_MS, DEFAULT_FEATURED_TRANSITION_MS] {
            assert!(transition <= MAX_TRANSITION_MS);
        }
    }

    #[test]
    fn network_defaults_are_within_bounds() {
        assert!((MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&DEFAULT_CONNECT_TIMEOUT_SECS));
        assert!((MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&DEFAULT_IMAGE_TIMEOUT_SECS));
        assert!(DEFAULT_RECONNECT_INITIAL_MS <= DEFAULT_RECONNECT_MAX_MS);
        assert!(DEFAULT_RECONNECT_INITIAL_MS >= MIN_RECONNECT_MS);
    }

    #[test]
    fn layout_breakpoints_are_ordered() {
        assert!(SINGLE_COLUMN_MAX_WIDTH < TWO_COLUMN_MAX_WIDTH);
        assert!(TILE_HEIGHT_NARROW < TILE_HEIGHT);
    }
}
