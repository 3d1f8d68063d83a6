// SPDX-License-Identifier: MPL-2.0
//! Shared test helpers.
//!
//! Slide opacities, fade progress and spinner angles are floats; compare
//! them with the `approx` macros instead of `assert_eq!`.

pub use approx::assert_abs_diff_eq;
