// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core gallery types and rules.
//!
//! This module contains pure domain types, value objects, and business rules.
//! Apart from `serde`/`serde_json` (the record payload format), it has no
//! dependencies on external crates so it stays trivially testable.
//!
//! # Modules
//!
//! - [`gallery`]: Gallery records and value objects ([`ImageRecord`](gallery::ImageRecord),
//!   [`CollectionPath`](gallery::CollectionPath), [`SlideLimit`](gallery::SlideLimit))
//! - [`selection`]: Lightbox selection state machine ([`Selection`](selection::Selection),
//!   [`ScrollCommand`](selection::ScrollCommand))

pub mod gallery;
pub mod selection;
