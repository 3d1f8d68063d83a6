// SPDX-License-Identifier: MPL-2.0
//! Gallery newtypes.
//!
//! This module provides type-safe wrappers for gallery values,
//! ensuring they are always valid.

use std::fmt;

// =============================================================================
// CollectionPath
// =============================================================================

/// Characters the realtime database forbids inside a key.
const FORBIDDEN_KEY_CHARS: [char; 5] = ['.', '#', '$', '[', ']'];

/// Slash-separated location of the image collection inside the store.
///
/// Leading and trailing slashes are stripped. Empty segments and characters
/// the database does not allow in keys are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionPath(String);

impl CollectionPath {
    /// Parses and normalizes a collection path.
    pub fn new(raw: &str) -> Result<Self, InvalidCollectionPath> {
        let trimmed = raw.trim().trim_matches('/');
        if trimmed.is_empty() {
            return Err(InvalidCollectionPath::Empty);
        }

        for segment in trimmed.split('/') {
            if segment.is_empty() {
                return Err(InvalidCollectionPath::EmptySegment(raw.to_string()));
            }
            if let Some(c) = segment.chars().find(|c| FORBIDDEN_KEY_CHARS.contains(c)) {
                return Err(InvalidCollectionPath::ForbiddenCharacter(c));
            }
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the normalized path, without leading or trailing slashes.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reasons a collection path is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidCollectionPath {
    Empty,
    EmptySegment(String),
    ForbiddenCharacter(char),
}

impl fmt::Display for InvalidCollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidCollectionPath::Empty => write!(f, "collection path is empty"),
            InvalidCollectionPath::EmptySegment(raw) => {
                write!(f, "collection path '{raw}' contains an empty segment")
            }
            InvalidCollectionPath::ForbiddenCharacter(c) => {
                write!(f, "collection path contains forbidden character '{c}'")
            }
        }
    }
}

impl std::error::Error for InvalidCollectionPath {}

// =============================================================================
// Slide Limit Bounds
// =============================================================================

/// Slide limit bounds (1 to 20 slides).
pub mod slide_limit_bounds {
    /// Minimum number of slides.
    pub const MIN: usize = 1;
    /// Maximum number of slides.
    pub const MAX: usize = 20;
    /// Default number of slides.
    pub const DEFAULT: usize = 5;
}

// =============================================================================
// SlideLimit
// =============================================================================

/// How many leading images a carousel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideLimit(usize);

impl SlideLimit {
    /// Creates a new slide limit, clamping to the valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(slide_limit_bounds::MIN, slide_limit_bounds::MAX))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }

    /// Number of slides for a list of `available` images.
    #[must_use]
    pub fn slides_for(self, available: usize) -> usize {
        available.min(self.0)
    }
}

impl Default for SlideLimit {
    fn default() -> Self {
        Self(slide_limit_bounds::DEFAULT)
    }
}

// =============================================================================
// Tests
// =============================================================================
