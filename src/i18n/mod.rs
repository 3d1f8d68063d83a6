// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! This module provides localization capabilities using the Fluent localization system.
//!
//! # Features
//!
//! - Automatic locale detection from CLI, config, or system settings
//! - Translation files embedded in the binary
//! - Message arguments (counts, names)
//! - Fallback to default locale when translations are missing

pub mod fluent;

pub use fluent::{I18n, DEFAULT_LOCALE};
