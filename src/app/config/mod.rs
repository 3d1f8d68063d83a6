// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, stored in a
//! `settings.toml` file.
//!
//! # Configuration Sections
//!
//! The configuration is organized into logical sections:
//! - `[general]` - Language and theme mode
//! - `[store]` - Database URL and collection path
//! - `[slideshow]` - Carousel timing and slide count
//! - `[network]` - Timeouts and reconnect backoff
//!
//! Every field is optional. Missing fields fall back to [`defaults`], and
//! out-of-range values are clamped by the accessor methods.
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Pass `--config-dir` or set `SHILPKAR_GALLERY_CONFIG_DIR`
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use shilpkar_gallery::app::config;
//!
//! let (config, warning) = config::load();
//! if let Some(warning) = warning {
//!     eprintln!("[WARN] {warning}");
//! }
//! println!("{}", config.store.database_url());
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::domain::gallery::{CollectionPath, InvalidCollectionPath, SlideLimit};
use crate::error::{Error, Result};
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "hi").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(
        default = "default_theme_mode",
        deserialize_with = "deserialize_theme_mode"
    )]
    pub theme_mode: ThemeMode,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: None,
            theme_mode: default_theme_mode(),
        }
    }
}

/// Where the gallery lives.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_path: Option<String>,
}

impl StoreConfig {
    #[must_use]
    pub fn database_url(&self) -> &str {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_DATABASE_URL)
    }

    /// Parses the configured collection path.
    ///
    /// # Errors
    ///
    /// Returns the validation error when the configured path is malformed.
    pub fn collection_path(&self) -> std::result::Result<CollectionPath, InvalidCollectionPath> {
        CollectionPath::new(
            self.collection_path
                .as_deref()
                .unwrap_or(DEFAULT_COLLECTION_PATH),
        )
    }
}

/// Carousel timing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlideshowConfig {
    #[serde(
        default = "default_background_interval_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub background_interval_ms: Option<u64>,

    #[serde(
        default = "default_background_transition_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub background_transition_ms: Option<u64>,

    #[serde(
        default = "default_featured_interval_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub featured_interval_ms: Option<u64>,

    #[serde(
        default = "default_featured_transition_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub featured_transition_ms: Option<u64>,

    /// How many leading images the carousels show.
    #[serde(default = "default_max_slides", skip_serializing_if = "Option::is_none")]
    pub max_slides: Option<usize>,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            background_interval_ms: default_background_interval_ms(),
            background_transition_ms: default_background_transition_ms(),
            featured_interval_ms: default_featured_interval_ms(),
            featured_transition_ms: default_featured_transition_ms(),
            max_slides: default_max_slides(),
        }
    }
}

fn interval(value: Option<u64>, default: u64) -> Duration {
    Duration::from_millis(
        value
            .unwrap_or(default)
            .clamp(MIN_SLIDE_INTERVAL_MS, MAX_SLIDE_INTERVAL_MS),
    )
}

fn transition(value: Option<u64>, default: u64) -> Duration {
    Duration::from_millis(value.unwrap_or(default).min(MAX_TRANSITION_MS))
}

impl SlideshowConfig {
    #[must_use]
    pub fn background_interval(&self) -> Duration {
        interval(self.background_interval_ms, DEFAULT_BACKGROUND_INTERVAL_MS)
    }

    #[must_use]
    pub fn background_transition(&self) -> Duration {
        transition(self.background_transition_ms, DEFAULT_BACKGROUND_TRANSITION_MS)
    }

    #[must_use]
    pub fn featured_interval(&self) -> Duration {
        interval(self.featured_interval_ms, DEFAULT_FEATURED_INTERVAL_MS)
    }

    #[must_use]
    pub fn featured_transition(&self) -> Duration {
        transition(self.featured_transition_ms, DEFAULT_FEATURED_TRANSITION_MS)
    }

    #[must_use]
    pub fn slide_limit(&self) -> SlideLimit {
        SlideLimit::new(self.max_slides.unwrap_or(DEFAULT_MAX_SLIDES))
    }
}

/// Timeouts and reconnect backoff.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkConfig {
    #[serde(
        default = "default_connect_timeout_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub connect_timeout_secs: Option<u64>,

    #[serde(
        default = "default_image_timeout_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_timeout_secs: Option<u64>,

    #[serde(
        default = "default_reconnect_initial_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub reconnect_initial_ms: Option<u64>,

    #[serde(
        default = "default_reconnect_max_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub reconnect_max_ms: Option<u64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
            image_timeout_secs: default_image_timeout_secs(),
            reconnect_initial_ms: default_reconnect_initial_ms(),
            reconnect_max_ms: default_reconnect_max_ms(),
        }
    }
}

impl NetworkConfig {
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(
            self.connect_timeout_secs
                .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS)
                .clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS),
        )
    }

    #[must_use]
    pub fn image_timeout(&self) -> Duration {
        Duration::from_secs(
            self.image_timeout_secs
                .unwrap_or(DEFAULT_IMAGE_TIMEOUT_SECS)
                .clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS),
        )
    }

    #[must_use]
    pub fn reconnect_initial(&self) -> Duration {
        Duration::from_millis(
            self.reconnect_initial_ms
                .unwrap_or(DEFAULT_RECONNECT_INITIAL_MS)
                .clamp(MIN_RECONNECT_MS, MAX_RECONNECT_MS),
        )
    }

    /// Never shorter than [`NetworkConfig::reconnect_initial`].
    #[must_use]
    pub fn reconnect_max(&self) -> Duration {
        let max = Duration::from_millis(
            self.reconnect_max_ms
                .unwrap_or(DEFAULT_RECONNECT_MAX_MS)
                .clamp(MIN_RECONNECT_MS, MAX_RECONNECT_MS),
        );
        max.max(self.reconnect_initial())
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub slideshow: SlideshowConfig,

    #[serde(default)]
    pub network: NetworkConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_theme_mode() -> ThemeMode {
    ThemeMode::System
}

fn default_background_interval_ms() -> Option<u64> {
    Some(DEFAULT_BACKGROUND_INTERVAL_MS)
}

fn default_background_transition_ms() -> Option<u64> {
    Some(DEFAULT_BACKGROUND_TRANSITION_MS)
}

fn default_featured_interval_ms() -> Option<u64> {
    Some(DEFAULT_FEATURED_INTERVAL_MS)
}

fn default_featured_transition_ms() -> Option<u64> {
    Some(DEFAULT_FEATURED_TRANSITION_MS)
}

fn default_max_slides() -> Option<usize> {
    Some(DEFAULT_MAX_SLIDES)
}

fn default_connect_timeout_secs() -> Option<u64> {
    Some(DEFAULT_CONNECT_TIMEOUT_SECS)
}

fn default_image_timeout_secs() -> Option<u64> {
    Some(DEFAULT_IMAGE_TIMEOUT_SECS)
}

fn default_reconnect_initial_ms() -> Option<u64> {
    Some(DEFAULT_RECONNECT_INITIAL_MS)
}

fn default_reconnect_max_ms() -> Option<u64> {
    Some(DEFAULT_RECONNECT_MAX_MS)
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    match raw.to_lowercase().as_str() {
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        "system" => Ok(ThemeMode::System),
        other => Err(D::Error::custom(format!("invalid theme_mode: {other}"))),
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
#[must_use]
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
#[must_use]
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    return (
                        Config::default(),
                        Some(format!(
                            "Ignoring {}: {err}. Using default settings.",
                            path.display()
                        )),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves configuration to a specific path, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directories or file cannot be written.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
