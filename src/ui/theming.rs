// SPDX-License-Identifier: MPL-2.0
//! Brand theming.
//!
//! The gallery is a light, frosted page in both modes; dark mode only
//! darkens the chrome (title bar, loading screen, modal controls).

use crate::ui::design_tokens::{opacity, palette};
use iced::theme::Palette;
use iced::{Color, Theme};
use serde::{Deserialize, Serialize};

/// Color palette for a theme.
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub surface_primary: Color,
    pub surface_frosted: Color,

    pub text_primary: Color,
    pub text_on_brand: Color,

    pub brand_primary: Color,
    pub brand_secondary: Color,
    pub title: Color,

    pub error: Color,
    pub success: Color,

    pub overlay_background: Color,
    pub overlay_text: Color,
}

impl ColorScheme {
    #[must_use]
    pub fn light() -> Self {
        Self {
            surface_primary: palette::GRAY_100,
            surface_frosted: Color {
                a: opacity::VEIL,
                ..palette::WHITE
            },
            text_primary: palette::GRAY_800,
            text_on_brand: palette::WHITE,
            brand_primary: palette::PRIMARY_500,
            brand_secondary: palette::SECONDARY_500,
            title: palette::GOLD,
            error: palette::ERROR_500,
            success: palette::SUCCESS_500,
            overlay_background: Color {
                a: opacity::OVERLAY_MEDIUM,
                ..palette::BLACK
            },
            overlay_text: palette::GOLD,
        }
    }

    #[must_use]
    pub fn dark() -> Self {
        Self {
            surface_primary: palette::GRAY_700,
            surface_frosted: Color {
                a: opacity::VEIL,
                ..palette::GRAY_800
            },
            text_primary: palette::WHITE,
            text_on_brand: palette::WHITE,
            brand_primary: palette::PRIMARY_300,
            brand_secondary: palette::SECONDARY_300,
            title: palette::GOLD,
            error: palette::ERROR_500,
            success: palette::SUCCESS_500,
            overlay_background: Color {
                a: opacity::OVERLAY_STRONG,
                ..palette::BLACK
            },
            overlay_text: palette::GOLD,
        }
    }

    /// Iced palette built from this scheme.
    #[must_use]
    pub fn iced_palette(&self) -> Palette {
        Palette {
            background: self.surface_primary,
            text: self.text_primary,
            primary: self.brand_primary,
            success: self.success,
            warning: palette::GOLD,
            danger: self.error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    /// Returns true if the effective theme is dark.
    /// For System mode, detects the actual system theme.
    #[must_use]
    pub fn is_dark(self) -> bool {
        match self {
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
            ThemeMode::System => matches!(dark_light::detect(), Ok(dark_light::Mode::Dark)),
        }
    }
}

/// Theme resolved at startup.
#[derive(Debug, Clone)]
pub struct AppTheme {
    pub colors: ColorScheme,
    pub mode: ThemeMode,
    dark: bool,
}

impl AppTheme {
    #[must_use]
    pub fn new(mode: ThemeMode) -> Self {
        let dark = mode.is_dark();
        let colors = if dark {
            ColorScheme::dark()
        } else {
            ColorScheme::light()
        };
        Self { colors, mode, dark }
    }

    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.dark
    }

    /// Iced theme carrying the brand palette.
    #[must_use]
    pub fn iced_theme(&self) -> Theme {
        let name = if self.dark {
            "Shilpkar Dark"
        } else {
            "Shilpkar Light"
        };
        Theme::custom(name.to_string(), self.colors.iced_palette())
    }
}
