// SPDX-License-Identifier: MPL-2.0
#![doc = r#"
# Design Tokens

This module defines all of the application's design tokens, following the W3C Design Tokens standard.

## Organization

- **Palette**: Brand and base colors
- **Opacity**: Standardized opacity levels
- **Spacing**: Spacing scale (8px grid)
- **Sizing**: Component sizes
- **Typography**: Font size scale
- **Radius**: Border radii
- **Shadow**: Shadow definitions
- **Motion**: Animation timings

## Examples

```
use shilpkar_gallery::ui::design_tokens::{palette, spacing, opacity};
use iced::Color;

let veil = Color {
    a: opacity::VEIL,
    ..palette::WHITE
};

let padding = spacing::MD; // 16px
```
"#]

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use super::Color;

    // Grayscale
    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const GRAY_900: Color = Color::from_rgb(0.067, 0.067, 0.067); // #111
    pub const GRAY_800: Color = Color::from_rgb(0.133, 0.133, 0.133); // #222
    pub const GRAY_700: Color = Color::from_rgb(0.176, 0.176, 0.176); // #2d2d2d
    pub const GRAY_400: Color = Color::from_rgb(0.4, 0.4, 0.4);
    pub const GRAY_100: Color = Color::from_rgb(0.961, 0.961, 0.961); // #f5f5f5

    // Brand colors
    pub const PRIMARY_300: Color = Color::from_rgb(0.325, 0.294, 0.682); // #534bae
    pub const PRIMARY_500: Color = Color::from_rgb(0.102, 0.137, 0.494); // #1a237e
    pub const PRIMARY_700: Color = Color::from_rgb(0.0, 0.0, 0.318); // #000051
    pub const PRIMARY_ACCENT: Color = Color::from_rgb(0.051, 0.278, 0.631); // #0d47a1
    pub const SECONDARY_300: Color = Color::from_rgb(1.0, 0.349, 0.514); // #ff5983
    pub const SECONDARY_500: Color = Color::from_rgb(0.961, 0.0, 0.341); // #f50057
    pub const SECONDARY_700: Color = Color::from_rgb(0.733, 0.0, 0.184); // #bb002f
    pub const GOLD: Color = Color::from_rgb(1.0, 0.843, 0.0); // #FFD700

    // Animated background stops
    pub const SAND: Color = Color::from_rgb(0.961, 0.910, 0.773); // #f5e8c5
    pub const LAVENDER: Color = Color::from_rgb(0.878, 0.765, 0.988); // #e0c3fc
    pub const SKY: Color = Color::from_rgb(0.557, 0.773, 0.988); // #8ec5fc

    // Semantic colors
    pub const ERROR_500: Color = Color::from_rgb(0.898, 0.224, 0.208);
    pub const SUCCESS_500: Color = Color::from_rgb(0.263, 0.702, 0.404);
}

// ============================================================================
// Opacity Scale
// ============================================================================

pub mod opacity {
    pub const TRANSPARENT: f32 = 0.0;
    pub const OVERLAY_SUBTLE: f32 = 0.2;
    /// Frosted panels and the background wash.
    pub const VEIL: f32 = 0.45;
    pub const OVERLAY_MEDIUM: f32 = 0.5;
    pub const OVERLAY_STRONG: f32 = 0.7;
    pub const OVERLAY_HEAVY: f32 = 0.8;
    pub const OPAQUE: f32 = 1.0;
}

// ============================================================================
// Spacing Scale (8px baseline grid)
// ============================================================================

pub mod spacing {
    pub const XXS: f32 = 4.0; // 0.5 unit
    pub const XS: f32 = 8.0; // 1 unit
    pub const SM: f32 = 12.0; // 1.5 units
    pub const MD: f32 = 16.0; // 2 units
    pub const LG: f32 = 24.0; // 3 units
    pub const XL: f32 = 32.0; // 4 units
    pub const XXL: f32 = 48.0; // 6 units
}

// ============================================================================
// Sizing Scale
// ============================================================================

pub mod sizing {
    pub const ICON_MD: f32 = 24.0;
    pub const ICON_XL: f32 = 48.0;
    /// Loading spinner diameter.
    pub const SPINNER: f32 = 70.0;

    pub const TITLE_BAR_HEIGHT: f32 = 64.0;
    pub const CLOSE_BUTTON: f32 = 40.0;
    pub const CAROUSEL_ARROW: f32 = 44.0;
    pub const CAROUSEL_DOT: f32 = 12.0;

    /// Height of the featured carousel.
    pub const FEATURED_HEIGHT: f32 = 480.0;
    pub const FEATURED_HEIGHT_NARROW: f32 = 320.0;
    /// Height of the banner repeating the first image.
    pub const BANNER_HEIGHT: f32 = 400.0;
    /// Widest the business card is drawn.
    pub const BUSINESS_CARD_MAX_WIDTH: f32 = 400.0;
    /// Widest the page content grows.
    pub const CONTENT_MAX_WIDTH: f32 = 1200.0;
}

// ============================================================================
// Typography Scale
// ============================================================================

pub mod typography {
    /// Gallery page title.
    pub const DISPLAY: f32 = 56.0;
    pub const DISPLAY_NARROW: f32 = 40.0;
    pub const TITLE_LG: f32 = 24.0;
    pub const TITLE_MD: f32 = 20.0;
    pub const TITLE_SM: f32 = 18.0;
    pub const BODY_LG: f32 = 17.6;
    pub const BODY: f32 = 16.0;
    pub const CAPTION: f32 = 12.0;
}

// ============================================================================
// Border Scale
// ============================================================================

pub mod border {
    pub const WIDTH_SM: f32 = 1.0;
    pub const WIDTH_MD: f32 = 1.5;
}

// ============================================================================
// Border Radius Scale
// ============================================================================

pub mod radius {
    pub const SM: f32 = 8.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 20.0;
    pub const XL: f32 = 24.0;
    pub const FULL: f32 = 9999.0; // Pill shape
}

// ============================================================================
// Shadow Definitions
// ============================================================================

pub mod shadow {
    use super::palette;
    use iced::{Color, Shadow, Vector};

    pub const NONE: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector::ZERO,
        blur_radius: 0.0,
    };

    /// Soft indigo glow under frosted panels and tiles.
    pub const PANEL: Shadow = Shadow {
        color: Color::from_rgba(0.122, 0.149, 0.529, 0.18),
        offset: Vector { x: 0.0, y: 8.0 },
        blur_radius: 32.0,
    };

    pub const PANEL_RAISED: Shadow = Shadow {
        color: Color::from_rgba(0.122, 0.149, 0.529, 0.22),
        offset: Vector { x: 0.0, y: 16.0 },
        blur_radius: 32.0,
    };

    pub const MODAL_IMAGE: Shadow = Shadow {
        color: Color::from_rgba(0.0, 0.0, 0.0, 0.5),
        offset: Vector::ZERO,
        blur_radius: 20.0,
    };
}

// ============================================================================
// Motion
// ============================================================================

pub mod motion {
    use std::time::Duration;

    /// Redraw cadence while something animates (~60 fps).
    pub const FRAME: Duration = Duration::from_millis(16);
    /// Full spinner revolution.
    pub const SPINNER_PERIOD: Duration = Duration::from_millis(1_400);
    /// One full cycle of the background gradient.
    pub const GRADIENT_PERIOD: Duration = Duration::from_secs(18);
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    assert!(spacing::XS > 0.0);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);
    assert!(spacing::LG > spacing::MD);

    assert!(opacity::TRANSPARENT == 0.0);
    assert!(opacity::OPAQUE == 1.0);
    assert!(opacity::VEIL > 0.0 && opacity::VEIL < 1.0);

    assert!(typography::DISPLAY > typography::DISPLAY_NARROW);
    assert!(typography::TITLE_LG > typography::TITLE_MD);
    assert!(typography::TITLE_MD > typography::TITLE_SM);
    assert!(typography::BODY_LG > typography::BODY);

    assert!(sizing::FEATURED_HEIGHT > sizing::FEATURED_HEIGHT_NARROW);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_scale_is_consistent() {
        assert_eq!(spacing::MD, spacing::XS * 2.0);
        assert_eq!(spacing::LG, spacing::MD * 1.5);
    }

    #[test]
    fn brand_primary_is_indigo() {
        assert!(palette::PRIMARY_500.b > palette::PRIMARY_500.r);
        assert!(palette::PRIMARY_500.b > palette::PRIMARY_500.g);
    }
}
