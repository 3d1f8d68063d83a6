// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{border, opacity, palette, radius, shadow};
use iced::gradient::Linear;
use iced::widget::container;
use iced::{Background, Border, Color, Gradient, Radians, Theme};
use std::f32::consts::FRAC_PI_2;

/// Frosted panel used for the contact sections, grid frame and business card.
///
/// Translucent white over the animated background, with a soft indigo
/// shadow.
pub fn panel(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::VEIL,
            ..palette::WHITE
        })),
        border: Border {
            color: Color {
                a: opacity::OVERLAY_SUBTLE,
                ..palette::WHITE
            },
            width: border::WIDTH_MD,
            radius: radius::XL.into(),
        },
        shadow: shadow::PANEL,
        ..Default::default()
    }
}

/// Title bar: indigo gradient with white text.
pub fn title_bar(_theme: &Theme) -> container::Style {
    let gradient = Linear::new(Radians(FRAC_PI_2))
        .add_stop(0.0, palette::PRIMARY_500)
        .add_stop(1.0, palette::PRIMARY_ACCENT);

    container::Style {
        background: Some(Background::Gradient(Gradient::Linear(gradient))),
        text_color: Some(palette::WHITE),
        shadow: shadow::PANEL,
        ..Default::default()
    }
}

/// Full-window loading screen.
pub fn loading(_theme: &Theme) -> container::Style {
    let gradient = Linear::new(Radians(FRAC_PI_2 / 2.0))
        .add_stop(0.0, Color::from_rgb(0.102, 0.102, 0.102))
        .add_stop(1.0, palette::GRAY_700);

    container::Style {
        background: Some(Background::Gradient(Gradient::Linear(gradient))),
        text_color: Some(palette::WHITE),
        ..Default::default()
    }
}

/// Animated page background. `phase` in `[0, 1)` rotates the gradient and
/// shifts its middle stop.
pub fn animated_background(phase: f32) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| {
        let angle = Radians(phase * std::f32::consts::TAU);
        let middle = 0.35 + 0.3 * (phase * std::f32::consts::TAU).sin().abs();
        let gradient = Linear::new(angle)
            .add_stop(0.0, palette::SAND)
            .add_stop(middle, palette::LAVENDER)
            .add_stop(1.0, palette::SKY);

        container::Style {
            background: Some(Background::Gradient(Gradient::Linear(gradient))),
            ..Default::default()
        }
    }
}

/// Translucent white wash over the background slideshow.
pub fn wash(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::VEIL,
            ..palette::WHITE
        })),
        ..Default::default()
    }
}

/// Dimmed backdrop behind the lightbox.
pub fn modal_backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_HEAVY,
            ..palette::BLACK
        })),
        ..Default::default()
    }
}

/// Frame around the lightbox image.
pub fn modal_image(_theme: &Theme) -> container::Style {
    container::Style {
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: shadow::MODAL_IMAGE,
        ..Default::default()
    }
}

/// Rounded image tile with a neutral placeholder fill.
pub fn tile(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_SUBTLE,
            ..palette::GRAY_400
        })),
        border: Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        shadow: shadow::PANEL,
        ..Default::default()
    }
}

/// Tile whose image could not be downloaded.
pub fn tile_failed(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_SUBTLE,
            ..palette::ERROR_500
        })),
        text_color: Some(palette::ERROR_500),
        border: Border {
            color: palette::ERROR_500,
            width: border::WIDTH_SM,
            radius: radius::MD.into(),
        },
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_is_translucent() {
        let style = panel(&Theme::Light);
        match style.background {
            Some(Background::Color(color)) => assert!(color.a < 1.0),
            other => panic!("unexpected background: {other:?}"),
        }
    }

    #[test]
    fn backdrop_is_dark() {
        let style = modal_backdrop(&Theme::Light);
        assert!(matches!(
            style.background,
            Some(Background::Color(color)) if color.r == 0.0 && color.a > 0.5
        ));
    }

    #[test]
    fn animated_background_uses_gradient() {
        let style = animated_background(0.25)(&Theme::Light);
        assert!(matches!(style.background, Some(Background::Gradient(_))));
    }
}
