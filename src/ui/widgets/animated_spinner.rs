// SPDX-License-Identifier: MPL-2.0
//! Loading spinner drawn on a canvas.

use crate::ui::design_tokens::{motion, sizing};
use iced::widget::canvas::{self, Cache, Canvas, Frame, Geometry, Path, Stroke};
use iced::{mouse, Color, Length, Point, Rectangle, Renderer, Theme};
use std::f32::consts::{PI, TAU};
use std::time::Duration;

/// Spinner ring with a rotating half arc.
pub struct AnimatedSpinner {
    cache: Cache,
    rotation: f32, // radians
    color: Color,
    size: f32,
}

impl AnimatedSpinner {
    #[must_use]
    pub fn new(color: Color, rotation: f32) -> Self {
        Self {
            cache: Cache::default(),
            rotation,
            color,
            size: sizing::SPINNER,
        }
    }

    /// Rotation reached after `elapsed`, one turn per spinner period.
    #[must_use]
    pub fn rotation_at(elapsed: Duration) -> f32 {
        let period = motion::SPINNER_PERIOD.as_secs_f32();
        (elapsed.as_secs_f32() % period) / period * TAU
    }

    pub fn into_element<Message: 'static>(self) -> iced::Element<'static, Message> {
        let size = self.size;
        Canvas::new(self)
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .into()
    }
}

impl<Message> canvas::Program<Message> for AnimatedSpinner {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let geometry = self
            .cache
            .draw(renderer, bounds.size(), |frame: &mut Frame| {
                let center = frame.center();
                let radius = frame.width().min(frame.height()) / 2.0 - 5.0;

                let track = Path::circle(center, radius);
                frame.stroke(
                    &track,
                    Stroke::default().with_width(5.0).with_color(Color {
                        a: 0.1,
                        ..self.color
                    }),
                );

                // Half arc starting at 12 o'clock.
                let start_angle = self.rotation - PI / 2.0;
                let end_angle = start_angle + PI;

                let mut arc_path = canvas::path::Builder::new();
                arc_path.move_to(Point::new(
                    center.x + radius * start_angle.cos(),
                    center.y + radius * start_angle.sin(),
                ));

                let segments = 30;
                #[allow(clippy::cast_precision_loss)]
                for i in 1..=segments {
                    let t = i as f32 / segments as f32;
                    let angle = start_angle + (end_angle - start_angle) * t;
                    arc_path.line_to(Point::new(
                        center.x + radius * angle.cos(),
                        center.y + radius * angle.sin(),
                    ));
                }

                frame.stroke(
                    &arc_path.build(),
                    Stroke::default()
                        .with_width(5.0)
                        .with_color(self.color)
                        .with_line_cap(canvas::LineCap::Round),
                );
            });

        vec![geometry]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn rotation_wraps_every_period() {
        assert_abs_diff_eq!(AnimatedSpinner::rotation_at(Duration::ZERO), 0.0);
        assert_abs_diff_eq!(
            AnimatedSpinner::rotation_at(motion::SPINNER_PERIOD / 2),
            PI,
            epsilon = 1e-4
        );
        assert_abs_diff_eq!(
            AnimatedSpinner::rotation_at(motion::SPINNER_PERIOD * 3 + motion::SPINNER_PERIOD / 4),
            PI / 2.0,
            epsilon = 1e-3
        );
    }
}
