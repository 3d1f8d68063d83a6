// SPDX-License-Identifier: MPL-2.0
//! Lightbox overlay.
//!
//! The overlay is opaque: it swallows scroll and pointer input so the page
//! underneath stays still while an image is open.

use super::component::Message;
use crate::domain::gallery::ImageRecord;
use crate::domain::selection::ModalTarget;
use crate::i18n::fluent::I18n;
use crate::media::{ImageCache, RemoteImage};
use crate::ui::design_tokens::{opacity, palette, sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::widgets::AnimatedSpinner;
use iced::widget::{button, container, image, mouse_area, opaque, stack, text, tooltip};
use iced::{alignment, ContentFit, Element, Length};
use std::time::Duration;

pub fn view<'a>(
    selected: &'a ImageRecord,
    images: &'a ImageCache,
    i18n: &'a I18n,
    elapsed: Duration,
) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match images.get(&selected.url) {
        Some(RemoteImage::Ready { handle, .. }) => container(
            image(handle.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Shrink)
                .height(Length::Shrink),
        )
        .style(styles::container::modal_image)
        .into(),
        Some(RemoteImage::Failed(_)) => text(i18n.tr("gallery-image-failed"))
            .size(typography::TITLE_SM)
            .color(palette::WHITE)
            .into(),
        Some(RemoteImage::Loading) | None => {
            AnimatedSpinner::new(palette::GOLD, AnimatedSpinner::rotation_at(elapsed))
                .into_element()
        }
    };

    // Clicks on the image itself keep the lightbox open.
    let picture = mouse_area(picture).on_press(Message::Modal(ModalTarget::Image));

    let backdrop = mouse_area(
        container(picture)
            .padding(spacing::XXL)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .style(styles::container::modal_backdrop),
    )
    .on_press(Message::Modal(ModalTarget::Backdrop));

    let close = button(
        text("×")
            .size(typography::TITLE_LG)
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .width(Length::Fill)
            .height(Length::Fill),
    )
    .width(Length::Fixed(sizing::CLOSE_BUTTON))
    .height(Length::Fixed(sizing::CLOSE_BUTTON))
    .padding(0)
    .on_press(Message::Modal(ModalTarget::CloseButton))
    .style(styles::button::overlay(
        palette::GOLD,
        opacity::OVERLAY_MEDIUM,
        opacity::OVERLAY_STRONG,
    ));

    let close = tooltip(
        close,
        text(i18n.tr("modal-close")).size(typography::CAPTION),
        tooltip::Position::Left,
    );

    let close_layer = container(close)
        .padding(spacing::LG)
        .width(Length::Fill)
        .align_x(alignment::Horizontal::Right);

    opaque(stack![backdrop, close_layer]).into()
}
