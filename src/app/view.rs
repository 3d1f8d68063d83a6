// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.

use super::Message;
use crate::i18n::fluent::I18n;
use crate::ui::{gallery, title_bar};
use iced::widget::{column, container};
use iced::{Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub gallery: &'a gallery::State,
    pub window_width: f32,
}

/// Title bar above the gallery page.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let page = ctx
        .gallery
        .view(gallery::ViewEnv {
            i18n: ctx.i18n,
            window_width: ctx.window_width,
        })
        .map(Message::Gallery);

    column![
        title_bar::view(),
        container(page).width(Length::Fill).height(Length::Fill),
    ]
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}
