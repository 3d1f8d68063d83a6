// SPDX-License-Identifier: MPL-2.0
//! Application title bar.

use crate::ui::contact::BUSINESS_NAME;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{container, text};
use iced::{Element, Font, Length};

pub fn view<'a, Message: 'a>() -> Element<'a, Message> {
    let title = text(BUSINESS_NAME)
        .size(typography::TITLE_LG)
        .font(Font {
            weight: iced::font::Weight::Bold,
            ..Font::DEFAULT
        })
        .shaping(text::Shaping::Advanced);

    container(title)
        .padding([0.0, spacing::LG])
        .width(Length::Fill)
        .height(Length::Fixed(sizing::TITLE_BAR_HEIGHT))
        .center_y(Length::Fixed(sizing::TITLE_BAR_HEIGHT))
        .style(styles::container::title_bar)
        .into()
}
