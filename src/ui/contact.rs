// SPDX-License-Identifier: MPL-2.0
//! Static contact panels and the business card.
//!
//! The business details are printed in Hindi and English regardless of the
//! interface language.

use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{column, container, svg, text, Column};
use iced::{alignment, Element, Length};

/// Business name shown in the title bar and the contact panels.
pub const BUSINESS_NAME: &str = "शिल्पकार शिंदे बंधु";

pub const PHONE_NUMBERS: &str = "9764208020, 8806207996";

const TOP_LINES: [&str; 2] = ["सर्वज्ञ शिल्पकार कला संच", "शिंदे बंधु"];

/// One language block of the full contact panel.
struct ContactBlock {
    name: &'static str,
    sculptor: &'static str,
    phones: &'static str,
    services: &'static str,
    contact_heading: &'static str,
    contact_line: &'static str,
    address: &'static str,
}

const HINDI: ContactBlock = ContactBlock {
    name: BUSINESS_NAME,
    sculptor: "शिल्पकार: विलास रावसाहेब शिंदे",
    phones: "मो.: 9764208020, 8806207996",
    services: "हमारे यहाँ मंदिर (मंदिर शिखर, कलश, गुम्बज के और सम्पूर्ण मंदिर निर्माण कार्य) कॉन्ट्रैक्ट के अनुसार बनाए जाते हैं..!",
    contact_heading: "मंदिर बनवाने हेतु संपर्क करें:",
    contact_line: "शिल्पकार विलास रावसाहेब शिंदे, मो.: 9764208020",
    address: "पता: तहसील लोहा, जिला नांदेड (महाराष्ट्र)",
};

const ENGLISH: ContactBlock = ContactBlock {
    name: "Shilpkar Shinde Bandhu",
    sculptor: "Sculptor: Vilas Raosaheb Shinde",
    phones: "Mob.: 9764208020, 8806207996",
    services: "We undertake temple (temple spire, kalash, dome, and complete temple construction) contracts as per requirements..!",
    contact_heading: "For temple construction, contact:",
    contact_line: "Sculptor Vilas Raosaheb Shinde, Mob.: 9764208020",
    address: "Address: Tehsil Loha, District Nanded (Maharashtra)",
};

const BUSINESS_CARD_SVG: &[u8] = include_bytes!("../../assets/branding/business_card.svg");

fn line<'a, Message: 'a>(content: &'a str, size: f32) -> Element<'a, Message> {
    text(content)
        .size(size)
        .color(palette::GRAY_900)
        .shaping(text::Shaping::Advanced)
        .align_x(alignment::Horizontal::Center)
        .width(Length::Fill)
        .into()
}

/// Short panel at the top of the page: business name and phone numbers.
pub fn minimal<'a, Message: 'a>() -> Element<'a, Message> {
    let phones = format!("📞 {PHONE_NUMBERS}");

    let content = column![
        line(TOP_LINES[0], typography::TITLE_MD),
        line(TOP_LINES[1], typography::TITLE_LG),
        text(phones)
            .size(typography::TITLE_SM)
            .color(palette::PRIMARY_500)
            .shaping(text::Shaping::Advanced)
            .align_x(alignment::Horizontal::Center)
            .width(Length::Fill),
    ]
    .spacing(spacing::XXS);

    container(content)
        .padding(spacing::MD)
        .width(Length::Fill)
        .style(styles::container::panel)
        .into()
}

fn block<'a, Message: 'a>(block: &'a ContactBlock) -> Column<'a, Message> {
    column![
        line(block.name, typography::TITLE_LG),
        line(block.sculptor, typography::BODY_LG),
        line(block.phones, typography::BODY_LG),
        line(block.services, typography::BODY),
        line(block.contact_heading, typography::BODY_LG),
        line(block.contact_line, typography::BODY),
        line(block.address, typography::BODY),
    ]
    .spacing(spacing::XS)
}

/// Full bilingual panel at the bottom of the page.
pub fn full<'a, Message: 'a>(title: String) -> Element<'a, Message> {
    let heading = text(title)
        .size(typography::TITLE_LG)
        .color(palette::PRIMARY_500)
        .shaping(text::Shaping::Advanced)
        .align_x(alignment::Horizontal::Center)
        .width(Length::Fill);

    let content = column![heading, block(&HINDI), block(&ENGLISH)].spacing(spacing::LG);

    container(content)
        .padding(spacing::LG)
        .width(Length::Fill)
        .style(styles::container::panel)
        .into()
}

/// Embedded business card, shown at the very bottom.
pub fn business_card<'a, Message: 'a>() -> Element<'a, Message> {
    let card = svg(svg::Handle::from_memory(BUSINESS_CARD_SVG)).width(Length::Fill);

    container(
        container(card)
            .padding(spacing::XS)
            .max_width(sizing::BUSINESS_CARD_MAX_WIDTH)
            .style(styles::container::panel),
    )
    .center_x(Length::Fill)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_blocks_list_the_same_phone() {
        assert!(HINDI.phones.contains("9764208020"));
        assert!(ENGLISH.phones.contains("9764208020"));
        assert!(HINDI.contact_line.contains("9764208020"));
        assert!(ENGLISH.contact_line.contains("9764208020"));
    }

    #[test]
    fn business_card_is_svg() {
        let head = String::from_utf8_lossy(&BUSINESS_CARD_SVG[..BUSINESS_CARD_SVG.len().min(256)]);
        assert!(head.contains("<svg"));
    }
}
