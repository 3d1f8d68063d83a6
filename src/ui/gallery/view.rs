// SPDX-License-Identifier: MPL-2.0
//! Gallery page rendering.

use super::component::{Message, State, ViewEnv, SCROLLABLE_ID};
use super::{layout, modal};
use crate::media::{ImageCache, RemoteImage};
use crate::ui::carousel::{self, Carousel};
use crate::ui::design_tokens::{opacity, palette, sizing, spacing, typography};
use crate::ui::widgets::AnimatedSpinner;
use crate::ui::{contact, styles};
use fluent_bundle::FluentValue;
use iced::widget::{
    button, column, container, image, mouse_area, row, scrollable, stack, text, Column, Id, Row,
    Stack,
};
use iced::{alignment, Alignment, ContentFit, Element, Length};
use std::time::Instant;

pub(super) fn view<'a>(state: &'a State, env: ViewEnv<'a>) -> Element<'a, Message> {
    let elapsed = state.now.saturating_duration_since(state.started);

    if state.gallery.loading {
        return loading(env.i18n.tr("gallery-loading"), elapsed);
    }

    let background = container(background_slideshow(state))
        .width(Length::Fill)
        .height(Length::Fill)
        .style(styles::container::animated_background(
            state.background_phase(),
        ));

    let page = scrollable(
        container(content(state, &env))
            .padding(spacing::MD)
            .max_width(sizing::CONTENT_MAX_WIDTH),
    )
    .id(Id::new(SCROLLABLE_ID))
    .on_scroll(|viewport| Message::Scrolled(viewport.relative_offset()))
    .width(Length::Fill)
    .height(Length::Fill);

    let page = container(page).center_x(Length::Fill);

    let mut layers = stack![background, page]
        .width(Length::Fill)
        .height(Length::Fill);

    if let Some(selected) = state.selection.selected() {
        layers = layers.push(modal::view(selected, &state.images, env.i18n, elapsed));
    }

    layers.into()
}

fn loading<'a>(label: String, elapsed: std::time::Duration) -> Element<'a, Message> {
    let spinner = AnimatedSpinner::new(palette::WHITE, AnimatedSpinner::rotation_at(elapsed))
        .into_element();

    let content = column![
        spinner,
        text(label)
            .size(typography::TITLE_SM)
            .color(palette::WHITE)
            .shaping(text::Shaping::Advanced),
    ]
    .spacing(spacing::LG)
    .align_x(Alignment::Center);

    container(content)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(styles::container::loading)
        .into()
}

/// Non-interactive slideshow under a white wash.
fn background_slideshow(state: &State) -> Element<'_, Message> {
    let slides = carousel_layers(state, &state.background, ContentFit::Cover);
    stack![
        slides,
        container(text(""))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(styles::container::wash)
    ]
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}

fn carousel_layers<'a>(state: &'a State, carousel: &Carousel, fit: ContentFit) -> Stack<'a, Message> {
    let count = state.slide_count();
    carousel
        .layers(state.now, count)
        .into_iter()
        .filter_map(|layer| {
            let record = state.gallery.images.get(layer.index)?;
            let entry = state.images.get(&record.url)?;
            let handle = entry.handle()?;
            let slide: Element<'a, Message> = image(handle.clone())
                .content_fit(fit)
                .width(Length::Fill)
                .height(Length::Fill)
                .opacity(layer.opacity * entry.opacity_at(state.now))
                .into();
            Some(slide)
        })
        .fold(Stack::new(), |slides, slide| slides.push(slide))
        .width(Length::Fill)
        .height(Length::Fill)
}

fn content<'a>(state: &'a State, env: &ViewEnv<'a>) -> Element<'a, Message> {
    let narrow = layout::is_narrow(env.window_width);
    let count = state.gallery.images.len();

    let title = text(env.i18n.tr("gallery-title"))
        .size(if narrow {
            typography::DISPLAY_NARROW
        } else {
            typography::DISPLAY
        })
        .color(palette::GOLD)
        .align_x(alignment::Horizontal::Center)
        .width(Length::Fill);

    let mut page = Column::new()
        .spacing(spacing::XL)
        .push(contact::minimal())
        .push(title);

    if count > 0 {
        page = page.push(featured(state, env, narrow));
    }

    page = page.push(grid(state, env)).push(
        text(env.i18n.tr_with_args(
            "gallery-total-images",
            &[("count", FluentValue::from(count))],
        ))
        .size(typography::TITLE_SM)
        .color(palette::PRIMARY_500)
        .align_x(alignment::Horizontal::Center)
        .width(Length::Fill),
    );

    if count > 0 {
        page = page.push(banner(state, env));
    }

    page.push(contact::full(env.i18n.tr("contact-title")))
        .push(contact::business_card())
        .into()
}

fn featured<'a>(state: &'a State, env: &ViewEnv<'a>, narrow: bool) -> Element<'a, Message> {
    let count = state.slide_count();
    let current = state.featured.current(count);
    let height = if narrow {
        sizing::FEATURED_HEIGHT_NARROW
    } else {
        sizing::FEATURED_HEIGHT
    };

    let slides = mouse_area(carousel_layers(state, &state.featured, ContentFit::Cover))
        .on_press(Message::Select(current));

    let arrow = |label: &'static str, message: carousel::Message, tooltip_key: &str| {
        iced::widget::tooltip(
            button(
                text(label)
                    .size(typography::TITLE_LG)
                    .align_x(alignment::Horizontal::Center)
                    .align_y(alignment::Vertical::Center)
                    .width(Length::Fill)
                    .height(Length::Fill),
            )
            .width(Length::Fixed(sizing::CAROUSEL_ARROW))
            .height(Length::Fixed(sizing::CAROUSEL_ARROW))
            .padding(0)
            .on_press(Message::Featured(message))
            .style(styles::button::overlay(
                palette::WHITE,
                opacity::OVERLAY_MEDIUM,
                opacity::OVERLAY_STRONG,
            )),
            text(env.i18n.tr(tooltip_key)).size(typography::CAPTION),
            iced::widget::tooltip::Position::Top,
        )
    };

    let arrows = container(
        row![
            arrow("‹", carousel::Message::Previous, "carousel-previous"),
            container(text("")).width(Length::Fill),
            arrow("›", carousel::Message::Next, "carousel-next"),
        ]
        .align_y(Alignment::Center),
    )
    .padding(spacing::MD)
    .width(Length::Fill)
    .center_y(Length::Fill);

    let dots = (0..count).fold(Row::new().spacing(spacing::XS), |dots, index| {
        dots.push(
            button(text(""))
                .width(Length::Fixed(sizing::CAROUSEL_DOT))
                .height(Length::Fixed(sizing::CAROUSEL_DOT))
                .padding(0)
                .on_press(Message::Featured(carousel::Message::GoTo(index)))
                .style(styles::button::dot(index == current)),
        )
    });

    let dots = container(dots)
        .padding(spacing::MD)
        .center_x(Length::Fill)
        .align_y(alignment::Vertical::Bottom)
        .height(Length::Fill);

    let frame = container(stack![slides, arrows, dots])
        .width(Length::Fill)
        .height(Length::Fixed(height))
        .clip(true)
        .style(styles::container::tile);

    mouse_area(frame)
        .on_enter(Message::Featured(carousel::Message::Hovered(true)))
        .on_exit(Message::Featured(carousel::Message::Hovered(false)))
        .into()
}

fn grid<'a>(state: &'a State, env: &ViewEnv<'a>) -> Element<'a, Message> {
    let images = &state.gallery.images;
    if images.is_empty() {
        return container(
            text(env.i18n.tr("gallery-empty"))
                .size(typography::TITLE_SM)
                .color(palette::GRAY_800),
        )
        .padding(spacing::XL)
        .center_x(Length::Fill)
        .style(styles::container::panel)
        .into();
    }

    let columns = layout::columns_for_width(env.window_width);
    let tile_height = layout::tile_height_for_width(env.window_width);
    let failed_label = env.i18n.tr("gallery-image-failed");

    let rows = layout::rows(images.len(), columns).fold(
        Column::new().spacing(spacing::MD),
        |grid, range| {
            let mut tiles = Row::new().spacing(spacing::MD);
            for index in range.clone() {
                tiles = tiles.push(tile(
                    &state.images,
                    &images[index].url,
                    index,
                    tile_height,
                    &failed_label,
                    state.now,
                ));
            }
            // Keep partial rows aligned with full ones.
            for _ in range.len()..columns {
                tiles = tiles.push(container(text("")).width(Length::Fill));
            }
            grid.push(tiles)
        },
    );

    container(rows)
        .padding(spacing::MD)
        .width(Length::Fill)
        .style(styles::container::panel)
        .into()
}

fn tile<'a>(
    cache: &'a ImageCache,
    url: &str,
    index: usize,
    height: f32,
    failed_label: &str,
    now: Instant,
) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match cache.get(url) {
        Some(RemoteImage::Failed(_)) => container(
            text(failed_label.to_string())
                .size(typography::CAPTION)
                .shaping(text::Shaping::Advanced),
        )
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(styles::container::tile_failed)
        .into(),
        Some(entry) => match entry.handle() {
            Some(handle) => container(
                image(handle.clone())
                    .content_fit(ContentFit::Cover)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .opacity(entry.opacity_at(now)),
            )
            .width(Length::Fill)
            .height(Length::Fill)
            .clip(true)
            .style(styles::container::tile)
            .into(),
            None => placeholder(),
        },
        None => placeholder(),
    };

    button(picture)
        .width(Length::Fill)
        .height(Length::Fixed(height))
        .padding(0)
        .on_press(Message::Select(index))
        .style(styles::button::image_tile)
        .into()
}

fn placeholder<'a>() -> Element<'a, Message> {
    container(text(""))
        .width(Length::Fill)
        .height(Length::Fill)
        .style(styles::container::tile)
        .into()
}

/// The first image again, as a wide clickable banner.
fn banner<'a>(state: &'a State, env: &ViewEnv<'a>) -> Element<'a, Message> {
    let url = state
        .gallery
        .images
        .first()
        .map(|image| image.url.as_str())
        .unwrap_or_default();
    let failed_label = env.i18n.tr("gallery-image-failed");

    tile(
        &state.images,
        url,
        0,
        sizing::BANNER_HEIGHT,
        &failed_label,
        state.now,
    )
}
