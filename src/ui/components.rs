//! Reusable UI components.

use crate::ui;
use iced::widget::{button, container, text, Button};
use iced::{Color, Element, Fill};

pub fn primary_button<'a, M: Clone + 'a>(label: &'a str, on_press: Option<M>) -> Button<'a, M> {
    button(text(label).size(18))
        .on_press_maybe(on_press)
        .padding([14, 16])
        .width(Fill)
        .style(button::primary)
}

pub fn card_container<'a, M: 'a>(
    content: impl Into<Element<'a, M>>,
    bg: Color,
    border: Color,
) -> container::Container<'a, M> {
    container(content)
        .padding(24)
        .width(Fill)
        .style(move |theme| ui::card_style(theme, bg, border))
}

/// Highlighted box for notices that must not be missed.
pub fn notice_box<'a, M: 'a>(title: &'a str, body: &'a str) -> container::Container<'a, M> {
    container(
        iced::widget::column![
            text(title).size(14).color(ui::DANGER),
            text(body).size(14).color(ui::BODY),
        ]
        .spacing(8),
    )
    .padding(16)
    .width(Fill)
    .style(|theme| {
        ui::card_style(
            theme,
            Color::from_rgb(1.0, 0.96, 0.96),
            Color::from_rgb(1.0, 0.7, 0.7),
        )
    })
}
