pub mod camera_view;
pub mod components;
pub mod preview_view;
pub mod questionnaire_view;
pub mod result_view;
pub mod start_view;

use iced::widget::{container, text};
use iced::{Color, Element};

pub const HEADING: Color = rgb(0.17, 0.32, 0.51);
pub const BODY: Color = rgb(0.29, 0.33, 0.41);
pub const DANGER: Color = rgb(0.9, 0.24, 0.24);
pub const SUCCESS: Color = rgb(0.28, 0.73, 0.47);
pub const WARNING: Color = rgb(0.85, 0.55, 0.1);

const fn rgb(r: f32, g: f32, b: f32) -> Color {
    Color { r, g, b, a: 1.0 }
}

pub fn title_text(title: &str) -> text::Text<'_> {
    text(title).size(32).color(HEADING)
}

pub fn body_text(body: &str) -> text::Text<'_> {
    text(body).size(16).color(BODY)
}

pub fn error_text<'a>(message: String) -> text::Text<'a> {
    text(message).size(16).color(DANGER)
}

pub fn card_style(_theme: &iced::Theme, bg_color: Color, border_color: Color) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(bg_color)),
        border: iced::Border {
            color: border_color,
            width: 1.0,
            radius: 8.0.into(),
        },
        ..Default::default()
    }
}

pub fn offline_banner<'a, M: 'a>() -> Element<'a, M> {
    container(
        text("Cannot reach the analysis server. Uploads are paused until the connection returns.")
            .size(13),
    )
    .padding(12)
    .style(|theme| {
        card_style(
            theme,
            Color::from_rgb(1.0, 0.96, 0.9),
            WARNING,
        )
    })
    .into()
}
