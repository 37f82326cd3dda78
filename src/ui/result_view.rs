//! Result screens, one per classification.

use crate::app::Message;
use crate::ui::{self, components};
use iced::widget::{column, container, text};
use iced::{Color, Element, Fill};
use mole_scan::domain::{Classification, SubmissionResult};

pub fn view(result: &SubmissionResult) -> Element<'_, Message> {
    let (accent, background) = match result.classification {
        Classification::Positive => (ui::DANGER, Color::from_rgb(1.0, 0.96, 0.96)),
        Classification::Negative => (ui::SUCCESS, Color::from_rgb(0.94, 1.0, 0.96)),
        Classification::Unsure => (ui::WARNING, Color::from_rgb(1.0, 0.98, 0.92)),
    };

    let card = components::card_container(
        column![
            container(text(result.classification.title()).size(24).color(accent)).center_x(Fill),
            text(&result.message).size(18).color(ui::BODY),
            ui::body_text(result.classification.guidance()),
        ]
        .spacing(20),
        background,
        accent,
    );

    column![
        card,
        components::primary_button("Start New Analysis", Some(Message::Restart)),
    ]
    .spacing(30)
    .into()
}
