//! Start screen: description, medical disclaimer, start button.

use crate::app::Message;
use crate::ui::{self, components};
use iced::widget::{column, container, space};
use iced::{Color, Element, Fill};

pub fn view<'a>() -> Element<'a, Message> {
    let card = components::card_container(
        column![
            ui::body_text(
                "This application uses artificial intelligence to analyze skin lesions \
                 and moles for potential cancer indicators."
            ),
            components::notice_box(
                "IMPORTANT NOTICE:",
                "This application is not intended to diagnose cancer or replace \
                 professional medical advice. Consult a qualified healthcare provider \
                 for proper diagnosis and treatment."
            ),
            components::primary_button("Start Analysis", Some(Message::Begin)),
        ]
        .spacing(24),
        Color::WHITE,
        Color::from_rgb(0.89, 0.91, 0.94),
    );

    column![
        space().height(40),
        container(ui::title_text("AI Skin Analysis")).center_x(Fill),
        card,
    ]
    .spacing(20)
    .into()
}
