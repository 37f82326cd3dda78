//! Picture preview with retake / confirm.

use crate::app::Message;
use crate::ui;
use iced::widget::{button, column, container, row, text};
use iced::{Element, Fill};
use mole_scan::flow::{PreviewStep, SubmissionState};
use mole_scan::services::Connectivity;

pub fn view(step: &PreviewStep, connectivity: Connectivity) -> Element<'_, Message> {
    let in_flight = step.submission == SubmissionState::InFlight;
    let can_confirm = !in_flight && connectivity.allows_submission();

    let photo = iced::widget::image(iced::widget::image::Handle::from_path(
        &step.session.photo,
    ))
    .width(Fill)
    .height(420);

    let buttons = row![
        button(text("Retake").size(16))
            .on_press(Message::Retake)
            .padding(15)
            .width(Fill)
            .style(button::secondary),
        button(text("Confirm").size(16))
            .on_press_maybe(can_confirm.then_some(Message::Confirm))
            .padding(15)
            .width(Fill)
            .style(button::success),
    ]
    .spacing(20);

    let mut content = column![container(photo).center_x(Fill), buttons].spacing(20);

    match &step.submission {
        SubmissionState::InFlight => {
            content = content.push(container(ui::body_text("Uploading...")).center_x(Fill));
        }
        SubmissionState::Failed(error) => {
            content = content.push(ui::error_text(error.to_user_string()));
        }
        SubmissionState::Idle => {}
    }

    content.into()
}
