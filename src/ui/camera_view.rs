//! Camera screen.

use crate::app::Message;
use crate::ui::{self, components};
use iced::widget::{column, container, image, space, stack, text_input};
use iced::{Border, Color, ContentFit, Element, Fill, Padding};
use mole_scan::domain::GuideGeometry;
use mole_scan::flow::CameraStep;
use mole_scan::repositories::CameraPermission;
use std::path::Path;

pub fn view<'a>(
    step: &'a CameraStep,
    permission: CameraPermission,
    source_input: &'a str,
    source: &'a Path,
    dimensions: Option<(u32, u32)>,
    geometry: GuideGeometry,
) -> Element<'a, Message> {
    let mut content = column![
        ui::title_text("Take a Picture"),
        text_input("Path to a photo of the mole", source_input)
            .on_input(Message::CameraSourceChanged)
            .padding(12)
            .size(14),
    ]
    .spacing(16);

    content = match permission {
        CameraPermission::Granted => {
            let label = if step.capturing {
                "Taking picture..."
            } else {
                "Take Picture"
            };

            content
                .push(viewfinder(source, dimensions, geometry))
                .push(ui::body_text(
                    "Position the mole to analyze within the square",
                ))
                .push(components::primary_button(
                    label,
                    (!step.capturing).then_some(Message::TakePicture),
                ))
        }
        CameraPermission::Undetermined | CameraPermission::Denied => {
            let mut blocked = content
                .push(ui::body_text("We need your permission to show the camera"))
                .push(components::primary_button(
                    "Grant permission",
                    Some(Message::RequestPermission),
                ));
            if permission == CameraPermission::Denied {
                blocked = blocked.push(ui::error_text(format!(
                    "Access to {} was denied.",
                    source.display()
                )));
            }
            blocked
        }
    };

    if let Some(error) = &step.error {
        content = content.push(ui::error_text(error.to_user_string()));
    }

    content.into()
}

/// The photo drawn `geometry.screen_width` wide with the guide square on top.
fn viewfinder<'a>(
    source: &Path,
    dimensions: Option<(u32, u32)>,
    geometry: GuideGeometry,
) -> Element<'a, Message> {
    let handle = image::Handle::from_path(source);
    let Some(overlay) = dimensions.and_then(|(w, h)| geometry.overlay_for(w, h).ok()) else {
        // Not decodable; capture will report why.
        return image(handle).width(Fill).height(320).into();
    };

    let photo = image(handle)
        .width(px(geometry.screen_width))
        .height(px(overlay.view_height))
        .content_fit(ContentFit::Fill);

    let guide = container(space())
        .width(px(overlay.size))
        .height(px(overlay.size))
        .style(|_theme| container::Style {
            background: Some(Color::from_rgba(1.0, 1.0, 1.0, 0.08).into()),
            border: Border {
                color: Color::WHITE,
                width: 3.0,
                radius: 4.0.into(),
            },
            ..Default::default()
        });

    stack![
        photo,
        container(guide).padding(Padding {
            top: px(overlay.y),
            right: 0.0,
            bottom: 0.0,
            left: px(overlay.x),
        }),
    ]
    .into()
}

#[allow(clippy::cast_possible_truncation)]
fn px(value: f64) -> f32 {
    value as f32
}
