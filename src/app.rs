use crate::ui;
use iced::widget::{column, container, scrollable};
use iced::{Element, Fill, Subscription, Task};
use log::{info, warn};
use mole_scan::config::WINDOW_WIDTH;
use mole_scan::prelude::*;
use std::path::PathBuf;

const PAGE_PADDING: f32 = 20.0;

#[derive(Debug, Clone)]
pub enum Message {
    Begin,
    AgeChanged(String),
    AnswerSelected(Question, Answer),
    QuestionnaireDone,
    CameraSourceChanged(String),
    RequestPermission,
    TakePicture,
    PictureTaken(Ticket, Result<PathBuf, MoleScanError>),
    Retake,
    Confirm,
    Submitted(Ticket, Result<SubmissionResult, MoleScanError>),
    Restart,
    WindowResized(f32),
    ProbeConnectivity,
    ConnectivityChecked(Connectivity),
}

pub struct App {
    config: AppConfig,
    flow: FlowController,
    camera: FileCamera,
    camera_source: String,
    client: SubmissionClient,
    screen_width: f32,
    connectivity: Connectivity,
    /// Capture or upload bound to the current screen; aborted when it goes away.
    pending: Option<iced::task::Handle>,
}

impl App {
    pub fn new(config: AppConfig) -> (Self, Task<Message>) {
        let client = SubmissionClient::from_config(&config);
        let first_probe = Task::perform(
            probe(config.endpoint.clone(), config.connectivity_timeout),
            Message::ConnectivityChecked,
        );

        (
            Self {
                config,
                flow: FlowController::new(),
                camera: FileCamera::default(),
                camera_source: String::new(),
                client,
                screen_width: WINDOW_WIDTH,
                connectivity: Connectivity::Unknown,
                pending: None,
            },
            first_probe,
        )
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Begin => log_rejected(self.flow.begin()),
            Message::AgeChanged(age) => log_rejected(self.flow.set_age(&age)),
            Message::AnswerSelected(question, answer) => {
                log_rejected(self.flow.set_answer(question, answer))
            }
            Message::QuestionnaireDone => log_rejected(self.flow.submit_questionnaire()),
            Message::CameraSourceChanged(source) => {
                self.camera.set_source(source.trim());
                self.camera_source = source;
                self.flow.set_permission(self.camera.permission());
                Task::none()
            }
            Message::RequestPermission => {
                let permission = self.camera.request_permission();
                self.flow.set_permission(permission);
                Task::none()
            }
            Message::TakePicture => match self.flow.begin_capture() {
                Ok(ticket) => {
                    let transform =
                        CaptureTransform::from_config(&self.config, self.viewfinder_width());
                    let camera = self.camera.clone();
                    self.track(Task::perform(capture(camera, transform), move |result| {
                        Message::PictureTaken(ticket, result)
                    }))
                }
                Err(e) => {
                    warn!("Capture not started: {}", e);
                    Task::none()
                }
            },
            Message::PictureTaken(ticket, result) => {
                if self.flow.finish_capture(ticket, result) != Applied::Stale {
                    self.pending = None;
                }
                Task::none()
            }
            Message::Retake => {
                self.abandon_pending();
                log_rejected(self.flow.retake())
            }
            Message::Confirm => {
                if !self.connectivity.allows_submission() {
                    warn!("Endpoint unreachable, submission paused");
                    return Task::none();
                }
                match self.flow.begin_submission() {
                    Ok(request) => {
                        let client = self.client.clone();
                        let ticket = request.ticket;
                        self.track(Task::perform(
                            async move { client.submit(&request.photo, &request.params).await },
                            move |result| Message::Submitted(ticket, result),
                        ))
                    }
                    Err(e) => {
                        warn!("Submission not started: {}", e);
                        Task::none()
                    }
                }
            }
            Message::Submitted(ticket, result) => {
                if self.flow.finish_submission(ticket, result) != Applied::Stale {
                    self.pending = None;
                }
                Task::none()
            }
            Message::Restart => {
                self.abandon_pending();
                log_rejected(self.flow.restart())
            }
            Message::WindowResized(width) => {
                self.screen_width = width;
                Task::none()
            }
            Message::ProbeConnectivity => Task::perform(
                probe(self.config.endpoint.clone(), self.config.connectivity_timeout),
                Message::ConnectivityChecked,
            ),
            Message::ConnectivityChecked(state) => {
                if state != self.connectivity {
                    info!("Connectivity: {:?}", state);
                }
                self.connectivity = state;
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let screen = match self.flow.screen() {
            Screen::Start => ui::start_view::view(),
            Screen::Questionnaire(questionnaire) => ui::questionnaire_view::view(questionnaire),
            Screen::Camera(step) => ui::camera_view::view(
                step,
                self.flow.permission(),
                &self.camera_source,
                self.camera.source(),
                self.camera.dimensions(),
                GuideGeometry::new(self.viewfinder_width(), self.config.guide_fraction),
            ),
            Screen::Preview(step) => ui::preview_view::view(step, self.connectivity),
            Screen::Result(result) => ui::result_view::view(result),
        };

        let mut content = column![].spacing(10).padding(PAGE_PADDING);
        if self.connectivity == Connectivity::Offline {
            content = content.push(ui::offline_banner());
        }

        container(scrollable(content.push(screen)))
            .width(Fill)
            .height(Fill)
            .into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            iced::time::every(self.config.connectivity_interval)
                .map(|_| Message::ProbeConnectivity),
            iced::window::resize_events().map(|(_id, size)| Message::WindowResized(size.width)),
        ])
    }

    /// Width the camera photo is drawn at; the guide and the crop are both sized from it.
    fn viewfinder_width(&self) -> f64 {
        f64::from((self.screen_width - 2.0 * PAGE_PADDING).max(1.0))
    }

    fn track(&mut self, task: Task<Message>) -> Task<Message> {
        let (task, handle) = task.abortable();
        self.abandon_pending();
        self.pending = Some(handle);
        task
    }

    fn abandon_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

fn log_rejected(result: mole_scan::Result) -> Task<Message> {
    if let Err(e) = result {
        warn!("Ignored: {}", e);
    }
    Task::none()
}
