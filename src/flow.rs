//! Screen flow controller.
//!
//! Linear wizard `Start -> Questionnaire -> Camera -> Preview -> Result`, with a
//! `Preview -> Camera` retake edge and a `Result -> Start` restart edge. Each
//! screen owns exactly the parameters it was entered with; nothing is shared.
//!
//! Asynchronous work (capture, submission) is started with a [`Ticket`] bound to
//! the current screen instance. Every screen change invalidates outstanding
//! tickets, so a completion arriving after the user navigated away is dropped.

use crate::domain::{
    Answer, CapturedSession, Classification, Question, Questionnaire, SessionParams,
    SubmissionResult,
};
use crate::error::{MoleScanError, Result};
use crate::repositories::CameraPermission;
use log::{debug, error, info, warn};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Start,
    Questionnaire(Questionnaire),
    Camera(CameraStep),
    Preview(PreviewStep),
    Result(SubmissionResult),
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Start => "start",
            Screen::Questionnaire(_) => "questionnaire",
            Screen::Camera(_) => "camera",
            Screen::Preview(_) => "preview",
            Screen::Result(result) => match result.classification {
                Classification::Positive => "results/positive",
                Classification::Negative => "results/negative",
                Classification::Unsure => "results/unsure",
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraStep {
    pub params: SessionParams,
    pub capturing: bool,
    /// Last capture failure; cleared when the next capture starts.
    pub error: Option<MoleScanError>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    Idle,
    InFlight,
    Failed(MoleScanError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewStep {
    pub session: CapturedSession,
    pub submission: SubmissionState,
}

/// Binds an asynchronous operation to the screen instance that started it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    epoch: u64,
}

/// What a completion did to the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Advanced,
    Stayed,
    Stale,
}

/// Everything the submission client needs, cloned out of the preview screen.
#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    pub ticket: Ticket,
    pub photo: PathBuf,
    pub params: SessionParams,
}

#[derive(Debug)]
pub struct FlowController {
    screen: Screen,
    epoch: u64,
    permission: CameraPermission,
}

impl Default for FlowController {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowController {
    pub fn new() -> Self {
        Self {
            screen: Screen::Start,
            epoch: 0,
            permission: CameraPermission::Undetermined,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn permission(&self) -> CameraPermission {
        self.permission
    }

    fn go(&mut self, next: Screen) {
        info!("{} -> {}", self.screen.name(), next.name());
        self.screen = next;
        self.epoch += 1;
    }

    fn invalid(&self, action: &'static str) -> MoleScanError {
        MoleScanError::InvalidTransition {
            action,
            screen: self.screen.name(),
        }
    }

    fn ticket(&self) -> Ticket {
        Ticket { epoch: self.epoch }
    }

    fn is_current(&self, ticket: Ticket, what: &str) -> bool {
        if ticket.epoch == self.epoch {
            return true;
        }
        debug!(
            "Dropping stale {} result (ticket {}, now {})",
            what, ticket.epoch, self.epoch
        );
        false
    }

    // -------------------------------------------------------------------------
    // Start / questionnaire
    // -------------------------------------------------------------------------

    pub fn begin(&mut self) -> Result {
        match self.screen {
            Screen::Start => {
                self.go(Screen::Questionnaire(Questionnaire::new()));
                Ok(())
            }
            _ => Err(self.invalid("start the questionnaire")),
        }
    }

    pub fn set_age(&mut self, input: &str) -> Result {
        match &mut self.screen {
            Screen::Questionnaire(q) => {
                q.set_age(input);
                Ok(())
            }
            _ => Err(self.invalid("edit the age")),
        }
    }

    pub fn set_answer(&mut self, question: Question, answer: Answer) -> Result {
        match &mut self.screen {
            Screen::Questionnaire(q) => {
                q.set_answer(question, answer);
                Ok(())
            }
            _ => Err(self.invalid("answer a question")),
        }
    }

    /// Freezes the answers and moves on to the camera.
    pub fn submit_questionnaire(&mut self) -> Result {
        let Screen::Questionnaire(q) = &self.screen else {
            return Err(self.invalid("finish the questionnaire"));
        };
        let params = q.clone().freeze();
        self.go(Screen::Camera(CameraStep {
            params,
            capturing: false,
            error: None,
        }));
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Camera
    // -------------------------------------------------------------------------

    pub fn set_permission(&mut self, permission: CameraPermission) {
        if permission != self.permission {
            info!("Camera permission: {:?}", permission);
        }
        self.permission = permission;
    }

    pub fn begin_capture(&mut self) -> Result<Ticket> {
        let granted = self.permission.is_granted();
        let ticket = self.ticket();
        match &mut self.screen {
            Screen::Camera(step) if !granted => {
                step.error = Some(MoleScanError::PermissionDenied);
                Err(MoleScanError::PermissionDenied)
            }
            Screen::Camera(step) if step.capturing => Err(MoleScanError::CaptureInFlight),
            Screen::Camera(step) => {
                step.capturing = true;
                step.error = None;
                Ok(ticket)
            }
            _ => Err(self.invalid("take a picture")),
        }
    }

    pub fn finish_capture(&mut self, ticket: Ticket, result: Result<PathBuf>) -> Applied {
        if !self.is_current(ticket, "capture") {
            return Applied::Stale;
        }
        let Screen::Camera(step) = &mut self.screen else {
            return Applied::Stale;
        };

        match result {
            Ok(photo) => {
                let session = step.params.clone().with_photo(photo);
                self.go(Screen::Preview(PreviewStep {
                    session,
                    submission: SubmissionState::Idle,
                }));
                Applied::Advanced
            }
            Err(e) => {
                error!("Failed to take picture: {}", e);
                step.capturing = false;
                step.error = Some(e);
                Applied::Stayed
            }
        }
    }

    // -------------------------------------------------------------------------
    // Preview
    // -------------------------------------------------------------------------

    /// Discards the photo reference and returns to the camera. The file stays on disk.
    pub fn retake(&mut self) -> Result {
        let Screen::Preview(step) = &self.screen else {
            return Err(self.invalid("retake the photo"));
        };
        let params = step.session.clone().discard_photo();
        self.go(Screen::Camera(CameraStep {
            params,
            capturing: false,
            error: None,
        }));
        Ok(())
    }

    pub fn begin_submission(&mut self) -> Result<SubmissionRequest> {
        let ticket = self.ticket();
        match &mut self.screen {
            Screen::Preview(step) if step.submission == SubmissionState::InFlight => {
                Err(MoleScanError::SubmissionInFlight)
            }
            Screen::Preview(step) => {
                step.submission = SubmissionState::InFlight;
                Ok(SubmissionRequest {
                    ticket,
                    photo: step.session.photo.clone(),
                    params: step.session.params.clone(),
                })
            }
            _ => Err(self.invalid("submit the photo")),
        }
    }

    /// Branches on the classification; failures stay on the preview with the error.
    pub fn finish_submission(
        &mut self,
        ticket: Ticket,
        result: Result<SubmissionResult>,
    ) -> Applied {
        if !self.is_current(ticket, "submission") {
            return Applied::Stale;
        }
        let Screen::Preview(step) = &mut self.screen else {
            return Applied::Stale;
        };

        match result {
            Ok(outcome) => {
                self.go(Screen::Result(outcome));
                Applied::Advanced
            }
            Err(e) => {
                if e.is_precondition() {
                    warn!("Submission not sent: {}", e);
                } else {
                    error!("Upload failed: {}", e);
                }
                step.submission = SubmissionState::Failed(e);
                Applied::Stayed
            }
        }
    }

    // -------------------------------------------------------------------------
    // Result
    // -------------------------------------------------------------------------

    /// "Start New Analysis": back to a fresh start screen with nothing carried over.
    pub fn restart(&mut self) -> Result {
        match self.screen {
            Screen::Result(_) => {
                self.go(Screen::Start);
                Ok(())
            }
            _ => Err(self.invalid("start a new analysis")),
        }
    }
}
