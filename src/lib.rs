pub mod config;
pub mod domain;
pub mod error;
pub mod flow;
pub mod repositories;
pub mod services;

// Public, stable-ish API surface for consumers (UI / other crates)

pub use crate::config::AppConfig;

pub use crate::error::{MoleScanError, Result};

pub use crate::flow::{Applied, FlowController, Screen, SubmissionRequest, Ticket};

pub mod prelude {
    pub use crate::config::AppConfig;
    pub use crate::domain::{
        Answer, CapturedSession, Classification, CropRegion, GuideGeometry, Question,
        Questionnaire, SessionParams, SubmissionResult,
    };
    pub use crate::error::{MoleScanError, Result};
    pub use crate::flow::{
        Applied, CameraStep, FlowController, PreviewStep, Screen, SubmissionRequest,
        SubmissionState, Ticket,
    };
    pub use crate::repositories::{Camera, CameraPermission, FileCamera};
    pub use crate::services::{capture, probe, CaptureTransform, Connectivity, SubmissionClient};
}
