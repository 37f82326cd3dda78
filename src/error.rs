use thiserror::Error;

pub type Result<T = (), E = MoleScanError> = std::result::Result<T, E>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MoleScanError {
    #[error("Invalid photo dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid guide geometry: {0}")]
    InvalidGuide(String),

    #[error("Camera permission denied")]
    PermissionDenied,

    #[error("Failed to capture photo: {0}")]
    CaptureFailed(String),

    #[error("Failed to transform photo: {0}")]
    TransformFailed(String),

    #[error("A capture is already in progress")]
    CaptureInFlight,

    #[error("File does not exist: {0}")]
    PhotoMissing(String),

    #[error("Network response was not ok (HTTP {status})")]
    UploadFailed { status: u16 },

    #[error("Network request failed: {0}")]
    Network(String),

    #[error("Malformed response from server: {0}")]
    MalformedResponse(String),

    #[error("Unrecognized classification: {0}")]
    UnrecognizedClassification(String),

    #[error("A submission is already in progress")]
    SubmissionInFlight,

    #[error("Cannot {action} from the {screen} screen")]
    InvalidTransition {
        action: &'static str,
        screen: &'static str,
    },

    #[error("File system error: {0}")]
    FileSystem(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl MoleScanError {
    /// Errors raised before the upload left the machine.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::PhotoMissing(_) | Self::SubmissionInFlight)
    }

    /// Text shown inline under the preview or camera view.
    pub fn to_user_string(&self) -> String {
        format!("Error: {}", self)
    }
}

impl From<std::io::Error> for MoleScanError {
    fn from(e: std::io::Error) -> Self {
        MoleScanError::FileSystem(e.to_string())
    }
}

impl From<image::ImageError> for MoleScanError {
    fn from(e: image::ImageError) -> Self {
        MoleScanError::TransformFailed(e.to_string())
    }
}

impl From<reqwest::Error> for MoleScanError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => MoleScanError::UploadFailed {
                status: status.as_u16(),
            },
            None if e.is_decode() => MoleScanError::MalformedResponse(e.to_string()),
            None => MoleScanError::Network(e.to_string()),
        }
    }
}
