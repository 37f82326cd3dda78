pub mod capture;
pub mod connectivity;
pub mod submission;

pub use capture::{capture, CaptureTransform};
pub use connectivity::{probe, Connectivity};
pub use submission::SubmissionClient;
