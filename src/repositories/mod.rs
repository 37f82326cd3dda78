pub mod camera;
pub mod file_system;

pub use camera::{Camera, CameraPermission, FileCamera, RawPhoto};
