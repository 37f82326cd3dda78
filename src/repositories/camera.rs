//! Camera access.
//!
//! Desktop builds have no camera preview of their own, so [`FileCamera`]
//! "takes a picture" by reading a still image chosen by the user.

use crate::error::{MoleScanError, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraPermission {
    #[default]
    Undetermined,
    Granted,
    Denied,
}

impl CameraPermission {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// A freshly captured, untouched photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPhoto {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

pub trait Camera {
    fn permission(&self) -> CameraPermission;

    fn request_permission(&mut self) -> CameraPermission;

    /// # Errors
    ///
    /// Returns `PermissionDenied` without permission, `CaptureFailed` otherwise
    fn take_picture(&self) -> Result<RawPhoto>;
}

#[derive(Debug, Clone, Default)]
pub struct FileCamera {
    source: PathBuf,
    permission: CameraPermission,
    /// Size of the source image, read when permission is granted.
    dimensions: Option<(u32, u32)>,
}

impl FileCamera {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            permission: CameraPermission::Undetermined,
            dimensions: None,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Width and height of what the viewfinder shows, once granted and decodable.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }

    /// Pointing the camera somewhere else invalidates any previous grant.
    pub fn set_source(&mut self, source: impl Into<PathBuf>) {
        self.source = source.into();
        self.permission = CameraPermission::Undetermined;
        self.dimensions = None;
    }
}

impl Camera for FileCamera {
    fn permission(&self) -> CameraPermission {
        self.permission
    }

    fn request_permission(&mut self) -> CameraPermission {
        self.permission = match std::fs::File::open(&self.source) {
            Ok(_) => {
                self.dimensions = image::image_dimensions(&self.source).ok();
                CameraPermission::Granted
            }
            Err(e) => {
                log::warn!("Camera source {} not readable: {}", self.source.display(), e);
                self.dimensions = None;
                CameraPermission::Denied
            }
        };
        self.permission
    }

    fn take_picture(&self) -> Result<RawPhoto> {
        if !self.permission.is_granted() {
            return Err(MoleScanError::PermissionDenied);
        }

        let (width, height) = image::image_dimensions(&self.source).map_err(|e| {
            MoleScanError::CaptureFailed(format!("{}: {}", self.source.display(), e))
        })?;

        Ok(RawPhoto {
            path: self.source.clone(),
            width,
            height,
        })
    }
}
