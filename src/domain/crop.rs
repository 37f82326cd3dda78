//! Crop geometry for the on-screen alignment guide.

use crate::error::{MoleScanError, Result};

pub const DEFAULT_GUIDE_FRACTION: f64 = 0.6;

/// The square guide drawn over the camera view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideGeometry {
    pub screen_width: f64,
    pub guide_fraction: f64,
}

impl GuideGeometry {
    pub fn new(screen_width: f64, guide_fraction: f64) -> Self {
        Self {
            screen_width,
            guide_fraction,
        }
    }

    pub fn guide_size(&self) -> f64 {
        self.screen_width * self.guide_fraction
    }

    pub fn crop_for(&self, photo_width: u32, photo_height: u32) -> Result<CropRegion> {
        CropRegion::compute(
            photo_width,
            photo_height,
            self.guide_size(),
            self.screen_width,
        )
    }

    /// Where the guide sits over the photo when the photo is drawn
    /// `screen_width` wide. The square is the crop region in view units.
    pub fn overlay_for(&self, photo_width: u32, photo_height: u32) -> Result<GuideOverlay> {
        let crop = self.crop_for(photo_width, photo_height)?;
        let scale = self.screen_width / f64::from(photo_width);
        Ok(GuideOverlay {
            x: f64::from(crop.x) * scale,
            y: f64::from(crop.y) * scale,
            size: f64::from(crop.size) * scale,
            view_height: f64::from(photo_height) * scale,
        })
    }
}

/// The guide square in view coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideOverlay {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub view_height: f64,
}

/// Square region of the raw photo, in photo pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub size: u32,
}

impl CropRegion {
    /// Scales the guide from screen space into photo space and centres it.
    ///
    /// The side is `guide_size * photo_width / screen_width`, clamped to the
    /// shorter photo side so the region always stays inside the photo.
    pub fn compute(
        photo_width: u32,
        photo_height: u32,
        guide_size: f64,
        screen_width: f64,
    ) -> Result<Self> {
        if photo_width == 0 || photo_height == 0 {
            return Err(MoleScanError::InvalidDimensions {
                width: photo_width,
                height: photo_height,
            });
        }
        if !screen_width.is_finite() || screen_width <= 0.0 {
            return Err(MoleScanError::InvalidGuide(format!(
                "screen width must be positive, got {}",
                screen_width
            )));
        }
        if !guide_size.is_finite() || guide_size <= 0.0 || guide_size > screen_width {
            return Err(MoleScanError::InvalidGuide(format!(
                "guide size {} must be within (0, {}]",
                guide_size, screen_width
            )));
        }

        let scale_factor = f64::from(photo_width) / screen_width;
        let shorter = photo_width.min(photo_height);

        #[allow(clippy::cast_possible_truncation)]
        let size = ((guide_size * scale_factor).round() as u32).clamp(1, shorter);

        Ok(Self {
            x: (photo_width - size) / 2,
            y: (photo_height - size) / 2,
            size,
        })
    }
}
