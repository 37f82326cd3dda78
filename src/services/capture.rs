//! Capture transform: guide-aligned square crop, fixed-size resize, JPEG encode.

use crate::config::AppConfig;
use crate::domain::GuideGeometry;
use crate::error::{MoleScanError, Result};
use crate::repositories::{file_system, Camera, RawPhoto};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use log::{debug, info, warn};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct CaptureTransform {
    geometry: GuideGeometry,
    output_size: u32,
    jpeg_quality: u8,
    storage_dir: PathBuf,
}

impl CaptureTransform {
    pub fn new(geometry: GuideGeometry, storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            geometry,
            output_size: crate::config::OUTPUT_SIZE,
            jpeg_quality: crate::config::JPEG_QUALITY,
            storage_dir: storage_dir.into(),
        }
    }

    pub fn from_config(config: &AppConfig, screen_width: f64) -> Self {
        Self {
            geometry: GuideGeometry::new(screen_width, config.guide_fraction),
            output_size: config.output_size,
            jpeg_quality: config.jpeg_quality,
            storage_dir: config.storage_dir.clone(),
        }
    }

    /// Writes the cropped and resized derivative of `raw` to a fresh file.
    ///
    /// # Errors
    ///
    /// Returns error if the photo cannot be decoded, cropped, or written
    pub fn apply(&self, raw: &RawPhoto) -> Result<PathBuf> {
        let img = image::open(&raw.path).map_err(|e| {
            MoleScanError::TransformFailed(format!("{}: {}", raw.path.display(), e))
        })?;

        let crop = self.geometry.crop_for(img.width(), img.height())?;
        debug!(
            "Cropping {}x{} photo at ({}, {}) size {}",
            img.width(),
            img.height(),
            crop.x,
            crop.y,
            crop.size
        );

        let output = img
            .crop_imm(crop.x, crop.y, crop.size, crop.size)
            .resize_exact(self.output_size, self.output_size, FilterType::Lanczos3)
            .to_rgb8();

        file_system::ensure_dir(&self.storage_dir)?;
        let (path, file) = file_system::create_photo_file(
            &self.storage_dir,
            chrono::Utc::now().timestamp_millis(),
        )?;

        if let Err(e) = self.encode(file, &output) {
            warn!("Discarding partial capture {}: {}", path.display(), e);
            let _ = std::fs::remove_file(&path);
            return Err(e);
        }

        info!("Saved capture to {}", path.display());
        Ok(path)
    }

    fn encode(&self, file: std::fs::File, output: &image::RgbImage) -> Result {
        let mut writer = BufWriter::new(file);
        {
            let mut encoder = JpegEncoder::new_with_quality(&mut writer, self.jpeg_quality);
            encoder.encode_image(output)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Takes a picture and transforms it on the blocking pool.
///
/// # Errors
///
/// Returns error if the camera or the transform fails
pub async fn capture<C>(camera: C, transform: CaptureTransform) -> Result<PathBuf>
where
    C: Camera + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let raw = camera.take_picture()?;
        transform.apply(&raw)
    })
    .await
    .map_err(|e| MoleScanError::CaptureFailed(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::FileCamera;
    use image::{Rgb, RgbImage};
    use std::path::Path;

    /// 100x100 photo: red inside the central 60px square, blue around it.
    fn write_target(dir: &Path) -> RawPhoto {
        let img = RgbImage::from_fn(100, 100, |x, y| {
            if (20..80).contains(&x) && (20..80).contains(&y) {
                Rgb([255, 0, 0])
            } else {
                Rgb([0, 0, 255])
            }
        });
        let path = dir.join("raw.png");
        img.save(&path).unwrap();
        RawPhoto {
            path,
            width: 100,
            height: 100,
        }
    }

    #[test]
    fn output_is_square_jpeg_of_fixed_size() {
        let dir = tempfile::tempdir().unwrap();
        let raw = write_target(dir.path());
        let transform = CaptureTransform::new(GuideGeometry::new(100.0, 0.6), dir.path().join("out"));

        let path = transform.apply(&raw).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("mole-scan-") && name.ends_with(".jpg"));
        assert_eq!(image::image_dimensions(&path).unwrap(), (1120, 1120));
    }

    #[test]
    fn output_contains_only_the_guided_region() {
        let dir = tempfile::tempdir().unwrap();
        let raw = write_target(dir.path());
        let transform = CaptureTransform::new(GuideGeometry::new(100.0, 0.6), dir.path());

        let out = image::open(transform.apply(&raw).unwrap()).unwrap().to_rgb8();
        for (x, y) in [(0, 0), (1119, 0), (0, 1119), (1119, 1119), (560, 560)] {
            let Rgb([r, _, b]) = *out.get_pixel(x, y);
            assert!(r > 200 && b < 60, "pixel ({}, {}) = {:?}", x, y, (r, b));
        }
    }

    #[test]
    fn original_is_left_untouched_and_captures_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let raw = write_target(dir.path());
        let before = std::fs::read(&raw.path).unwrap();
        let transform = CaptureTransform::new(GuideGeometry::new(100.0, 0.6), dir.path().join("out"));

        let first = transform.apply(&raw).unwrap();
        let second = transform.apply(&raw).unwrap();

        assert_ne!(first, second);
        assert_eq!(std::fs::read(&raw.path).unwrap(), before);
        assert_eq!(file_system::count_photos(&transform.storage_dir).unwrap(), 2);
    }

    #[test]
    fn undecodable_photo_fails_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"not a jpeg").unwrap();
        let raw = RawPhoto {
            path,
            width: 10,
            height: 10,
        };
        let out_dir = dir.path().join("out");
        let transform = CaptureTransform::new(GuideGeometry::new(100.0, 0.6), &out_dir);

        assert!(matches!(
            transform.apply(&raw),
            Err(MoleScanError::TransformFailed(_))
        ));
        assert_eq!(file_system::count_photos(&out_dir).unwrap(), 0);
    }

    #[tokio::test]
    async fn capture_runs_camera_then_transform() {
        let dir = tempfile::tempdir().unwrap();
        let raw = write_target(dir.path());
        let mut camera = FileCamera::new(&raw.path);
        camera.request_permission();
        let transform = CaptureTransform::new(GuideGeometry::new(390.0, 0.6), dir.path().join("out"));

        let path = capture(camera, transform).await.unwrap();
        assert!(path.starts_with(dir.path().join("out")));
    }

    #[tokio::test]
    async fn capture_without_permission_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let raw = write_target(dir.path());
        let transform = CaptureTransform::new(GuideGeometry::new(390.0, 0.6), dir.path());

        let err = capture(FileCamera::new(&raw.path), transform).await.unwrap_err();
        assert_eq!(err, MoleScanError::PermissionDenied);
    }

    #[test]
    fn from_config_uses_configured_storage() {
        let config = AppConfig::with_storage_dir("/tmp/mole-scan-test");
        let transform = CaptureTransform::from_config(&config, 400.0);
        assert_eq!(transform.storage_dir, Path::new("/tmp/mole-scan-test"));
        assert!((transform.geometry.guide_size() - 240.0).abs() < 1e-9);
    }
}
