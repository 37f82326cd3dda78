//! Application settings: compiled-in defaults with optional environment overrides.

use crate::domain::DEFAULT_GUIDE_FRACTION;
use crate::error::{MoleScanError, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://195.242.13.74:8090/check";
pub const OUTPUT_SIZE: u32 = 1120;
pub const JPEG_QUALITY: u8 = 100;
pub const WINDOW_WIDTH: f32 = 520.0;
pub const WINDOW_HEIGHT: f32 = 860.0;

const ENDPOINT_VAR: &str = "MOLE_SCAN_ENDPOINT";
const STORAGE_DIR_VAR: &str = "MOLE_SCAN_STORAGE_DIR";
const GUIDE_FRACTION_VAR: &str = "MOLE_SCAN_GUIDE_FRACTION";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub endpoint: String,
    pub storage_dir: PathBuf,
    pub guide_fraction: f64,
    pub output_size: u32,
    pub jpeg_quality: u8,
    pub connectivity_interval: Duration,
    pub connectivity_timeout: Duration,
}

impl AppConfig {
    /// Compiled-in defaults with captures stored under `storage_dir`.
    pub fn with_storage_dir(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            storage_dir: storage_dir.into(),
            guide_fraction: DEFAULT_GUIDE_FRACTION,
            output_size: OUTPUT_SIZE,
            jpeg_quality: JPEG_QUALITY,
            connectivity_interval: Duration::from_secs(10),
            connectivity_timeout: Duration::from_secs(3),
        }
    }

    /// Loads `.env` if present, then applies `MOLE_SCAN_*` overrides.
    ///
    /// # Errors
    ///
    /// Returns error if an override cannot be parsed or the result is invalid
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            log::debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns error if an override cannot be parsed or the result is invalid
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let storage_dir = match lookup(STORAGE_DIR_VAR) {
            Some(dir) => PathBuf::from(dir),
            None => storage_dir_under(dirs::data_local_dir())?,
        };
        let mut config = Self::with_storage_dir(storage_dir);

        if let Some(endpoint) = lookup(ENDPOINT_VAR) {
            config.endpoint = endpoint;
        }
        if let Some(raw) = lookup(GUIDE_FRACTION_VAR) {
            config.guide_fraction = raw.trim().parse().map_err(|_| {
                MoleScanError::Config(format!("{} is not a number: {}", GUIDE_FRACTION_VAR, raw))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns error describing the first invalid setting
    pub fn validate(&self) -> Result {
        let url = reqwest::Url::parse(&self.endpoint)
            .map_err(|e| MoleScanError::Config(format!("invalid endpoint {}: {}", self.endpoint, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(MoleScanError::Config(format!(
                "endpoint must be http or https: {}",
                self.endpoint
            )));
        }
        if !(self.guide_fraction > 0.0 && self.guide_fraction <= 1.0) {
            return Err(MoleScanError::Config(format!(
                "guide fraction must be within (0, 1], got {}",
                self.guide_fraction
            )));
        }
        if self.output_size == 0 {
            return Err(MoleScanError::Config("output size must be positive".into()));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(MoleScanError::Config(format!(
                "JPEG quality must be within 1..=100, got {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }
}

/// App-private directory for captured photos, below the platform's local data dir.
fn storage_dir_under(data_dir: Option<PathBuf>) -> Result<PathBuf> {
    data_dir.map(|dir| dir.join("mole-scan")).ok_or_else(|| {
        MoleScanError::Config(format!(
            "no local data directory on this platform; set {}",
            STORAGE_DIR_VAR
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.output_size, 1120);
        assert_eq!(config.jpeg_quality, 100);
        assert!((config.guide_fraction - 0.6).abs() < f64::EPSILON);
        assert!(config.storage_dir.ends_with("mole-scan"));
    }

    #[test]
    fn storage_dir_follows_platform_data_dir() {
        let Some(data_dir) = dirs::data_local_dir() else {
            return;
        };
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.storage_dir, data_dir.join("mole-scan"));
    }

    #[test]
    fn missing_data_dir_is_a_config_error() {
        assert!(matches!(
            storage_dir_under(None),
            Err(MoleScanError::Config(_))
        ));
        assert_eq!(
            storage_dir_under(Some(PathBuf::from("/data"))).unwrap(),
            PathBuf::from("/data/mole-scan")
        );
    }

    #[test]
    fn overrides_are_applied() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ENDPOINT_VAR, "http://localhost:9000/check"),
            (STORAGE_DIR_VAR, "/tmp/scans"),
            (GUIDE_FRACTION_VAR, " 0.5 "),
        ]))
        .unwrap();
        assert_eq!(config.endpoint, "http://localhost:9000/check");
        assert_eq!(config.storage_dir, PathBuf::from("/tmp/scans"));
        assert!((config.guide_fraction - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn bad_overrides_are_rejected() {
        for pairs in [
            [(GUIDE_FRACTION_VAR, "wide")],
            [(GUIDE_FRACTION_VAR, "1.5")],
            [(ENDPOINT_VAR, "not a url")],
            [(ENDPOINT_VAR, "ftp://host/check")],
        ] {
            assert!(matches!(
                AppConfig::from_lookup(lookup_from(&pairs)),
                Err(MoleScanError::Config(_))
            ));
        }
    }
}
