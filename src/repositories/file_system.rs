//! File system helpers for capture storage.

use crate::error::{MoleScanError, Result};
use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const PHOTO_PREFIX: &str = "mole-scan-";
const PHOTO_EXTENSION: &str = "jpg";

pub fn photo_file_name(millis: i64) -> String {
    format!("{}{}.{}", PHOTO_PREFIX, millis, PHOTO_EXTENSION)
}

pub fn ensure_dir(path: &Path) -> Result {
    std::fs::create_dir_all(path).map_err(|e| {
        MoleScanError::FileSystem(format!("{}: {}", path.display(), e))
    })
}

/// Creates `mole-scan-<millis>.jpg` in `dir`, bumping the timestamp until the
/// name is free. Never opens an existing file.
pub fn create_photo_file(dir: &Path, millis: i64) -> Result<(PathBuf, File)> {
    let mut stamp = millis;
    loop {
        let path = dir.join(photo_file_name(stamp));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => stamp += 1,
            Err(e) => {
                return Err(MoleScanError::FileSystem(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        }
    }
}

pub async fn file_exists(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

/// Number of stored captures. Old captures are never removed.
#[cfg(test)]
pub(crate) fn count_photos(dir: &Path) -> Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }

    let count = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.starts_with(PHOTO_PREFIX)
                && e.path()
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case(PHOTO_EXTENSION))
                    .unwrap_or(false)
        })
        .count();

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_uses_timestamp() {
        assert_eq!(photo_file_name(1_700_000_000_123), "mole-scan-1700000000123.jpg");
    }

    #[test]
    fn colliding_timestamps_get_distinct_files() {
        let dir = tempfile::tempdir().unwrap();
        let (first, _) = create_photo_file(dir.path(), 42).unwrap();
        let (second, _) = create_photo_file(dir.path(), 42).unwrap();
        assert_ne!(first, second);
        assert!(second.ends_with("mole-scan-43.jpg"));
        assert_eq!(count_photos(dir.path()).unwrap(), 2);
    }

    #[test]
    fn missing_dir_has_no_photos() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(count_photos(&dir.path().join("nope")).unwrap(), 0);
    }

    #[tokio::test]
    async fn file_exists_is_false_for_directories() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!file_exists(dir.path()).await);
        let (path, _) = create_photo_file(dir.path(), 1).unwrap();
        assert!(file_exists(&path).await);
    }
}
