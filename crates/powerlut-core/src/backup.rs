//! One-time backups
//!
//! Before a curve is modified for the first time a `.bak` copy is made next
//! to it. The copy is never refreshed, so it always holds the state from
//! before the first edit, however many edits follow.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{EngineError, Result};

/// What [`ensure_backup`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackupOutcome {
    Created,
    AlreadyExists,
}

/// `<path>.bak`
pub fn backup_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let mut name = path.as_ref().as_os_str().to_owned();
    name.push(".bak");
    PathBuf::from(name)
}

/// Copy `path` to `<path>.bak` unless a backup already exists
pub fn ensure_backup<P: AsRef<Path>>(path: P) -> Result<BackupOutcome> {
    let path = path.as_ref();
    let backup = backup_path(path);

    if backup.exists() {
        tracing::debug!("Backup already present at {}", backup.display());
        return Ok(BackupOutcome::AlreadyExists);
    }

    fs::copy(path, &backup).map_err(|e| EngineError::io(path, e))?;
    tracing::debug!("Created backup {}", backup.display());
    Ok(BackupOutcome::Created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_backup_path() {
        assert_eq!(
            backup_path("/cars/ks_bmw/data/power.lut"),
            PathBuf::from("/cars/ks_bmw/data/power.lut.bak")
        );
    }

    #[test]
    fn test_backup_created_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("power.lut");
        fs::write(&path, "0|50\n").unwrap();

        assert_eq!(ensure_backup(&path).unwrap(), BackupOutcome::Created);
        fs::write(&path, "0|100.0\n").unwrap();
        assert_eq!(ensure_backup(&path).unwrap(), BackupOutcome::AlreadyExists);

        assert_eq!(fs::read_to_string(backup_path(&path)).unwrap(), "0|50\n");
    }

    #[test]
    fn test_backup_missing_source() {
        let dir = TempDir::new().unwrap();
        let err = ensure_backup(dir.path().join("power.lut")).unwrap_err();
        assert!(err.is_not_found());
        assert!(!backup_path(dir.path().join("power.lut")).exists());
    }
}
