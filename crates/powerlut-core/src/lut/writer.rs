//! Rewriting curve files

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use super::CurveFile;
use crate::error::{EngineError, Result};

/// Format a value the way curve files write them: always with a fraction
///
/// `200.0` becomes `"200.0"`, `12.35` stays `"12.35"`.
pub fn format_value(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}

/// Merge `scaled` back into `original`, keeping every other line verbatim
pub fn rebuild<S: AsRef<str>>(original: &[S], scaled: &[f64]) -> Vec<String> {
    CurveFile::from_lines(original).rebuild(scaled)
}

/// Replace the file at `path` with `lines`
///
/// Content goes to a temporary file in the same directory first and is then
/// renamed over the target, so readers never see a half-written curve.
pub fn serialize<S: AsRef<str>, P: AsRef<Path>>(lines: &[S], path: P) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| EngineError::io(dir, e))?;
    for line in lines {
        tmp.write_all(line.as_ref().as_bytes())
            .map_err(|e| EngineError::io(tmp.path(), e))?;
    }
    tmp.flush().map_err(|e| EngineError::io(tmp.path(), e))?;

    // Keep the permissions of the file being replaced
    if let Ok(meta) = std::fs::metadata(path) {
        if let Err(e) = std::fs::set_permissions(tmp.path(), meta.permissions()) {
            tracing::warn!(
                "Could not copy permissions of {} to the rewritten file: {}",
                path.display(),
                e
            );
        }
    }

    tmp.persist(path)
        .map_err(|e| EngineError::io(path, e.error))?;

    tracing::debug!("Wrote {} lines to {}", lines.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(200.0), "200.0");
        assert_eq!(format_value(0.0), "0.0");
        assert_eq!(format_value(12.35), "12.35");
        assert_eq!(format_value(1234.5), "1234.5");
    }

    #[test]
    fn test_rebuild_exhausted_values_pass_through() {
        let original = ["0|50\n", "1000|100\n", "2000|200\n"];
        assert_eq!(
            rebuild(&original, &[60.0]),
            vec!["0|60.0\n", "1000|100\n", "2000|200\n"]
        );
    }

    #[test]
    fn test_rebuild_keeps_malformed_lines() {
        let original = ["; comment\n", "0|50\n", "abc\n", "1|2|3\n", "1000|100\n"];
        assert_eq!(
            rebuild(&original, &[1.0, 2.0]),
            vec!["; comment\n", "0|1.0\n", "abc\n", "1|2|3\n", "1000|2.0\n"]
        );
    }

    #[test]
    fn test_serialize_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("power.lut");
        std::fs::write(&path, "0|50\n").unwrap();

        serialize(&["0|100.0\n", "\n"], &path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "0|100.0\n\n");
        // Only the target remains, no stray temp files
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_serialize_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("power.lut");
        std::fs::write(&path, "0|50\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o640)).unwrap();

        serialize(&["0|100.0\n"], &path).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[test]
    fn test_serialize_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope").join("power.lut");
        let err = serialize(&["0|1\n"], &path).unwrap_err();
        assert!(err.is_not_found());
    }
}
