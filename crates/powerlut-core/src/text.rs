//! Line-oriented text loading
//!
//! Every reader in the crate starts from a list of lines. Line terminators are
//! kept on each line so that rewritten files keep their original line endings.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{EngineError, Result};

/// Read a file into lines, keeping each line's terminator
///
/// The content must be UTF-8. Curve files are rewritten from these lines, so
/// any byte that cannot be carried through unchanged is an `InvalidData`
/// I/O error rather than a silent replacement.
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| EngineError::io(path, e))?;
    let content = String::from_utf8(bytes)
        .map_err(|e| EngineError::io(path, io::Error::new(io::ErrorKind::InvalidData, e)))?;
    Ok(split_lines(&content))
}

/// Read a file into lines, decoding non-UTF-8 bytes lossily
///
/// For read-only configuration (`car.ini`, `engine.ini`), which is frequently
/// Windows-1252 and never written back.
pub fn read_lines_lossy<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| EngineError::io(path, e))?;
    Ok(split_lines(&String::from_utf8_lossy(&bytes)))
}

/// Split text into lines, keeping `\n` (and any preceding `\r`) on each line
pub fn split_lines(content: &str) -> Vec<String> {
    content.split_inclusive('\n').map(str::to_string).collect()
}

/// Split a line into its content and its terminator (`"\r\n"`, `"\n"` or `""`)
pub fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_split_lines_keeps_terminators() {
        let lines = split_lines("a\nb\r\n\nc");
        assert_eq!(lines, vec!["a\n", "b\r\n", "\n", "c"]);
    }

    #[test]
    fn test_split_lines_empty() {
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_split_terminator() {
        assert_eq!(split_terminator("0|50\r\n"), ("0|50", "\r\n"));
        assert_eq!(split_terminator("0|50\n"), ("0|50", "\n"));
        assert_eq!(split_terminator("0|50"), ("0|50", ""));
    }

    #[test]
    fn test_read_lines_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_lines(dir.path().join("missing.lut")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_read_lines_rejects_non_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("power.lut");
        std::fs::write(&path, b"0|50\n1000\xb0|100\n").unwrap();

        match read_lines(&path).unwrap_err() {
            EngineError::Io { source, .. } => {
                assert_eq!(source.kind(), io::ErrorKind::InvalidData)
            }
            other => panic!("Expected Io, got {:?}", other),
        }
    }

    #[test]
    fn test_read_lines_lossy() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("car.ini");
        std::fs::write(&path, b"SCREEN_NAME=Caf\xe9\n").unwrap();

        let lines = read_lines_lossy(&path).unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("SCREEN_NAME=Caf"));
        assert!(lines[0].ends_with('\n'));
    }
}
