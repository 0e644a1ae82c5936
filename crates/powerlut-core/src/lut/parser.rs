//! Strict validation and lenient extraction of curve rows
//!
//! The two entry points deliberately differ: [`validate`] is a pre-flight
//! check that stops at the first bad line, while [`extract_values`] harvests
//! whatever rows it can and skips the rest.

use std::num::ParseFloatError;

use super::CurveFile;
use crate::error::{EngineError, Result};

/// Parse one column as a real number, ignoring surrounding whitespace
pub fn parse_number(text: &str) -> std::result::Result<f64, ParseFloatError> {
    text.trim().parse::<f64>()
}

/// True for an unsigned decimal numeral with at most one decimal point
///
/// Accepts `"150"`, `"150.5"`, `"150."` and `".5"`; rejects signs, exponents,
/// `"."` and the empty string.
pub fn is_plain_decimal(text: &str) -> bool {
    let mut digits = 0;
    let mut dots = 0;

    for c in text.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return false,
        }
    }

    digits > 0 && dots <= 1
}

/// Check that every non-blank line is `key|value` with a plain decimal value
///
/// Whitespace anywhere in a line is ignored. The first offending line is
/// reported with its 1-based number and trimmed text.
pub fn validate<S: AsRef<str>>(lines: &[S]) -> Result<()> {
    for (idx, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            continue;
        }

        let parts: Vec<&str> = compact.split('|').collect();
        if parts.len() != 2 || !is_plain_decimal(parts[1]) {
            return Err(EngineError::InvalidLine {
                line: idx + 1,
                text: line.trim().to_string(),
            });
        }
    }

    Ok(())
}

/// Values of every scalable row, in file order
///
/// Malformed lines, unparsable numbers and rows with a negative key are
/// skipped silently.
pub fn extract_values<S: AsRef<str>>(lines: &[S]) -> Vec<f64> {
    CurveFile::from_lines(lines).values()
}

/// Largest value among the rows [`extract_values`] would return, or 0.0
pub fn max_value<S: AsRef<str>>(lines: &[S]) -> f64 {
    CurveFile::from_lines(lines).max_value()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(" 1000 "), Ok(1000.0));
        assert_eq!(parse_number("-10"), Ok(-10.0));
        assert_eq!(parse_number("2.5"), Ok(2.5));
        assert!(parse_number("abc").is_err());
        assert!(parse_number("").is_err());
    }

    #[test]
    fn test_is_plain_decimal() {
        assert!(is_plain_decimal("150"));
        assert!(is_plain_decimal("150.5"));
        assert!(is_plain_decimal("150."));
        assert!(is_plain_decimal(".5"));
        assert!(!is_plain_decimal(""));
        assert!(!is_plain_decimal("."));
        assert!(!is_plain_decimal("1.2.3"));
        assert!(!is_plain_decimal("-5"));
        assert!(!is_plain_decimal("1e3"));
    }

    #[test]
    fn test_validate_ok() {
        let lines = ["0|50\n", "1000 | 100.5\n", "\n", "  \n", "-500|0\n"];
        assert!(validate(&lines).is_ok());
    }

    #[test]
    fn test_validate_empty_file() {
        assert!(validate::<&str>(&[]).is_ok());
    }

    #[test]
    fn test_validate_reports_first_bad_line() {
        let lines = ["0|50\n", "abc\n", "1000|x\n"];
        match validate(&lines) {
            Err(EngineError::InvalidLine { line, text }) => {
                assert_eq!(line, 2);
                assert_eq!(text, "abc");
            }
            other => panic!("Expected InvalidLine, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_negative_value() {
        let err = validate(&["0|-5\n"]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidLine { line: 1, .. }));
    }

    #[test]
    fn test_validate_rejects_extra_column() {
        let err = validate(&["0|5|6\n"]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidLine { line: 1, .. }));
    }

    #[test]
    fn test_extract_skips_malformed() {
        let lines = ["0|50\n", "abc\n", "1000|100\n", "2000|oops\n"];
        assert_eq!(extract_values(&lines), vec![50.0, 100.0]);
    }

    #[test]
    fn test_max_value_ignores_negative_keys() {
        let lines = ["-10|999\n", "0|50\n"];
        assert_eq!(max_value(&lines), 50.0);
        assert_eq!(extract_values(&lines), vec![50.0]);
    }
}
