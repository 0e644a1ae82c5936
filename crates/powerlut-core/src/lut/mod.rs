//! Curve LUT files
//!
//! A LUT is a plain-text lookup table, one `key|value` record per line:
//!
//! ```text
//! 0|150
//! 1000|210.5
//!
//! 7500|180
//! ```
//!
//! The key is usually an RPM value and may be negative for special markers
//! below idle. Blank lines are allowed. Anything that does not fit the
//! two-column shape is carried through a rewrite untouched.

mod parser;
mod writer;

pub use parser::{extract_values, is_plain_decimal, max_value, parse_number, validate};
pub use writer::{format_value, rebuild, serialize};

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::text::{read_lines, split_terminator};

/// A single line of a curve file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CurveLine {
    /// A scalable `key|value` row with a non-negative key
    DataPoint {
        /// Key column exactly as written (e.g. `"1000"`, `"2500 "`)
        raw_key: String,
        /// Value column as a number
        value: f64,
        /// Original line including its terminator
        text: String,
    },
    /// Blank, malformed, comment or negative-key line, kept verbatim
    Passthrough {
        /// Original line including its terminator
        text: String,
    },
}

impl CurveLine {
    /// Classify one raw line
    ///
    /// A row is scalable only when it has exactly two `|` columns, both parse
    /// as numbers, and the key is not negative. Everything else passes through.
    pub fn classify(line: &str) -> Self {
        let (body, _) = split_terminator(line);
        let trimmed = body.trim();

        let parts: Vec<&str> = trimmed.split('|').collect();
        if trimmed.is_empty() || parts.len() != 2 {
            return CurveLine::Passthrough {
                text: line.to_string(),
            };
        }

        match (parse_number(parts[0]), parse_number(parts[1])) {
            (Ok(key), Ok(value)) if key >= 0.0 => CurveLine::DataPoint {
                raw_key: parts[0].to_string(),
                value,
                text: line.to_string(),
            },
            _ => CurveLine::Passthrough {
                text: line.to_string(),
            },
        }
    }

    /// Original line text, terminator included
    pub fn text(&self) -> &str {
        match self {
            CurveLine::DataPoint { text, .. } | CurveLine::Passthrough { text } => text,
        }
    }

    /// Value column of a data point
    pub fn value(&self) -> Option<f64> {
        match self {
            CurveLine::DataPoint { value, .. } => Some(*value),
            CurveLine::Passthrough { .. } => None,
        }
    }
}

/// An ordered set of curve lines, built fresh from disk for each edit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurveFile {
    lines: Vec<CurveLine>,
}

impl CurveFile {
    /// Build from raw lines (terminators kept)
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        Self {
            lines: lines.iter().map(|l| CurveLine::classify(l.as_ref())).collect(),
        }
    }

    /// Load and classify a curve file from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_lines(&read_lines(path)?))
    }

    /// Values of the scalable rows, in file order
    pub fn values(&self) -> Vec<f64> {
        self.lines.iter().filter_map(CurveLine::value).collect()
    }

    /// Number of scalable rows
    pub fn data_point_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| matches!(l, CurveLine::DataPoint { .. }))
            .count()
    }

    /// Largest value among the scalable rows, or 0.0 when there are none
    pub fn max_value(&self) -> f64 {
        self.values().into_iter().fold(0.0, f64::max)
    }

    /// Original text, byte for byte
    pub fn to_lines(&self) -> Vec<String> {
        self.lines.iter().map(|l| l.text().to_string()).collect()
    }

    /// Rebuild the text with `scaled` substituted into the scalable rows
    ///
    /// Values are consumed in order, one per data point. Once `scaled` runs
    /// out the remaining rows are emitted unchanged. A row whose new value is
    /// identical to its old one keeps its original text.
    pub fn rebuild(&self, scaled: &[f64]) -> Vec<String> {
        let mut next = scaled.iter();

        self.lines
            .iter()
            .map(|line| match line {
                CurveLine::DataPoint {
                    raw_key,
                    value,
                    text,
                    ..
                } => match next.next() {
                    Some(new) if new != value => {
                        let (_, eol) = split_terminator(text);
                        format!("{}|{}{}", raw_key, format_value(*new), eol)
                    }
                    _ => text.clone(),
                },
                CurveLine::Passthrough { text } => text.clone(),
            })
            .collect()
    }
}
