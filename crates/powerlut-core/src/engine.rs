//! End-to-end curve modification
//!
//! [`modify`] runs the whole edit as one unit:
//! read -> validate -> multiplier -> scale -> backup -> rebuild -> write.
//! Validation and multiplier errors stop the run before anything touches the
//! disk, and a failed backup stops it before the curve is written. A run
//! either rewrites the whole file or leaves it as it was.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::backup::{backup_path, ensure_backup, BackupOutcome};
use crate::error::{EngineError, Result};
use crate::locator::{adjusted_ceiling, load_engine_config, resolve_boost, resolve_curve_file_name};
use crate::lut::{serialize, validate, CurveFile};
use crate::scaling::{is_valid_scale_value, scale, ScaleRequest};
use crate::text::read_lines;

/// Which figure the user is entering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Horsepower; the current value must come from the user
    #[default]
    Power,
    /// Torque; the current value defaults to the curve's adjusted ceiling
    Torque,
}

/// Result of a successful [`modify`] call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ModifyOutcome {
    /// Multiplier was exactly 1.0; nothing was backed up or written
    Unchanged { multiplier: f64 },
    /// The curve was rescaled and written back
    Rewritten {
        multiplier: f64,
        rescaled_rows: usize,
        backup: BackupOutcome,
        backup_path: PathBuf,
    },
}

impl ModifyOutcome {
    pub fn multiplier(&self) -> f64 {
        match self {
            ModifyOutcome::Unchanged { multiplier } | ModifyOutcome::Rewritten { multiplier, .. } => {
                *multiplier
            }
        }
    }

    pub fn is_rewritten(&self) -> bool {
        matches!(self, ModifyOutcome::Rewritten { .. })
    }
}

/// Rescale the curve at `path` so that `current` becomes `target`
pub fn modify<P: AsRef<Path>>(path: P, current: f64, target: f64) -> Result<ModifyOutcome> {
    modify_with(path, ScaleRequest::new(current, target))
}

/// [`modify`] taking a prepared [`ScaleRequest`]
pub fn modify_with<P: AsRef<Path>>(path: P, request: ScaleRequest) -> Result<ModifyOutcome> {
    let path = path.as_ref();

    let lines = read_lines(path)?;
    validate(&lines)?;
    let multiplier = request.multiplier()?;

    if multiplier == 1.0 {
        tracing::debug!("Multiplier is 1.0, leaving {} untouched", path.display());
        return Ok(ModifyOutcome::Unchanged { multiplier });
    }

    let curve = CurveFile::from_lines(&lines);
    let scaled = scale(&curve.values(), multiplier);
    if !scaled.iter().all(|v| is_valid_scale_value(*v)) {
        return Err(EngineError::InvalidScale {
            current: request.current_value,
            target: request.target_value,
        });
    }

    let backup = ensure_backup(path)?;
    let rebuilt = curve.rebuild(&scaled);
    serialize(&rebuilt, path)?;

    tracing::debug!(
        "Rescaled {} rows of {} by {:.4}",
        scaled.len(),
        path.display(),
        multiplier
    );

    Ok(ModifyOutcome::Rewritten {
        multiplier,
        rescaled_rows: scaled.len(),
        backup,
        backup_path: backup_path(path),
    })
}

/// What is known about a car's curve before editing it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveSummary {
    /// Resolved curve file path
    pub curve_path: PathBuf,
    /// Whether the curve file exists
    pub exists: bool,
    /// Largest non-negative-key value, 0.0 when the file is missing
    pub curve_max: f64,
    /// `[TURBO_0] MAX_BOOST`, if any
    pub boost: Option<f64>,
    /// `curve_max` with boost applied
    pub adjusted_ceiling: f64,
    /// Whether a `.bak` already exists
    pub has_backup: bool,
}

impl CurveSummary {
    /// Default current value for the given kind of figure
    pub fn default_current(&self, kind: ValueKind) -> Option<f64> {
        match kind {
            ValueKind::Torque => Some(self.adjusted_ceiling),
            ValueKind::Power => None,
        }
    }
}

/// Locate and summarize the curve of a car's data directory
pub fn summarize<P: AsRef<Path>>(data_dir: P) -> Result<CurveSummary> {
    let data_dir = data_dir.as_ref();
    let config = load_engine_config(data_dir)?;
    let curve_path = data_dir.join(resolve_curve_file_name(&config));
    let boost = resolve_boost(&config);

    let (exists, curve_max) = match CurveFile::load(&curve_path) {
        Ok(curve) => (true, curve.max_value()),
        Err(e) if e.is_not_found() => (false, 0.0),
        Err(e) => return Err(e),
    };

    Ok(CurveSummary {
        has_backup: backup_path(&curve_path).exists(),
        curve_path,
        exists,
        curve_max,
        boost,
        adjusted_ceiling: adjusted_ceiling(curve_max, boost),
    })
}
