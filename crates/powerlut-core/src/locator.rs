//! Curve location and torque ceiling estimation
//!
//! A car's `data/engine.ini` names its power curve in `[HEADER] POWER_CURVE`
//! and, for turbocharged engines, gives the boost ratio in
//! `[TURBO_0] MAX_BOOST`. Only the first turbo stage is consulted.

use std::path::{Path, PathBuf};

use crate::error::{EngineError, Result};
use crate::ini::find_key;
use crate::lut::{max_value, parse_number};
use crate::text::{read_lines, read_lines_lossy};

/// Engine configuration file inside a car's data directory
pub const ENGINE_CONFIG_FILE: &str = "engine.ini";

/// Curve file used when the engine configuration does not name one
pub const DEFAULT_CURVE_FILE: &str = "power.lut";

/// Curve file name from `[HEADER] POWER_CURVE`, or [`DEFAULT_CURVE_FILE`]
pub fn resolve_curve_file_name<S: AsRef<str>>(engine_config: &[S]) -> String {
    find_key(engine_config, "HEADER", "POWER_CURVE")
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_CURVE_FILE.to_string())
}

/// `[TURBO_0] MAX_BOOST`, failing if it is present but not a number
pub fn try_resolve_boost<S: AsRef<str>>(engine_config: &[S]) -> Result<Option<f64>> {
    match find_key(engine_config, "TURBO_0", "MAX_BOOST") {
        None => Ok(None),
        Some(raw) => parse_number(&raw)
            .map(Some)
            .map_err(|_| EngineError::ConfigParse {
                key: "MAX_BOOST".to_string(),
                value: raw,
            }),
    }
}

/// `[TURBO_0] MAX_BOOST`, with an unparsable value treated as absent
pub fn resolve_boost<S: AsRef<str>>(engine_config: &[S]) -> Option<f64> {
    match try_resolve_boost(engine_config) {
        Ok(boost) => boost,
        Err(e) => {
            tracing::warn!("Ignoring turbo boost: {}", e);
            None
        }
    }
}

/// Effective ceiling of a curve once boost pressure is applied
pub fn adjusted_ceiling(curve_max: f64, boost: Option<f64>) -> f64 {
    match boost {
        Some(boost) => curve_max * (1.0 + boost),
        None => curve_max,
    }
}

/// Lines of `<data_dir>/engine.ini`, or an empty list when it does not exist
pub fn load_engine_config<P: AsRef<Path>>(data_dir: P) -> Result<Vec<String>> {
    match read_lines_lossy(data_dir.as_ref().join(ENGINE_CONFIG_FILE)) {
        Ok(lines) => Ok(lines),
        Err(e) if e.is_not_found() => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}

/// Path of the curve file for a car's data directory
///
/// The file itself is not required to exist.
pub fn locate_curve_file<P: AsRef<Path>>(data_dir: P) -> Result<PathBuf> {
    let data_dir = data_dir.as_ref();
    let config = load_engine_config(data_dir)?;
    let path = data_dir.join(resolve_curve_file_name(&config));
    tracing::debug!("Curve file for {} is {}", data_dir.display(), path.display());
    Ok(path)
}

/// Maximum of the curve at `curve_path`, scaled up by the configured boost
pub fn compute_adjusted_ceiling<P: AsRef<Path>, S: AsRef<str>>(
    curve_path: P,
    engine_config: &[S],
) -> Result<f64> {
    let curve_max = max_value(&read_lines(curve_path)?);
    Ok(adjusted_ceiling(curve_max, resolve_boost(engine_config)))
}
