//! Curve Scaling
//!
//! Rescales curve values so that a known "current" figure (peak power or
//! torque) becomes a "target" figure. The ratio between the two is applied to
//! every scalable row of the curve.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Decimal places kept after scaling
pub const SCALE_PRECISION: i32 = 2;

/// A "current value -> target value" pair supplied by the user
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleRequest {
    pub current_value: f64,
    pub target_value: f64,
}

impl ScaleRequest {
    pub fn new(current_value: f64, target_value: f64) -> Self {
        Self {
            current_value,
            target_value,
        }
    }

    /// Multiplier that takes `current_value` to `target_value`
    pub fn multiplier(&self) -> Result<f64> {
        compute_multiplier(self.current_value, self.target_value)
    }
}

/// True for a value a curve may be scaled from or to: finite and not negative
pub fn is_valid_scale_value(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// `target / current`
///
/// A zero current value is `DivisionByZero`. Negative, NaN or infinite inputs,
/// and a ratio that overflows, are `InvalidScale`: they would write values
/// the curve format does not allow.
pub fn compute_multiplier(current: f64, target: f64) -> Result<f64> {
    if current == 0.0 {
        return Err(EngineError::DivisionByZero);
    }
    let invalid = EngineError::InvalidScale { current, target };
    if !is_valid_scale_value(current) || !is_valid_scale_value(target) {
        return Err(invalid);
    }

    let multiplier = target / current;
    if !is_valid_scale_value(multiplier) {
        return Err(invalid);
    }
    Ok(multiplier)
}

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Multiply each value and round to [`SCALE_PRECISION`] places
pub fn scale(values: &[f64], multiplier: f64) -> Vec<f64> {
    values
        .iter()
        .map(|v| round_to(v * multiplier, SCALE_PRECISION))
        .collect()
}
