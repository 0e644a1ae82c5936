//! # PowerLut Core Library
//!
//! Rescales the engine curves of simulated-vehicle data bundles.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//!
//! This library provides:
//! - INI-style key lookup for `engine.ini` / `car.ini`
//! - LUT curve parsing, strict validation and lenient extraction
//! - Multiplier-based rescaling with fixed rounding
//! - Structure-preserving rewrite with a one-time `.bak` backup
//! - Car folder discovery
//!
//! ## Example
//!
//! ```rust,ignore
//! use powerlut_core::{engine, locator};
//!
//! // Find the curve for a car
//! let curve = locator::locate_curve_file("cars/ks_bmw_m3_e30/data")?;
//!
//! // Take it from 195 hp to 250 hp
//! let outcome = engine::modify(&curve, 195.0, 250.0)?;
//! println!("multiplier {:.3}", outcome.multiplier());
//! ```

pub mod backup;
pub mod car;
pub mod engine;
pub mod error;
pub mod ini;
pub mod locator;
pub mod lut;
pub mod scaling;
pub mod text;

pub use error::{EngineError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::backup::{ensure_backup, BackupOutcome};
    pub use crate::car::{list_cars, CarEntry};
    pub use crate::engine::{modify, summarize, CurveSummary, ModifyOutcome, ValueKind};
    pub use crate::error::{EngineError, Result};
    pub use crate::locator::{compute_adjusted_ceiling, locate_curve_file};
    pub use crate::lut::{CurveFile, CurveLine};
    pub use crate::scaling::ScaleRequest;
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
