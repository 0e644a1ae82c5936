//! Command-line arguments

use clap::{Args, Parser, Subcommand, ValueEnum};
use powerlut_core::engine::ValueKind;
use powerlut_core::scaling::is_valid_scale_value;
use std::path::PathBuf;

/// Rescale the power and torque curves of simulated cars
#[derive(Parser, Debug)]
#[command(name = "powerlut", version, about, long_about = None)]
pub struct Cli {
    /// Cars directory (overrides POWERLUT_CARS_PATH and the settings file)
    #[arg(long, global = true)]
    pub path: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List cars in the cars directory
    Cars {
        /// Only show cars whose folder name contains this text
        #[arg(long)]
        filter: Option<String>,
    },
    /// Show the curve file, its maximum and the turbo-adjusted ceiling
    Inspect(CarArgs),
    /// Check the curve file format without changing anything
    Validate(CarArgs),
    /// Rescale a car's curve from a current value to a target value
    Modify(ModifyArgs),
}

#[derive(Args, Debug)]
pub struct CarArgs {
    /// Car folder name inside the cars directory
    pub car: String,
}

#[derive(Args, Debug)]
pub struct ModifyArgs {
    /// Car folder name inside the cars directory
    pub car: String,

    /// Value the curve currently produces (defaults to the adjusted ceiling for torque)
    #[arg(long, value_parser = parse_scale_value)]
    pub current: Option<f64>,

    /// Value the curve should produce
    #[arg(long, value_parser = parse_scale_value)]
    pub target: f64,

    /// Whether the values are horsepower or torque
    #[arg(long, value_enum, default_value_t = KindArg::Power)]
    pub kind: KindArg,
}

/// A finite, non-negative number
fn parse_scale_value(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    if is_valid_scale_value(value) {
        Ok(value)
    } else {
        Err(format!("'{}' must be a finite number of zero or more", s))
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    Power,
    Torque,
}

impl From<KindArg> for ValueKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Power => ValueKind::Power,
            KindArg::Torque => ValueKind::Torque,
        }
    }
}
