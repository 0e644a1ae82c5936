//! Subcommand implementations
//!
//! All curve work is delegated to `powerlut_core`; this module only resolves
//! car folders and reports outcomes.

use anyhow::{bail, Context, Result};
use powerlut_core::backup::BackupOutcome;
use powerlut_core::car::{display_names, filter_cars, list_cars, CarEntry};
use powerlut_core::engine::{modify, summarize, CurveSummary, ModifyOutcome, ValueKind};
use powerlut_core::lut::{validate, CurveFile};
use powerlut_core::text::read_lines;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::cli::ModifyArgs;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Resolve a car folder name to an editable car
pub fn resolve_car(cars_dir: &Path, folder: &str) -> Result<CarEntry> {
    let path = cars_dir.join(folder);
    if !path.is_dir() {
        bail!("Car not found: {}", path.display());
    }
    let car = CarEntry::from_path(&path);
    if car.is_packed() {
        bail!(
            "Car data for '{}' is packed (data.acd); unpack it before editing",
            car.folder
        );
    }
    Ok(car)
}

/// Summary of a car's curve, failing when the curve file is missing
fn existing_curve(car: &CarEntry) -> Result<CurveSummary> {
    let summary = summarize(car.data_dir())
        .with_context(|| format!("Failed to read engine data for '{}'", car.folder))?;
    if !summary.exists {
        bail!("Curve file not found: {}", summary.curve_path.display());
    }
    Ok(summary)
}

#[derive(Serialize)]
struct CarRow {
    folder: String,
    display_name: String,
    packed: bool,
}

pub fn run_cars(cars_dir: &Path, filter: Option<&str>, json: bool) -> Result<()> {
    let cars = list_cars(cars_dir)?;
    let cars = filter_cars(cars, filter.unwrap_or(""));

    if cars.is_empty() {
        match filter {
            Some(keyword) => bail!("No cars match '{}'", keyword.trim()),
            None => bail!("No cars found in {}", cars_dir.display()),
        }
    }

    let rows: Vec<CarRow> = cars
        .iter()
        .zip(display_names(&cars))
        .map(|(car, display_name)| CarRow {
            folder: car.folder.clone(),
            display_name,
            packed: car.is_packed(),
        })
        .collect();

    if json {
        return print_json(&rows);
    }

    let width = rows.iter().map(|r| r.folder.len()).max().unwrap_or(0);
    for row in &rows {
        let packed = if row.packed { "  [packed]" } else { "" };
        println!("{:<width$}  {}{}", row.folder, row.display_name, packed, width = width);
    }
    Ok(())
}

pub fn run_inspect(cars_dir: &Path, folder: &str, json: bool) -> Result<()> {
    let car = resolve_car(cars_dir, folder)?;
    let summary = summarize(car.data_dir())
        .with_context(|| format!("Failed to read engine data for '{}'", car.folder))?;

    if json {
        return print_json(&summary);
    }

    println!("Car:              {} ({})", car.screen_name, car.folder);
    println!("Curve file:       {}", summary.curve_path.display());
    if !summary.exists {
        println!("                  (missing)");
    }
    println!("Curve maximum:    {:.2}", summary.curve_max);
    match summary.boost {
        Some(boost) => println!("Turbo boost:      {:.2}", boost),
        None => println!("Turbo boost:      none"),
    }
    println!("Adjusted ceiling: {:.2}", summary.adjusted_ceiling);
    println!("Backup:           {}", if summary.has_backup { "present" } else { "none" });
    Ok(())
}

#[derive(Serialize)]
struct ValidationRow {
    curve_path: PathBuf,
    valid: bool,
    data_rows: usize,
    error: Option<String>,
}

pub fn run_validate(cars_dir: &Path, folder: &str, json: bool) -> Result<()> {
    let car = resolve_car(cars_dir, folder)?;
    let summary = existing_curve(&car)?;
    let lines = read_lines(&summary.curve_path)?;

    let result = validate(&lines);
    let row = ValidationRow {
        curve_path: summary.curve_path.clone(),
        valid: result.is_ok(),
        data_rows: CurveFile::from_lines(&lines).data_point_count(),
        error: result.as_ref().err().map(|e| e.to_string()),
    };

    if json {
        print_json(&row)?;
    } else if row.valid {
        println!("{}: OK ({} data rows)", row.curve_path.display(), row.data_rows);
    }

    result.with_context(|| format!("Invalid curve file {}", summary.curve_path.display()))
}

/// Human-readable report of a modify run
fn describe_outcome(outcome: &ModifyOutcome, car_name: &str) -> String {
    match outcome {
        ModifyOutcome::Unchanged { .. } => format!(
            "No changes applied (multiplier = {})",
            outcome.multiplier()
        ),
        ModifyOutcome::Rewritten {
            rescaled_rows,
            backup,
            backup_path,
            ..
        } => {
            let backup = match backup {
                BackupOutcome::Created => "Backup created at",
                BackupOutcome::AlreadyExists => "Backup already exists at",
            };
            format!(
                "{} {}\nModified {} rows of {} (multiplier {:.4})",
                backup,
                backup_path.display(),
                rescaled_rows,
                car_name,
                outcome.multiplier()
            )
        }
    }
}

pub fn run_modify(cars_dir: &Path, args: &ModifyArgs, json: bool) -> Result<()> {
    let car = resolve_car(cars_dir, &args.car)?;
    let summary = existing_curve(&car)?;
    let kind = ValueKind::from(args.kind);

    let current = match args.current.or_else(|| summary.default_current(kind)) {
        Some(current) => current,
        None => bail!("--current is required when modifying power"),
    };
    tracing::info!(
        "Modifying {} from {:.2} to {:.2}",
        summary.curve_path.display(),
        current,
        args.target
    );

    let outcome = modify(&summary.curve_path, current, args.target)
        .with_context(|| format!("Failed to modify {}", summary.curve_path.display()))?;

    if json {
        return print_json(&outcome);
    }

    println!("{}", describe_outcome(&outcome, &car.screen_name));
    Ok(())
}
