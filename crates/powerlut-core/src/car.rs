//! Car folder discovery
//!
//! A cars directory holds one folder per car. Each folder has either an
//! editable `data/` directory or a packed `data.acd` archive, plus
//! `data/car.ini` carrying the display name.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{EngineError, Result};
use crate::ini::find_global_key;
use crate::text::read_lines_lossy;

/// A car folder inside the cars directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarEntry {
    /// Folder name, e.g. `ks_ferrari_458`
    pub folder: String,
    /// `SCREEN_NAME` from `car.ini`, or the folder name
    pub screen_name: String,
    /// Full path of the car folder
    pub path: PathBuf,
}

impl CarEntry {
    /// Build an entry for a car folder, reading its screen name
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let folder = folder_name(&path);
        Self {
            screen_name: screen_name(&path),
            folder,
            path,
        }
    }

    /// `<car>/data`
    pub fn data_dir(&self) -> PathBuf {
        self.path.join("data")
    }

    /// True when the data only exists as a packed `data.acd`
    pub fn is_packed(&self) -> bool {
        !self.data_dir().is_dir() && self.path.join("data.acd").is_file()
    }
}

fn folder_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Display name of a car: `[INFO] SCREEN_NAME` or the folder name
pub fn screen_name<P: AsRef<Path>>(car_dir: P) -> String {
    let car_dir = car_dir.as_ref();
    read_lines_lossy(car_dir.join("data").join("car.ini"))
        .ok()
        .and_then(|lines| find_global_key(&lines, "SCREEN_NAME"))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| folder_name(car_dir))
}

/// All car folders under `cars_dir`, sorted by folder name
pub fn list_cars<P: AsRef<Path>>(cars_dir: P) -> Result<Vec<CarEntry>> {
    let cars_dir = cars_dir.as_ref();
    if !cars_dir.is_dir() {
        return Err(EngineError::NotADirectory(cars_dir.to_path_buf()));
    }

    let mut cars = Vec::new();
    for entry in fs::read_dir(cars_dir).map_err(|e| EngineError::io(cars_dir, e))? {
        let entry = entry.map_err(|e| EngineError::io(cars_dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            cars.push(CarEntry::from_path(path));
        }
    }

    cars.sort_by(|a, b| a.folder.cmp(&b.folder));
    tracing::debug!("Found {} cars in {}", cars.len(), cars_dir.display());
    Ok(cars)
}

/// Keep cars whose folder name contains `keyword`, ignoring case
pub fn filter_cars(cars: Vec<CarEntry>, keyword: &str) -> Vec<CarEntry> {
    let keyword = keyword.trim().to_lowercase();
    if keyword.is_empty() {
        return cars;
    }
    cars.into_iter()
        .filter(|car| car.folder.to_lowercase().contains(&keyword))
        .collect()
}

/// Screen names with duplicates numbered as `"<name> (#n)"`
pub fn display_names(cars: &[CarEntry]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for car in cars {
        *counts.entry(car.screen_name.as_str()).or_default() += 1;
    }

    let mut seen: HashMap<&str, usize> = HashMap::new();
    cars.iter()
        .map(|car| {
            let name = car.screen_name.as_str();
            if counts[name] > 1 {
                let n = seen.entry(name).or_default();
                *n += 1;
                format!("{} (#{})", name, n)
            } else {
                name.to_string()
            }
        })
        .collect()
}
