//! Simulation settings
//!
//! Stored as JSON. Missing fields take their defaults, so a settings file only
//! needs the values it changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{Grid, GridError, Rule};

/// Errors loading or saving a settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("settings rejected: {0}")]
    Invalid(#[from] GridError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Birth/survival rule, e.g. "B3/S23"
    pub rule: Rule,
    /// RNG seed for the initial fill and later randomizing
    pub seed: u64,
    /// Live fraction of the initial fill (0.0 - 1.0)
    pub initial_density: f64,
    /// Live fraction used by the randomize command (0.0 - 1.0)
    pub randomize_density: f64,
    /// Pacing hint for drivers; the engine itself never sleeps
    pub generations_per_second: u32,
    /// Start with the simulation paused
    pub start_paused: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            rule: Rule::conway(),
            seed: DEFAULT_SEED,
            initial_density: INITIAL_DENSITY,
            randomize_density: RANDOMIZE_DENSITY,
            generations_per_second: GENERATIONS_PER_SECOND,
            start_paused: true,
        }
    }
}

impl Settings {
    /// Check everything a simulation needs before one is built
    pub fn validate(&self) -> Result<(), GridError> {
        Grid::check_dimensions(self.width, self.height)?;
        for density in [self.initial_density, self.randomize_density] {
            if !(0.0..=1.0).contains(&density) {
                return Err(GridError::InvalidProbability(density));
            }
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate a settings file
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load a settings file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(err) => {
                log::warn!("Ignoring {}: {err}", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
