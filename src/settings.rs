//! Runtime settings
//!
//! Loaded from a JSON file by the shell. Physics constants are fixed and
//! live in [`crate::consts`]; only non-physics knobs are configurable.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_POWERUP_CHANCE;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Start with sound muted
    pub muted: bool,
    /// Probability (0.0 - 1.0) that a destroyed brick drops a power-up
    pub powerup_chance: f32,
    /// RNG seed for reproducible runs (random when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            muted: false,
            powerup_chance: DEFAULT_POWERUP_CHANCE,
            seed: None,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from disk, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {e}, using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read {}: {e}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Drop chance clamped to a valid probability
    pub fn effective_powerup_chance(&self) -> f32 {
        if self.powerup_chance.is_nan() {
            DEFAULT_POWERUP_CHANCE
        } else {
            self.powerup_chance.clamp(0.0, 1.0)
        }
    }
}
