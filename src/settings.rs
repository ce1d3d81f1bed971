//! World configuration and presets
//!
//! Loaded from JSON files by the headless runner. Missing fields fall back to
//! the `Viewer` preset values.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Named world setups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WorldPreset {
    /// Large sparse box sized for an 800x800 window
    #[default]
    Viewer,
    /// Small box with tiny disks, much denser relative to cell count
    Compact,
}

impl WorldPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorldPreset::Viewer => "Viewer",
            WorldPreset::Compact => "Compact",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "viewer" | "default" => Some(WorldPreset::Viewer),
            "compact" | "dense" => Some(WorldPreset::Compact),
            _ => None,
        }
    }

    /// Disk radius for this preset
    pub fn radius(&self) -> f32 {
        match self {
            WorldPreset::Viewer => PARTICLE_RADIUS,
            WorldPreset::Compact => 0.5,
        }
    }

    /// Domain side length for this preset
    pub fn area_size(&self) -> f32 {
        match self {
            WorldPreset::Viewer => AREA_SIZE,
            WorldPreset::Compact => 100.0,
        }
    }

    /// Fixed timestep for this preset
    pub fn dt(&self) -> f32 {
        match self {
            WorldPreset::Viewer => SIM_DT,
            WorldPreset::Compact => 0.016,
        }
    }
}

/// Everything needed to build a [`crate::World`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Number of particles, fixed for the lifetime of the world
    pub particle_count: usize,
    /// Uniform disk radius
    pub radius: f32,
    /// Side length of the square domain, centered at the origin
    pub area_size: f32,
    /// Fixed step length (seconds)
    pub dt: f32,
    /// Speed every particle starts with
    pub initial_speed: f32,
    /// Velocity jitter after each exchange (0 disables it)
    pub perturbation: f32,
    /// RNG seed for placement and jitter
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::from_preset(WorldPreset::Viewer)
    }
}

impl WorldConfig {
    /// Create a config from a preset (seed and jitter use the defaults)
    pub fn from_preset(preset: WorldPreset) -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            radius: preset.radius(),
            area_size: preset.area_size(),
            dt: preset.dt(),
            initial_speed: INITIAL_SPEED,
            perturbation: PERTURBATION,
            seed: DEFAULT_SEED,
        }
    }

    /// Half the domain side; walls sit at `±half_extent`
    #[inline]
    pub fn half_extent(&self) -> f32 {
        self.area_size * 0.5
    }

    /// Grid cell side, one particle diameter
    #[inline]
    pub fn cell_size(&self) -> f32 {
        2.0 * self.radius
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(Error::InvalidParam("radius must be finite and > 0".into()));
        }
        if !self.area_size.is_finite() || self.area_size <= 0.0 {
            return Err(Error::InvalidParam(
                "area_size must be finite and > 0".into(),
            ));
        }
        if self.area_size < self.cell_size() {
            return Err(Error::InvalidParam(
                "area_size must be at least 2 * radius".into(),
            ));
        }
        // Cell coordinates, plus one neighbor ring, must fit in i32
        if self.area_size / self.cell_size() >= MAX_GRID_CELLS_PER_SIDE {
            return Err(Error::InvalidParam(
                "area_size / (2 * radius) is too large for the grid".into(),
            ));
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(Error::InvalidParam("dt must be finite and > 0".into()));
        }
        if !self.initial_speed.is_finite() || self.initial_speed < 0.0 {
            return Err(Error::InvalidParam(
                "initial_speed must be finite and >= 0".into(),
            ));
        }
        if !self.perturbation.is_finite() || self.perturbation < 0.0 {
            return Err(Error::InvalidParam(
                "perturbation must be finite and >= 0".into(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded world config from {}", path.display());
        Ok(config)
    }

    /// Write this config as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("World config saved to {}", path.as_ref().display());
        Ok(())
    }
}
