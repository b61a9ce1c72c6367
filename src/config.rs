use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub physics: PhysicsConfig,
    pub layout: LayoutConfig,
    pub markers: MarkerConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}

/// Tuning knobs of the force simulation.
///
/// The functional forms are fixed (linear spring, inverse-square charge,
/// file-count mass); only the coefficients live here.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhysicsConfig {
    /// Per-axis bound of the acceleration accumulator.
    pub force_max: f32,
    /// Multiplier applied to acceleration during integration.
    pub speed: f32,
    /// Spring coefficient; negative so the force points toward the parent.
    pub spring: f32,
    /// Charge coefficient of the inverse-square repulsion.
    pub charge: f32,
    /// Mass contributed by every file of a folder.
    pub mass_per_file: f32,
    /// Velocity multiplier the frame driver applies once per tick.
    pub damping: f32,
    /// Distances below this are treated as coincident.
    pub min_distance: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            force_max: 4.0,
            speed: 64.0,
            spring: -0.005,
            charge: 100_000.0,
            mass_per_file: 1.0,
            damping: 0.9,
            min_distance: 0.0001,
        }
    }
}

/// Geometry of the concentric marker layers around a folder.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub base_radius: f32,
    pub radius_step: f32,
    pub min_arc: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            base_radius: -15.0,
            radius_step: 15.0,
            min_arc: 15.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkerConfig {
    /// Seconds a marker stays highlighted after it was added or modified.
    pub highlight_secs: f32,
    /// Radius of the jitter applied when a new folder spawns next to its parent.
    pub spawn_jitter: f32,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            highlight_secs: 2.5,
            spawn_jitter: 40.0,
        }
    }
}
