// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Detection and placement parameters.
//!
//! Both configs deserialize from partial JSON (missing fields take their
//! defaults). Out-of-range values are clamped by `sanitized()` rather than
//! rejected, with a warning per adjusted field.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::path::Path;
use std::str::FromStr;

/// Smallest spacing the placer will honor
pub const MIN_SPACING: f64 = 0.01;

/// Which detector drives [`crate::WallDetector`]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMode {
    /// Omnidirectional raycasting from the scene center
    #[default]
    Raycast,
    /// Direct inspection of near-vertical triangles
    Faces,
}

impl FromStr for DetectionMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "raycast" | "rays" => Ok(Self::Raycast),
            "faces" | "face" => Ok(Self::Faces),
            other => Err(Error::Config(format!("unknown detection mode '{}'", other))),
        }
    }
}

/// Wall detection configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DetectionConfig {
    /// Number of azimuth samples, evenly spaced over a full turn
    pub ray_directions: u32,
    /// Number of sampling heights
    pub height_samples: u32,
    /// Vertical distance between sampling heights
    pub height_step: f64,
    /// First sampling height, measured down from the center
    pub height_start_offset: f64,
    /// Maximum `|normal.y|` for a surface to count as a wall
    pub vertical_threshold: f64,
    /// Maximum ray length
    pub raycast_distance: f64,
    /// Hits nearer than this are origin artifacts and dropped
    pub min_hit_distance: f64,
    /// Hits whose azimuths are closer than this share a wall (radians)
    pub angle_tolerance: f64,
    /// Minimum hits for a cluster to become a wall
    pub min_samples: u32,
    /// Minimum plausible wall height
    pub min_height: f64,
    /// Maximum plausible wall height
    pub max_height: f64,
    /// Minimum wall area (face analysis only)
    pub min_wall_area: f64,
    /// Sort hits by angle then height before clustering
    pub canonicalize_hits: bool,
    /// Cast rays on the rayon thread pool
    pub parallel: bool,
    pub mode: DetectionMode,
    /// Emit stage diagnostics at debug level
    pub debug: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            ray_directions: 16,
            height_samples: 5,
            height_step: 0.8,
            height_start_offset: 1.5,
            vertical_threshold: 0.3,
            raycast_distance: 50.0,
            min_hit_distance: 1.0,
            angle_tolerance: PI / 8.0, // 22.5 degrees
            min_samples: 4,
            min_height: 1.0,
            max_height: 15.0,
            min_wall_area: 5.0,
            canonicalize_hits: false,
            parallel: true,
            mode: DetectionMode::Raycast,
            debug: false,
        }
    }
}

impl DetectionConfig {
    /// Parse a (possibly partial) config from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a config file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Copy with every field clamped into its usable range
    pub fn sanitized(&self) -> Self {
        let mut config = self.clone();
        let defaults = Self::default();

        if config.ray_directions == 0 {
            tracing::warn!(field = "ray_directions", "Clamped to 1");
            config.ray_directions = 1;
        }
        if config.height_samples == 0 {
            tracing::warn!(field = "height_samples", "Clamped to 1");
            config.height_samples = 1;
        }
        if config.min_samples == 0 {
            tracing::warn!(field = "min_samples", "Clamped to 1");
            config.min_samples = 1;
        }
        if !(config.vertical_threshold > 0.0 && config.vertical_threshold <= 1.0) {
            tracing::warn!(
                field = "vertical_threshold",
                value = config.vertical_threshold,
                "Out of (0, 1], using default"
            );
            config.vertical_threshold = defaults.vertical_threshold;
        }
        if !config.angle_tolerance.is_finite() || config.angle_tolerance <= 0.0 {
            tracing::warn!(field = "angle_tolerance", value = config.angle_tolerance, "Using default");
            config.angle_tolerance = defaults.angle_tolerance;
        }
        if !config.height_step.is_finite() {
            config.height_step = defaults.height_step;
        }
        if !config.height_start_offset.is_finite() {
            config.height_start_offset = defaults.height_start_offset;
        }
        if !config.min_hit_distance.is_finite() || config.min_hit_distance < 0.0 {
            tracing::warn!(field = "min_hit_distance", value = config.min_hit_distance, "Clamped to 0");
            config.min_hit_distance = 0.0;
        }
        if !config.raycast_distance.is_finite() || config.raycast_distance <= config.min_hit_distance {
            let clamped = defaults.raycast_distance.max(config.min_hit_distance + 1.0);
            tracing::warn!(
                field = "raycast_distance",
                value = config.raycast_distance,
                clamped,
                "Must exceed min_hit_distance"
            );
            config.raycast_distance = clamped;
        }
        if !config.min_height.is_finite() || config.min_height < 0.0 {
            config.min_height = 0.0;
        }
        if !config.max_height.is_finite() || config.max_height < config.min_height {
            tracing::warn!(
                field = "max_height",
                value = config.max_height,
                min_height = config.min_height,
                "Raised to min_height"
            );
            config.max_height = config.min_height;
        }
        if !config.min_wall_area.is_finite() || config.min_wall_area < 0.0 {
            config.min_wall_area = 0.0;
        }

        config
    }
}

/// Artwork placement configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlacementConfig {
    /// Minimum horizontal distance between placements
    pub spacing: f64,
    /// World y of every placement
    pub height_from_floor: f64,
    /// Nominal frame offset from the wall surface. Informational: positions
    /// use `safe_distance`.
    pub offset_from_wall: f64,
    /// Displacement from the wall centroid along its normal
    pub safe_distance: f64,
    /// Emit per-wall accept/skip diagnostics at debug level
    pub debug: bool,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            spacing: 3.0,
            height_from_floor: 1.5,
            offset_from_wall: 0.5,
            safe_distance: 1.2,
            debug: false,
        }
    }
}

impl PlacementConfig {
    /// Parse a (possibly partial) config from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a config file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Copy with spacing and distances clamped into their usable range
    pub fn sanitized(&self) -> Self {
        let mut config = self.clone();
        let defaults = Self::default();

        if !config.spacing.is_finite() || config.spacing < MIN_SPACING {
            tracing::warn!(field = "spacing", value = config.spacing, clamped = MIN_SPACING, "Clamped");
            config.spacing = MIN_SPACING;
        }
        if !config.height_from_floor.is_finite() {
            config.height_from_floor = defaults.height_from_floor;
        }
        if !config.safe_distance.is_finite() || config.safe_distance < 0.0 {
            tracing::warn!(field = "safe_distance", value = config.safe_distance, "Clamped to 0");
            config.safe_distance = 0.0;
        }
        if !config.offset_from_wall.is_finite() || config.offset_from_wall < 0.0 {
            config.offset_from_wall = 0.0;
        }

        config
    }
}
