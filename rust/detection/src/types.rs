// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pipeline records: raw hits, wall candidates and placements

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// One accepted ray/wall intersection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallHit {
    pub point: Point3<f64>,
    /// Unit world-space normal
    pub normal: Vector3<f64>,
    pub distance: f64,
    /// Azimuth of the producing ray (radians, `[0, 2π)`)
    pub angle: f64,
    /// World y of the ray origin
    pub height: f64,
}

/// A near-vertical surface inferred from a cluster of hits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallCandidate {
    /// Centroid of the contributing hits
    pub position: Point3<f64>,
    /// Averaged unit normal, facing the sampling center
    pub normal: Vector3<f64>,
    pub width: f64,
    pub height: f64,
    pub area: f64,
    /// Number of contributing hits (triangles in face mode)
    pub sample_count: u32,
    /// Azimuth of the cluster anchor (radians)
    pub angle: f64,
    /// Mean distance from the sampling center
    pub distance: f64,
}

/// Where one artwork goes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub position: Point3<f64>,
    /// Yaw in radians; the artwork faces along the wall normal
    pub rotation_y: f64,
    pub wall_normal: [f64; 3],
}

impl Placement {
    /// Euler rotation `[x, y, z]` as renderers expect it
    pub fn rotation(&self) -> [f64; 3] {
        [0.0, self.rotation_y, 0.0]
    }

    /// Horizontal (x/z) distance to another placement
    pub fn horizontal_distance(&self, other: &Placement) -> f64 {
        horizontal_distance(&self.position, &other.position)
    }
}

/// Distance between two points ignoring y
#[inline]
pub fn horizontal_distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}
