// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Omnidirectional wall sampling.
//!
//! Casts a grid of horizontal rays from the scene center (several heights
//! by evenly spaced azimuths) and keeps the hits that land on near-vertical
//! surfaces at a plausible distance.

use crate::config::DetectionConfig;
use crate::types::WallHit;
use artwall_geometry::{Ray, RayCaster};
use nalgebra::{Point3, Vector3};
use std::f64::consts::TAU;

/// What happened to a single ray
#[derive(Debug, Clone, Copy, PartialEq)]
enum RayOutcome {
    Hit(WallHit),
    Miss,
    TooClose,
    NotVertical,
}

/// Per-pass ray accounting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleStats {
    pub rays: usize,
    pub hits: usize,
    pub misses: usize,
    pub too_close: usize,
    pub not_vertical: usize,
}

/// Sampling heights, bottom to top
pub fn sample_heights(center: &Point3<f64>, config: &DetectionConfig) -> Vec<f64> {
    let start = center.y - config.height_start_offset;
    (0..config.height_samples)
        .map(|i| start + i as f64 * config.height_step)
        .collect()
}

/// Azimuths evenly spaced over a full turn, starting at +x
pub fn sample_angles(config: &DetectionConfig) -> Vec<f64> {
    let n = config.ray_directions.max(1);
    (0..n).map(|i| i as f64 / n as f64 * TAU).collect()
}

/// Cast the sampling grid and collect the wall hits.
///
/// Hits come back height-major, then by azimuth, regardless of whether the
/// rays were cast in parallel.
pub fn sample<C: RayCaster + ?Sized>(
    center: &Point3<f64>,
    caster: &C,
    config: &DetectionConfig,
) -> Vec<WallHit> {
    sample_with_stats(center, caster, config).0
}

/// [`sample`] plus counts of why rays were dropped
pub fn sample_with_stats<C: RayCaster + ?Sized>(
    center: &Point3<f64>,
    caster: &C,
    config: &DetectionConfig,
) -> (Vec<WallHit>, SampleStats) {
    let heights = sample_heights(center, config);
    let angles = sample_angles(config);
    let grid: Vec<(f64, f64)> = heights
        .iter()
        .flat_map(|&h| angles.iter().map(move |&a| (h, a)))
        .collect();

    let cast = |&(height, angle): &(f64, f64)| cast_one(center, height, angle, caster, config);

    // Rays are independent; rayon keeps collection order
    #[cfg(not(target_arch = "wasm32"))]
    let outcomes: Vec<RayOutcome> = if config.parallel {
        use rayon::prelude::*;
        grid.par_iter().map(cast).collect()
    } else {
        grid.iter().map(cast).collect()
    };

    #[cfg(target_arch = "wasm32")]
    let outcomes: Vec<RayOutcome> = grid.iter().map(cast).collect();

    let mut stats = SampleStats {
        rays: outcomes.len(),
        ..Default::default()
    };
    let mut hits = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        match outcome {
            RayOutcome::Hit(hit) => hits.push(hit),
            RayOutcome::Miss => stats.misses += 1,
            RayOutcome::TooClose => stats.too_close += 1,
            RayOutcome::NotVertical => stats.not_vertical += 1,
        }
    }
    stats.hits = hits.len();

    if config.debug {
        tracing::debug!(
            rays = stats.rays,
            hits = stats.hits,
            misses = stats.misses,
            too_close = stats.too_close,
            not_vertical = stats.not_vertical,
            "Wall sampling complete"
        );
    }

    (hits, stats)
}

fn cast_one<C: RayCaster + ?Sized>(
    center: &Point3<f64>,
    height: f64,
    angle: f64,
    caster: &C,
    config: &DetectionConfig,
) -> RayOutcome {
    let origin = Point3::new(center.x, height, center.z);
    let Some(ray) = Ray::new(origin, Vector3::new(angle.cos(), 0.0, angle.sin())) else {
        return RayOutcome::Miss;
    };

    let Some(hit) = caster.cast(&ray, config.raycast_distance) else {
        return RayOutcome::Miss;
    };

    if hit.distance <= config.min_hit_distance {
        return RayOutcome::TooClose;
    }
    if !(hit.normal.y.abs() < config.vertical_threshold) {
        return RayOutcome::NotVertical;
    }

    RayOutcome::Hit(WallHit {
        point: hit.point,
        normal: hit.normal,
        distance: hit.distance,
        angle,
        height,
    })
}
