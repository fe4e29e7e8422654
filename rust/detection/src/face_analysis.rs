// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Face-based wall detection.
//!
//! Instead of casting rays, inspect every world triangle: near-vertical
//! faces become segments, segments sharing an orientation are merged when
//! they sit close together, and merged walls large enough to hang art on
//! are kept. Sees walls a single sampling point cannot, at the cost of also
//! reporting exterior faces.

use crate::config::DetectionConfig;
use crate::types::{horizontal_distance, WallCandidate};
use artwall_geometry::{Aabb, SurfaceSet};
use nalgebra::{Point3, Vector3};
use rustc_hash::FxHashMap;
use std::f64::consts::TAU;

/// Triangles smaller than this are trim, not walls
pub const MIN_FACE_AREA: f64 = 0.1;

/// Segments further apart than this (horizontally) stay separate walls
pub const MERGE_DISTANCE: f64 = 5.0;

/// A near-vertical triangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSegment {
    pub center: Point3<f64>,
    /// Geometric unit normal
    pub normal: Vector3<f64>,
    pub bounds: Aabb,
    pub width: f64,
    pub height: f64,
    pub area: f64,
    /// Index of the source surface
    pub surface: usize,
}

/// Normal quantized to one decimal place
type NormalKey = (i32, i32, i32);

fn normal_key(normal: &Vector3<f64>) -> NormalKey {
    let q = |v: f64| (v * 10.0).round() as i32;
    (q(normal.x), q(normal.y), q(normal.z))
}

/// Every near-vertical, non-trivial triangle of the scene
pub fn extract_segments(surfaces: &SurfaceSet, config: &DetectionConfig) -> Vec<WallSegment> {
    surfaces
        .triangles()
        .filter(|(_, t)| t.normal.y.abs() < config.vertical_threshold)
        .filter_map(|(surface, t)| {
            let area = t.area();
            if area <= MIN_FACE_AREA {
                return None;
            }
            let bounds = Aabb::from_points(&t.vertices());
            let size = bounds.size();
            Some(WallSegment {
                center: t.center(),
                normal: t.normal,
                bounds,
                width: size.x.max(size.z),
                height: size.y,
                area,
                surface,
            })
        })
        .collect()
}

/// Merge segments into wall candidates.
///
/// Normals are first turned to face `center`, so both windings of the same
/// wall land in one group.
pub fn merge_segments(
    segments: &[WallSegment],
    center: &Point3<f64>,
    config: &DetectionConfig,
) -> Vec<WallCandidate> {
    // Step 1: Orient and group by quantized normal, first-seen order
    let mut group_index: FxHashMap<NormalKey, usize> = FxHashMap::default();
    let mut groups: Vec<Vec<WallSegment>> = Vec::new();

    for segment in segments {
        let mut segment = *segment;
        let to_center = center - segment.center;
        if segment.normal.dot(&to_center) < 0.0 {
            segment.normal = -segment.normal;
        }

        let key = normal_key(&segment.normal);
        let index = *group_index.entry(key).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[index].push(segment);
    }

    // Step 2: Greedy proximity merge within each group
    let mut walls = Vec::new();
    for mut group in groups {
        group.sort_by(|a, b| {
            a.center
                .x
                .total_cmp(&b.center.x)
                .then(a.center.z.total_cmp(&b.center.z))
        });

        let mut used = vec![false; group.len()];
        for i in 0..group.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            let seed = group[i].center;
            let mut merged = vec![group[i]];

            for j in (i + 1)..group.len() {
                if !used[j] && horizontal_distance(&seed, &group[j].center) < MERGE_DISTANCE {
                    used[j] = true;
                    merged.push(group[j]);
                }
            }

            // Step 3: Keep walls big enough to use
            if let Some(wall) = merged_wall(&merged, center, config) {
                walls.push(wall);
            }
        }
    }

    if config.debug {
        tracing::debug!(segments = segments.len(), walls = walls.len(), "Face merge complete");
    }

    walls
}

fn merged_wall(
    merged: &[WallSegment],
    center: &Point3<f64>,
    config: &DetectionConfig,
) -> Option<WallCandidate> {
    let bounds = merged.iter().fold(Aabb::empty(), |acc, s| acc.union(&s.bounds));
    let size = bounds.size();
    let width = size.x.max(size.z);
    let height = size.y;
    let area = width * height;

    if area < config.min_wall_area || height < config.min_height || height > config.max_height {
        if config.debug {
            tracing::debug!(segments = merged.len(), area, height, "Rejected merged wall");
        }
        return None;
    }

    let normal = merged
        .iter()
        .fold(Vector3::zeros(), |acc, s| acc + s.normal)
        .try_normalize(1e-12)?;
    let position = bounds.center();
    let offset = position - center;

    Some(WallCandidate {
        position,
        normal,
        width,
        height,
        area,
        sample_count: merged.len() as u32,
        angle: offset.z.atan2(offset.x).rem_euclid(TAU),
        distance: horizontal_distance(&position, center),
    })
}

/// Segment extraction plus merging
pub fn analyze(surfaces: &SurfaceSet, center: &Point3<f64>, config: &DetectionConfig) -> Vec<WallCandidate> {
    let segments = extract_segments(surfaces, config);
    merge_segments(&segments, center, config)
}
