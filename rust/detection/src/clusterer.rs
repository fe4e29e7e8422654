// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Angular clustering of wall hits into wall candidates.
//!
//! Hits are grouped greedily in input order: each hit joins the first group
//! whose anchor azimuth is within tolerance, otherwise it anchors a new
//! group. Input order therefore matters; enable
//! [`DetectionConfig::canonicalize_hits`] for an order that does not depend
//! on how the hits were produced.

use crate::config::DetectionConfig;
use crate::types::{WallCandidate, WallHit};
use artwall_geometry::Aabb;
use nalgebra::{Point3, Vector3};
use std::f64::consts::TAU;

/// Why a group did not become a wall
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RejectReason {
    TooFewSamples(u32),
    /// Averaged normal too far from horizontal (carries `|normal.y|`)
    NotVertical(f64),
    /// Normals cancelled out
    DegenerateNormal,
    HeightOutOfRange(f64),
}

/// Circular distance between two azimuths, in `[0, π]`
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs() % TAU;
    diff.min(TAU - diff)
}

/// Whether two azimuths are strictly closer than `tolerance`.
///
/// No rounding margin: on an evenly spaced grid, neighbours whose computed
/// distance falls a hair under the tolerance do share a group.
#[inline]
pub fn within_tolerance(a: f64, b: f64, tolerance: f64) -> bool {
    angular_distance(a, b) < tolerance
}

/// Sort hits by azimuth, then height
pub fn canonical_order(hits: &mut [WallHit]) {
    hits.sort_by(|a, b| a.angle.total_cmp(&b.angle).then(a.height.total_cmp(&b.height)));
}

/// Greedy first-match grouping. Returns `(anchor angle, hits)` per group
/// in creation order.
pub fn group_by_angle(hits: Vec<WallHit>, tolerance: f64) -> Vec<(f64, Vec<WallHit>)> {
    let mut groups: Vec<(f64, Vec<WallHit>)> = Vec::new();

    for hit in hits {
        match groups
            .iter_mut()
            .find(|(anchor, _)| within_tolerance(hit.angle, *anchor, tolerance))
        {
            Some((_, members)) => members.push(hit),
            None => groups.push((hit.angle, vec![hit])),
        }
    }

    groups
}

/// Merge one group into a candidate, or say why it is not a wall
pub fn reduce_group(
    anchor: f64,
    group: &[WallHit],
    config: &DetectionConfig,
) -> std::result::Result<WallCandidate, RejectReason> {
    let sample_count = group.len() as u32;
    if group.is_empty() || sample_count < config.min_samples {
        return Err(RejectReason::TooFewSamples(sample_count));
    }

    let n = group.len() as f64;
    let (point_sum, normal_sum, distance_sum) = group.iter().fold(
        (Vector3::zeros(), Vector3::zeros(), 0.0),
        |(p, nrm, d), hit| (p + hit.point.coords, nrm + hit.normal, d + hit.distance),
    );

    let normal = normal_sum
        .try_normalize(1e-12)
        .ok_or(RejectReason::DegenerateNormal)?;
    // Averaging can tilt the normal even when every hit passed on its own
    if !(normal.y.abs() < config.vertical_threshold) {
        return Err(RejectReason::NotVertical(normal.y.abs()));
    }

    let size = Aabb::from_points(group.iter().map(|hit| &hit.point)).size();
    let width = size.x.max(size.z);
    let height = size.y;
    if height < config.min_height || height > config.max_height {
        return Err(RejectReason::HeightOutOfRange(height));
    }

    Ok(WallCandidate {
        position: Point3::from(point_sum / n),
        normal,
        width,
        height,
        area: width * height,
        sample_count,
        angle: anchor,
        distance: distance_sum / n,
    })
}

/// Group hits by azimuth and keep the groups that look like walls.
///
/// Output follows group creation order; [`crate::ranker::rank`] imposes the
/// final order.
pub fn cluster(mut hits: Vec<WallHit>, config: &DetectionConfig) -> Vec<WallCandidate> {
    if config.canonicalize_hits {
        canonical_order(&mut hits);
    }

    let groups = group_by_angle(hits, config.angle_tolerance);
    let group_count = groups.len();

    let mut candidates = Vec::with_capacity(group_count);
    for (anchor, group) in &groups {
        match reduce_group(*anchor, group, config) {
            Ok(candidate) => candidates.push(candidate),
            Err(reason) => {
                if config.debug {
                    tracing::debug!(angle = *anchor, samples = group.len(), ?reason, "Rejected wall group");
                }
            }
        }
    }

    if config.debug {
        tracing::debug!(groups = group_count, walls = candidates.len(), "Clustering complete");
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn hit(angle: f64, height: f64, point: Point3<f64>, normal: Vector3<f64>) -> WallHit {
        WallHit {
            point,
            normal,
            distance: point.coords.xz().norm(),
            angle,
            height,
        }
    }

    /// Four hits on the x = 5 wall at the given heights
    fn east_wall(angle: f64, heights: &[f64]) -> Vec<WallHit> {
        heights
            .iter()
            .map(|&h| hit(angle, h, Point3::new(5.0, h, 0.0), -Vector3::x()))
            .collect()
    }

    #[test]
    fn test_angular_distance_wraps() {
        assert_relative_eq!(angular_distance(0.1, TAU - 0.1), 0.2, epsilon = 1e-12);
        assert_relative_eq!(angular_distance(0.0, PI), PI);
        assert_relative_eq!(angular_distance(3.0, 1.0), 2.0);
    }

    #[test]
    fn test_close_azimuths_share_a_group() {
        let tolerance = PI / 8.0;
        assert!(within_tolerance(0.0, 0.2, tolerance));
        assert!(!within_tolerance(0.0, 1.0, tolerance));
        // Wraparound
        assert!(within_tolerance(0.05, TAU - 0.05, tolerance));
    }

    #[test]
    fn test_tolerance_is_strict() {
        let tolerance = PI / 8.0;
        assert!(within_tolerance(0.0, tolerance - 5e-10, tolerance));
        assert!(within_tolerance(TAU - 0.1, tolerance - 0.1 - 5e-10, tolerance));
        assert!(!within_tolerance(0.0, tolerance, tolerance));
        assert!(!within_tolerance(0.0, tolerance + 5e-10, tolerance));
    }

    #[test]
    fn test_default_grid_grouping() {
        let config = DetectionConfig::default();
        let n = config.ray_directions;
        let hits: Vec<WallHit> = (0..n)
            .map(|i| {
                let angle = i as f64 / n as f64 * TAU;
                hit(angle, 1.0, Point3::new(angle.cos(), 1.0, angle.sin()), Vector3::x())
            })
            .collect();

        // Rounding puts two neighbour pairs just under the tolerance
        let groups = group_by_angle(hits, config.angle_tolerance);
        assert_eq!(groups.len(), 14);
        let sizes: Vec<usize> = groups.iter().map(|(_, g)| g.len()).collect();
        assert_eq!(sizes, [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 1, 2, 1]);
        assert_relative_eq!(groups[10].1[1].angle, 11.0 / 16.0 * TAU);
        assert_relative_eq!(groups[12].1[1].angle, 14.0 / 16.0 * TAU);
    }

    #[test]
    fn test_first_matching_group_wins() {
        let tolerance = 0.5;
        let hits = vec![
            hit(0.0, 0.0, Point3::origin(), Vector3::x()),
            hit(0.8, 0.0, Point3::origin(), Vector3::x()),
            // Within tolerance of both anchors, closer to the second
            hit(0.45, 0.0, Point3::origin(), Vector3::x()),
        ];
        let groups = group_by_angle(hits, tolerance);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].1.len(), 2);
        assert_relative_eq!(groups[0].1[1].angle, 0.45);
        assert_eq!(groups[1].1.len(), 1);
    }

    #[test]
    fn test_reduce_group_aggregates() {
        let config = DetectionConfig::default();
        let mut hits = east_wall(0.0, &[0.5, 1.3, 2.1, 2.9]);
        hits[3].point.z = 2.0;

        let wall = reduce_group(0.0, &hits, &config).unwrap();
        assert_eq!(wall.sample_count, 4);
        assert_relative_eq!(wall.position, Point3::new(5.0, 1.7, 0.5), epsilon = 1e-12);
        assert_relative_eq!(wall.normal, -Vector3::x());
        assert_relative_eq!(wall.width, 2.0);
        assert_relative_eq!(wall.height, 2.4, epsilon = 1e-12);
        assert_relative_eq!(wall.area, 4.8, epsilon = 1e-12);
    }

    #[test]
    fn test_reject_too_few_samples() {
        let config = DetectionConfig::default();
        let hits = east_wall(0.0, &[0.5, 1.3, 2.1]);
        assert_eq!(reduce_group(0.0, &hits, &config), Err(RejectReason::TooFewSamples(3)));
    }

    #[test]
    fn test_reject_implausible_height() {
        let config = DetectionConfig::default();
        let short = east_wall(0.0, &[1.0, 1.2, 1.4, 1.6]);
        assert!(matches!(
            reduce_group(0.0, &short, &config),
            Err(RejectReason::HeightOutOfRange(_))
        ));

        let tall = east_wall(0.0, &[0.0, 6.0, 12.0, 18.0]);
        assert!(matches!(
            reduce_group(0.0, &tall, &config),
            Err(RejectReason::HeightOutOfRange(_))
        ));
    }

    #[test]
    fn test_reject_tilted_average() {
        let config = DetectionConfig::default();
        // Each normal passes on its own; the horizontal parts cancel
        let left = Vector3::new(-0.96, 0.28, 0.0);
        let right = Vector3::new(0.96, 0.28, 0.0);
        let hits: Vec<WallHit> = [0.5, 1.3, 2.1, 2.9]
            .iter()
            .enumerate()
            .map(|(i, &h)| {
                let normal = if i % 2 == 0 { left } else { right };
                hit(0.0, h, Point3::new(5.0, h, 0.0), normal)
            })
            .collect();

        assert!(hits.iter().all(|h| h.normal.y.abs() < config.vertical_threshold));
        assert!(matches!(
            reduce_group(0.0, &hits, &config),
            Err(RejectReason::NotVertical(y)) if y > 0.99
        ));
    }

    #[test]
    fn test_cluster_is_idempotent() {
        let config = DetectionConfig::default();
        let mut hits = east_wall(0.0, &[0.5, 1.3, 2.1, 2.9]);
        hits.extend(
            [0.5, 1.3, 2.1, 2.9]
                .iter()
                .map(|&h| hit(PI, h, Point3::new(-5.0, h, 0.0), Vector3::x())),
        );

        let first = cluster(hits.clone(), &config);
        let second = cluster(hits, &config);
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_canonical_order_removes_input_dependence() {
        let config = DetectionConfig {
            angle_tolerance: 0.5,
            min_samples: 1,
            min_height: 0.0,
            canonicalize_hits: true,
            ..Default::default()
        };
        let a = hit(0.0, 1.0, Point3::new(5.0, 1.0, 0.0), -Vector3::x());
        let b = hit(0.45, 2.0, Point3::new(5.0, 2.0, 2.0), -Vector3::x());
        let c = hit(0.8, 3.0, Point3::new(5.0, 3.0, 4.0), -Vector3::x());

        let forward = cluster(vec![a, b, c], &config);
        let shuffled = cluster(vec![c, b, a], &config);
        assert_eq!(forward, shuffled);
    }
}
