// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The full detection pipeline: sample, cluster, rank, place.

use crate::clusterer::cluster;
use crate::config::{DetectionConfig, DetectionMode, PlacementConfig};
use crate::face_analysis;
use crate::placer::place;
use crate::ranker::rank;
use crate::sampler::sample;
use crate::types::{Placement, WallCandidate};
use artwall_geometry::{RayCaster, SurfaceSet};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Result of one detection pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Sampling center
    pub center: Point3<f64>,
    /// Accepted wall hits (wall segments in face mode)
    pub hit_count: usize,
    /// Ranked wall candidates
    pub walls: Vec<WallCandidate>,
}

impl Detection {
    fn empty(center: Point3<f64>) -> Self {
        Self {
            center,
            hit_count: 0,
            walls: Vec::new(),
        }
    }
}

/// Detected walls plus the artwork placements chosen on them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryLayout {
    pub center: Point3<f64>,
    pub walls: Vec<WallCandidate>,
    pub placements: Vec<Placement>,
}

impl Default for Detection {
    fn default() -> Self {
        Self::empty(Point3::origin())
    }
}

/// Wall detector bound to one configuration
#[derive(Debug, Clone, Default)]
pub struct WallDetector {
    config: DetectionConfig,
}

impl WallDetector {
    /// Create a detector. Out-of-range settings are clamped.
    pub fn new(config: DetectionConfig) -> Self {
        Self {
            config: config.sanitized(),
        }
    }

    /// Effective (clamped) configuration
    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Detect walls from the center of the scene's bounding box
    pub fn detect(&self, surfaces: &SurfaceSet) -> Detection {
        let bounds = surfaces.bounds();
        if surfaces.is_empty() || bounds.is_empty() {
            tracing::warn!("Scene has no surfaces, no walls detected");
            return Detection::default();
        }
        let center = bounds.center();

        match self.config.mode {
            DetectionMode::Raycast => self.detect_from(&center, surfaces),
            DetectionMode::Faces => self.detect_faces(&center, surfaces),
        }
    }

    /// Raycast detection from an explicit sampling point
    pub fn detect_from<C: RayCaster + ?Sized>(&self, center: &Point3<f64>, caster: &C) -> Detection {
        let config = &self.config;

        // Step 1: Sample
        let hits = sample(center, caster, config);
        let hit_count = hits.len();
        if hits.is_empty() {
            tracing::warn!(
                x = center.x,
                y = center.y,
                z = center.z,
                "No wall hits from sampling center"
            );
            return Detection::empty(*center);
        }

        // Step 2: Cluster
        let candidates = cluster(hits, config);

        // Step 3: Rank
        let walls = rank(candidates);
        if walls.is_empty() {
            tracing::warn!(hits = hit_count, "No walls detected");
        } else if config.debug {
            tracing::debug!(hits = hit_count, walls = walls.len(), "Wall detection complete");
        }

        Detection {
            center: *center,
            hit_count,
            walls,
        }
    }

    fn detect_faces(&self, center: &Point3<f64>, surfaces: &SurfaceSet) -> Detection {
        let segments = face_analysis::extract_segments(surfaces, &self.config);
        let walls = rank(face_analysis::merge_segments(&segments, center, &self.config));
        if walls.is_empty() {
            tracing::warn!(segments = segments.len(), "No walls detected");
        }

        Detection {
            center: *center,
            hit_count: segments.len(),
            walls,
        }
    }
}

/// Detect walls and place up to `artwork_count` artworks on them
pub fn detect_and_place(
    surfaces: &SurfaceSet,
    artwork_count: usize,
    detection: &DetectionConfig,
    placement: &PlacementConfig,
) -> GalleryLayout {
    let Detection { center, walls, .. } = WallDetector::new(detection.clone()).detect(surfaces);
    let placements = place(&walls, artwork_count, placement);

    tracing::info!(
        walls = walls.len(),
        requested = artwork_count,
        placed = placements.len(),
        "Gallery layout computed"
    );

    GalleryLayout {
        center,
        walls,
        placements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artwall_geometry::{builders, Ray, RayHit};
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    /// Every ray hits a cylinder wall of radius 6 centered on the origin
    struct Cylinder;

    impl RayCaster for Cylinder {
        fn cast(&self, ray: &Ray, max_distance: f64) -> Option<RayHit> {
            let radius = 6.0;
            let horizontal = Vector3::new(ray.direction.x, 0.0, ray.direction.z).norm();
            let distance = radius / horizontal;
            if distance > max_distance {
                return None;
            }
            let point = ray.at(distance);
            Some(RayHit {
                point,
                normal: -Vector3::new(point.x, 0.0, point.z).normalize(),
                distance,
                surface: 0,
            })
        }
    }

    #[test]
    fn test_empty_scene() {
        let detection = WallDetector::default().detect(&SurfaceSet::new(Vec::new()));
        assert!(detection.walls.is_empty());
        assert_eq!(detection.hit_count, 0);
    }

    #[test]
    fn test_detect_from_custom_caster() {
        let detector = WallDetector::new(DetectionConfig::default());
        let detection = detector.detect_from(&Point3::new(0.0, 2.0, 0.0), &Cylinder);
        assert_eq!(detection.hit_count, 80);
        // Two neighbour pairs of the 16-way grid merge, the rest stay single
        assert_eq!(detection.walls.len(), 14);
        let counts: Vec<u32> = detection.walls.iter().map(|w| w.sample_count).collect();
        assert_eq!(&counts[..2], &[10, 10]);
        assert!(counts[2..].iter().all(|&c| c == 5));
        for wall in &detection.walls {
            assert_relative_eq!(wall.distance, 6.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_caster_out_of_range() {
        let detector = WallDetector::new(DetectionConfig {
            raycast_distance: 5.0,
            ..Default::default()
        });
        let detection = detector.detect_from(&Point3::origin(), &Cylinder);
        assert_eq!(detection.hit_count, 0);
        assert!(detection.walls.is_empty());
    }

    #[test]
    fn test_detector_sanitizes_config() {
        let detector = WallDetector::new(DetectionConfig {
            ray_directions: 0,
            ..Default::default()
        });
        assert_eq!(detector.config().ray_directions, 1);
    }

    #[test]
    fn test_face_mode() {
        let surfaces = SurfaceSet::new(builders::room(10.0, 8.0, 3.0));
        let detector = WallDetector::new(DetectionConfig {
            mode: DetectionMode::Faces,
            ..Default::default()
        });
        let detection = detector.detect(&surfaces);
        assert_eq!(detection.hit_count, 8);
        assert_eq!(detection.walls.len(), 4);
        // Equal sample counts, nearest (the long z = ±4 walls) first
        assert_relative_eq!(detection.walls[0].distance, 4.0, epsilon = 1e-9);
        assert_relative_eq!(detection.walls[3].distance, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_layout_serializes() {
        let surfaces = SurfaceSet::new(builders::room(10.0, 8.0, 4.0));
        let layout = detect_and_place(&surfaces, 3, &DetectionConfig::default(), &PlacementConfig::default());
        assert_eq!(layout.placements.len(), 3);

        let json = serde_json::to_string(&layout).unwrap();
        let back: GalleryLayout = serde_json::from_str(&json).unwrap();
        assert_eq!(back.placements.len(), 3);
    }
}
