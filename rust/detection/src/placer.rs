// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Artwork placement on ranked walls.
//!
//! Each wall offers one spot: its centroid pushed `safe_distance` along the
//! wall normal, lifted to `height_from_floor`. Walls are visited in rank
//! order and a spot is skipped when it lands closer than `spacing` to one
//! already taken.

use crate::config::PlacementConfig;
use crate::types::{horizontal_distance, Placement, WallCandidate};

/// The single placement a wall offers
pub fn placement_for(wall: &WallCandidate, config: &PlacementConfig) -> Placement {
    let mut position = wall.position + wall.normal * config.safe_distance;
    position.y = config.height_from_floor;

    Placement {
        position,
        rotation_y: wall.normal.x.atan2(wall.normal.z),
        wall_normal: [wall.normal.x, wall.normal.y, wall.normal.z],
    }
}

/// Place up to `artwork_count` artworks, at most one per wall.
///
/// Running out of walls or artworks is not an error; the result is simply
/// shorter.
pub fn place(walls: &[WallCandidate], artwork_count: usize, config: &PlacementConfig) -> Vec<Placement> {
    let config = config.sanitized();
    let mut placements: Vec<Placement> = Vec::with_capacity(artwork_count.min(walls.len()));

    for (index, wall) in walls.iter().enumerate() {
        if placements.len() >= artwork_count {
            break;
        }

        let candidate = placement_for(wall, &config);
        let nearest = placements
            .iter()
            .map(|p| horizontal_distance(&p.position, &candidate.position))
            .fold(f64::INFINITY, f64::min);

        if nearest < config.spacing {
            if config.debug {
                tracing::debug!(wall = index, nearest, spacing = config.spacing, "Skipped wall, too close");
            }
            continue;
        }

        if config.debug {
            tracing::debug!(
                wall = index,
                x = candidate.position.x,
                z = candidate.position.z,
                rotation_y = candidate.rotation_y,
                "Placed artwork"
            );
        }
        placements.push(candidate);
    }

    if config.debug {
        tracing::debug!(requested = artwork_count, placed = placements.len(), "Placement complete");
    }

    placements
}
