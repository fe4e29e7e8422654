// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Artwork metadata and the JSON layout report.

use anyhow::{Context, Result};
use artwall_detection::{GalleryLayout, Placement, WallCandidate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artwork {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Read a JSON array of artworks
pub fn load_catalog(path: &Path) -> Result<Vec<Artwork>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read catalog '{}'", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Malformed catalog '{}'", path.display()))
}

/// A placement paired with its artwork, ready for a renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedArtwork {
    pub index: usize,
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    pub wall_normal: [f64; 3],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork: Option<Artwork>,
}

impl PlacedArtwork {
    fn new(index: usize, placement: &Placement, artwork: Option<&Artwork>) -> Self {
        Self {
            index,
            position: [placement.position.x, placement.position.y, placement.position.z],
            rotation: placement.rotation(),
            wall_normal: placement.wall_normal,
            artwork: artwork.cloned(),
        }
    }
}

/// The document the CLI prints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutReport {
    pub center: [f64; 3],
    pub walls: Vec<WallCandidate>,
    pub placements: Vec<PlacedArtwork>,
}

impl LayoutReport {
    /// Pair placements with catalog entries by position
    pub fn new(layout: GalleryLayout, catalog: &[Artwork]) -> Self {
        let placements = layout
            .placements
            .iter()
            .enumerate()
            .map(|(i, p)| PlacedArtwork::new(i, p, catalog.get(i)))
            .collect();

        Self {
            center: [layout.center.x, layout.center.y, layout.center.z],
            walls: layout.walls,
            placements,
        }
    }
}
