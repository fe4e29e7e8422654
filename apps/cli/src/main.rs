// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Artwall CLI - detect walls in a scene and lay out artworks on them.
//!
//! Reads a JSON scene file (or builds a rectangular demo room), runs wall
//! detection and placement, and prints the layout as JSON.
//!
//! Usage:
//!   artwall <scene.json> [options]
//!   artwall --demo-room <width> <depth> <height> [options]

use anyhow::{Context, Result};
use artwall_detection::{detect_and_place, DetectionConfig, PlacementConfig};
use artwall_geometry::{builders, SceneDescription, SurfaceSet};
use std::env;
use std::fs;
use tracing_subscriber::EnvFilter;

mod args;
mod catalog;

use args::{Input, Options};
use catalog::{load_catalog, LayoutReport};

/// Artworks placed when neither `--artworks` nor a catalog says otherwise
const DEFAULT_ARTWORK_COUNT: usize = 8;

fn main() -> Result<()> {
    let raw: Vec<String> = env::args().skip(1).collect();
    let options = match args::parse(&raw) {
        Ok(Some(options)) => options,
        Ok(None) => {
            println!("{}", args::USAGE);
            return Ok(());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("{}", args::USAGE);
            std::process::exit(2);
        }
    };

    // Logs go to stderr so stdout stays valid JSON
    let default_filter = if options.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    run(options)
}

fn run(options: Options) -> Result<()> {
    // Step 1: Scene
    let surfaces = match &options.input {
        Input::Scene(path) => SceneDescription::from_path(path)
            .and_then(SceneDescription::into_surface_set)
            .with_context(|| format!("Cannot load scene '{}'", path.display()))?,
        Input::DemoRoom { width, depth, height } => {
            SurfaceSet::new(builders::room(*width, *depth, *height))
        }
    };
    tracing::info!(
        surfaces = surfaces.len(),
        triangles = surfaces.triangle_count(),
        "Scene loaded"
    );

    // Step 2: Configuration
    let mut detection = match &options.config {
        Some(path) => DetectionConfig::from_path(path)
            .with_context(|| format!("Cannot load config '{}'", path.display()))?,
        None => DetectionConfig::default(),
    };
    let mut placement = match &options.placement {
        Some(path) => PlacementConfig::from_path(path)
            .with_context(|| format!("Cannot load placement config '{}'", path.display()))?,
        None => PlacementConfig::default(),
    };
    if let Some(mode) = options.mode {
        detection.mode = mode;
    }
    if let Some(spacing) = options.spacing {
        placement.spacing = spacing;
    }
    if let Some(height) = options.height {
        placement.height_from_floor = height;
    }
    detection.debug |= options.debug;
    placement.debug |= options.debug;

    // Step 3: Artworks
    let catalog = match &options.catalog {
        Some(path) => load_catalog(path)?,
        None => Vec::new(),
    };
    let artwork_count = options
        .artworks
        .unwrap_or(if catalog.is_empty() { DEFAULT_ARTWORK_COUNT } else { catalog.len() });

    // Step 4: Detect and place
    let layout = detect_and_place(&surfaces, artwork_count, &detection, &placement);
    if layout.placements.len() < artwork_count {
        tracing::info!(
            requested = artwork_count,
            placed = layout.placements.len(),
            "Not every artwork found a wall"
        );
    }

    // Step 5: Report
    let report = LayoutReport::new(layout, &catalog);
    let json = serde_json::to_string_pretty(&report)?;
    match &options.output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Cannot write '{}'", path.display()))?;
            tracing::info!(path = %path.display(), "Layout written");
        }
        None => println!("{}", json),
    }

    Ok(())
}
