// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON scene descriptions.
//!
//! A scene file is a flat list of surfaces exported from a renderer:
//!
//! ```json
//! {
//!   "surfaces": [
//!     {
//!       "name": "hall",
//!       "positions": [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0],
//!       "indices": [0, 1, 2],
//!       "transform": [1,0,0,0, 0,1,0,0, 0,0,1,0, 0,0,0,1]
//!     }
//!   ]
//! }
//! ```
//!
//! `indices` may be omitted for non-indexed triangle lists. `transform` is a
//! column-major 4x4 local-to-world matrix (the layout three.js and glTF use)
//! and defaults to identity.

use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::surface::{Surface, SurfaceSet};
use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One surface entry of a scene file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceDescription {
    #[serde(default)]
    pub name: Option<String>,
    pub positions: Vec<f32>,
    #[serde(default)]
    pub indices: Option<Vec<u32>>,
    #[serde(default)]
    pub transform: Option<[f64; 16]>,
}

impl SurfaceDescription {
    /// Validate the buffers and build a [`Surface`]
    pub fn into_surface(self) -> Result<Surface> {
        let label = self.name.clone().unwrap_or_else(|| "<unnamed>".to_string());

        if self.positions.is_empty() {
            return Err(Error::EmptyMesh(label));
        }

        let mesh = Mesh::from_buffers(self.positions, self.indices);
        mesh.validate()
            .map_err(|e| Error::InvalidMesh(format!("{}: {}", label, e)))?;

        let transform = match self.transform {
            Some(elements) => {
                if elements.iter().any(|v| !v.is_finite()) {
                    return Err(Error::InvalidTransform(format!(
                        "{}: non-finite matrix element",
                        label
                    )));
                }
                Matrix4::from_column_slice(&elements)
            }
            None => Matrix4::identity(),
        };

        let mut surface = Surface::new(mesh).with_transform(transform);
        surface.name = self.name;
        Ok(surface)
    }
}

/// A scene file: every surface that rays may hit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub surfaces: Vec<SurfaceDescription>,
}

impl SceneDescription {
    /// Parse a scene from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a scene file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Build the immutable snapshot, failing on the first malformed surface
    pub fn into_surface_set(self) -> Result<SurfaceSet> {
        let surfaces = self
            .surfaces
            .into_iter()
            .map(SurfaceDescription::into_surface)
            .collect::<Result<Vec<_>>>()?;
        Ok(SurfaceSet::new(surfaces))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    const TRANSLATED_TRIANGLE: &str = r#"{
        "surfaces": [
            {
                "name": "panel",
                "positions": [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
                "transform": [1,0,0,0, 0,1,0,0, 0,0,1,0, 5,0,-2,1]
            }
        ]
    }"#;

    #[test]
    fn test_parse_column_major_transform() {
        let set = SceneDescription::from_json(TRANSLATED_TRIANGLE)
            .unwrap()
            .into_surface_set()
            .unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(set.surface(0).and_then(|s| s.name.as_deref()), Some("panel"));
        let bounds = set.bounds();
        assert_relative_eq!(bounds.min, Point3::new(5.0, 0.0, -2.0));
        assert_relative_eq!(bounds.max, Point3::new(6.0, 1.0, -2.0));
    }

    #[test]
    fn test_empty_scene_is_valid() {
        let set = SceneDescription::from_json("{}").unwrap().into_surface_set().unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_rejects_out_of_range_indices() {
        let json = r#"{"surfaces":[{"positions":[0,0,0, 1,0,0, 0,1,0],"indices":[0,1,7]}]}"#;
        let result = SceneDescription::from_json(json).unwrap().into_surface_set();
        assert!(matches!(result, Err(Error::InvalidMesh(_))));
    }

    #[test]
    fn test_rejects_empty_surface() {
        let json = r#"{"surfaces":[{"name":"ghost","positions":[]}]}"#;
        let result = SceneDescription::from_json(json).unwrap().into_surface_set();
        assert!(matches!(result, Err(Error::EmptyMesh(name)) if name == "ghost"));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(SceneDescription::from_json("{ nope"), Err(Error::Json(_))));
    }
}
