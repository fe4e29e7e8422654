// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Surfaces and the immutable surface snapshot used for analysis.
//!
//! A [`SurfaceSet`] is extracted once per detection pass. Building it moves
//! every triangle into world space and caches per-surface bounds, so the
//! analysis never touches a renderer's live scene graph.

use crate::bounds::Aabb;
use crate::mesh::Mesh;
use nalgebra::{Matrix4, Point3, Vector3};

/// Triangles with an area below this are treated as degenerate and dropped
const DEGENERATE_AREA: f64 = 1e-12;

/// World-space triangle with its precomputed unit normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub v0: Point3<f64>,
    pub v1: Point3<f64>,
    pub v2: Point3<f64>,
    /// Unit normal following the winding order (right-hand rule)
    pub normal: Vector3<f64>,
}

impl Triangle {
    /// Create a triangle. Returns `None` when it has (almost) no area.
    pub fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Option<Self> {
        let cross = (v1 - v0).cross(&(v2 - v0));
        let double_area = cross.norm();
        if !double_area.is_finite() || double_area * 0.5 < DEGENERATE_AREA {
            return None;
        }
        Some(Self {
            v0,
            v1,
            v2,
            normal: cross / double_area,
        })
    }

    /// Calculate triangle area
    pub fn area(&self) -> f64 {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        edge1.cross(&edge2).norm() * 0.5
    }

    /// Centroid of the three vertices
    pub fn center(&self) -> Point3<f64> {
        Point3::from((self.v0.coords + self.v1.coords + self.v2.coords) / 3.0)
    }

    /// Vertices as an array
    pub fn vertices(&self) -> [Point3<f64>; 3] {
        [self.v0, self.v1, self.v2]
    }
}

/// A renderable triangle mesh placed in the world
#[derive(Debug, Clone)]
pub struct Surface {
    /// Optional label, carried through for diagnostics only
    pub name: Option<String>,
    /// Geometry in local coordinates
    pub mesh: Mesh,
    /// Local-to-world transform
    pub transform: Matrix4<f64>,
}

impl Surface {
    /// Surface with an identity transform
    pub fn new(mesh: Mesh) -> Self {
        Self {
            name: None,
            mesh,
            transform: Matrix4::identity(),
        }
    }

    /// Set the local-to-world transform
    pub fn with_transform(mut self, transform: Matrix4<f64>) -> Self {
        self.transform = transform;
        self
    }

    /// Set the diagnostic label
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Non-degenerate triangles in world space.
    ///
    /// Out-of-range indices are skipped; call [`Mesh::validate`] first to
    /// reject such meshes instead.
    pub fn world_triangles(&self) -> Vec<Triangle> {
        let world: Vec<Point3<f64>> = (0..self.mesh.vertex_count())
            .filter_map(|i| self.mesh.vertex(i))
            .map(|p| self.transform.transform_point(&p))
            .collect();

        self.mesh
            .triangles()
            .filter_map(|[i0, i1, i2]| {
                let v0 = *world.get(i0 as usize)?;
                let v1 = *world.get(i1 as usize)?;
                let v2 = *world.get(i2 as usize)?;
                Triangle::new(v0, v1, v2)
            })
            .collect()
    }
}

/// World-space geometry of one surface
#[derive(Debug, Clone)]
pub struct SurfaceGeometry {
    pub bounds: Aabb,
    pub triangles: Vec<Triangle>,
}

/// Immutable snapshot of every intersectable surface in a scene
#[derive(Debug, Clone, Default)]
pub struct SurfaceSet {
    surfaces: Vec<Surface>,
    geometries: Vec<SurfaceGeometry>,
    bounds: Aabb,
}

impl SurfaceSet {
    /// Snapshot the given surfaces
    pub fn new(surfaces: Vec<Surface>) -> Self {
        let geometries: Vec<SurfaceGeometry> = surfaces
            .iter()
            .map(|surface| {
                let triangles = surface.world_triangles();
                let bounds = Aabb::from_points(triangles.iter().flat_map(|t| [&t.v0, &t.v1, &t.v2]));
                SurfaceGeometry { bounds, triangles }
            })
            .collect();

        let bounds = geometries
            .iter()
            .fold(Aabb::empty(), |acc, g| acc.union(&g.bounds));

        Self {
            surfaces,
            geometries,
            bounds,
        }
    }

    /// Number of surfaces
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// True when the set has no surfaces
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Surface by index
    pub fn surface(&self, index: usize) -> Option<&Surface> {
        self.surfaces.get(index)
    }

    /// All surfaces in insertion order
    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    /// World-space geometry, parallel to [`SurfaceSet::surfaces`]
    pub fn geometries(&self) -> &[SurfaceGeometry] {
        &self.geometries
    }

    /// Every world-space triangle with the index of its surface
    pub fn triangles(&self) -> impl Iterator<Item = (usize, &Triangle)> + '_ {
        self.geometries
            .iter()
            .enumerate()
            .flat_map(|(i, g)| g.triangles.iter().map(move |t| (i, t)))
    }

    /// Total number of usable (non-degenerate) triangles
    pub fn triangle_count(&self) -> usize {
        self.geometries.iter().map(|g| g.triangles.len()).sum()
    }

    /// World bounds of all surfaces (empty when there is no geometry)
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }
}
