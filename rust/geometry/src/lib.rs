// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Artwall Geometry
//!
//! Scene snapshots and nearest-hit raycasting for geometric wall analysis,
//! built on nalgebra. Scenes are flattened once into an immutable
//! [`SurfaceSet`] of world-space triangles which implements [`RayCaster`].

pub mod bounds;
pub mod builders;
pub mod error;
pub mod mesh;
pub mod raycast;
pub mod scene;
pub mod surface;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point3, Vector3};

pub use bounds::Aabb;
pub use error::{Error, Result};
pub use mesh::Mesh;
pub use raycast::{intersect_triangle, Ray, RayCaster, RayHit};
pub use scene::{SceneDescription, SurfaceDescription};
pub use surface::{Surface, SurfaceGeometry, SurfaceSet, Triangle};
