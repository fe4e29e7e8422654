// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Nearest-hit ray queries against a surface snapshot.
//!
//! [`RayCaster`] is the single query the wall analysis depends on. The
//! [`SurfaceSet`] implementation tests every world-space triangle with the
//! Möller–Trumbore algorithm after culling whole surfaces by their bounds.
//! Callers with their own acceleration structure (a game engine, a BVH)
//! implement the trait instead.

use crate::surface::{SurfaceSet, Triangle};
use nalgebra::{Point3, Vector3};

/// Determinant threshold below which a ray counts as parallel to a triangle
const PARALLEL_EPSILON: f64 = 1e-12;

/// Minimum accepted hit distance (rejects self-intersection at the origin)
const MIN_HIT_T: f64 = 1e-9;

/// Barycentric slack so rays through a shared edge hit at least one of the
/// two triangles
const EDGE_EPSILON: f64 = 1e-9;

/// A half-line with a unit direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3<f64>,
    /// Unit length
    pub direction: Vector3<f64>,
}

impl Ray {
    /// Create a ray, normalizing `direction`.
    ///
    /// Returns `None` for a zero-length or non-finite direction.
    pub fn new(origin: Point3<f64>, direction: Vector3<f64>) -> Option<Self> {
        let len = direction.norm();
        if !len.is_finite() || len < 1e-15 {
            return None;
        }
        Some(Self {
            origin,
            direction: direction / len,
        })
    }

    /// Point at distance `t` along the ray
    #[inline]
    pub fn at(&self, t: f64) -> Point3<f64> {
        self.origin + self.direction * t
    }
}

/// Nearest intersection of a ray with a surface set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// World-space hit point
    pub point: Point3<f64>,
    /// World-space unit normal, facing back toward the ray origin
    pub normal: Vector3<f64>,
    /// Distance from the ray origin to `point`
    pub distance: f64,
    /// Index of the hit surface within its set
    pub surface: usize,
}

/// Nearest-intersection query used by the wall sampler.
///
/// Implementations must be side-effect free: the same ray against the same
/// scene always yields the same answer, and rays may be cast from several
/// threads at once.
pub trait RayCaster: Send + Sync {
    /// Return the closest hit within `max_distance`, or `None`.
    fn cast(&self, ray: &Ray, max_distance: f64) -> Option<RayHit>;
}

impl RayCaster for SurfaceSet {
    fn cast(&self, ray: &Ray, max_distance: f64) -> Option<RayHit> {
        let mut nearest: Option<(f64, usize, &Triangle)> = None;

        for (surface_index, geometry) in self.geometries().iter().enumerate() {
            let limit = nearest.map_or(max_distance, |(t, _, _)| t);
            if !geometry.bounds.intersects_ray(ray, limit) {
                continue;
            }

            for triangle in &geometry.triangles {
                let limit = nearest.map_or(max_distance, |(t, _, _)| t);
                if let Some(t) = intersect_triangle(ray, triangle, limit) {
                    nearest = Some((t, surface_index, triangle));
                }
            }
        }

        nearest.map(|(distance, surface, triangle)| {
            // Report the face as seen from the ray origin
            let normal = if triangle.normal.dot(&ray.direction) > 0.0 {
                -triangle.normal
            } else {
                triangle.normal
            };
            RayHit {
                point: ray.at(distance),
                normal,
                distance,
                surface,
            }
        })
    }
}

/// Möller–Trumbore ray/triangle test.
///
/// Returns the hit distance when it lies in `(0, max_distance]`. Rays lying
/// in the triangle's plane never hit; rays through an edge do.
pub fn intersect_triangle(ray: &Ray, triangle: &Triangle, max_distance: f64) -> Option<f64> {
    let edge1 = triangle.v1 - triangle.v0;
    let edge2 = triangle.v2 - triangle.v0;

    let p = ray.direction.cross(&edge2);
    let det = edge1.dot(&p);
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = ray.origin - triangle.v0;
    let u = s.dot(&p) * inv_det;
    if u < -EDGE_EPSILON || u > 1.0 + EDGE_EPSILON {
        return None;
    }

    let q = s.cross(&edge1);
    let v = ray.direction.dot(&q) * inv_det;
    if v < -EDGE_EPSILON || u + v > 1.0 + EDGE_EPSILON {
        return None;
    }

    let t = edge2.dot(&q) * inv_det;
    (t > MIN_HIT_T && t <= max_distance).then_some(t)
}
