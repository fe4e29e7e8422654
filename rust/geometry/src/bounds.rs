// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis-aligned bounding boxes

use crate::raycast::Ray;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Padding applied to slab tests so flat (zero-thickness) boxes still
/// register rays that graze them.
const SLAB_PADDING: f64 = 1e-9;

/// Axis-aligned bounding box in f64 precision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Aabb {
    /// An empty box (min > max) that any expansion overwrites
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::MAX, f64::MAX, f64::MAX),
            max: Point3::new(f64::MIN, f64::MIN, f64::MIN),
        }
    }

    /// Create a box from explicit corners
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>) -> Self {
        let mut bounds = Self::empty();
        for point in points {
            bounds.expand(point);
        }
        bounds
    }

    /// Grow the box to contain `point`
    #[inline]
    pub fn expand(&mut self, point: &Point3<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// Smallest box containing both boxes
    pub fn union(&self, other: &Aabb) -> Aabb {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }
        let mut merged = *self;
        merged.expand(&other.min);
        merged.expand(&other.max);
        merged
    }

    /// True when no point has been added
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Box center. The origin for an empty box.
    pub fn center(&self) -> Point3<f64> {
        if self.is_empty() {
            return Point3::origin();
        }
        nalgebra::center(&self.min, &self.max)
    }

    /// Extent along each axis. Zero for an empty box.
    pub fn size(&self) -> Vector3<f64> {
        if self.is_empty() {
            return Vector3::zeros();
        }
        self.max - self.min
    }

    /// Slab test: does the ray enter the box within `[0, max_distance]`?
    pub fn intersects_ray(&self, ray: &Ray, max_distance: f64) -> bool {
        if self.is_empty() {
            return false;
        }

        let mut t_enter = 0.0_f64;
        let mut t_exit = max_distance;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let direction = ray.direction[axis];
            let lo = self.min[axis] - SLAB_PADDING;
            let hi = self.max[axis] + SLAB_PADDING;

            if direction.abs() < 1e-15 {
                // Parallel to this slab: must already be inside it
                if origin < lo || origin > hi {
                    return false;
                }
                continue;
            }

            let inv = 1.0 / direction;
            let (t0, t1) = {
                let a = (lo - origin) * inv;
                let b = (hi - origin) * inv;
                if a <= b { (a, b) } else { (b, a) }
            };

            t_enter = t_enter.max(t0);
            t_exit = t_exit.min(t1);
            if t_enter > t_exit {
                return false;
            }
        }

        true
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_box() {
        let bounds = Aabb::empty();
        assert!(bounds.is_empty());
        assert_eq!(bounds.center(), Point3::origin());
        assert_eq!(bounds.size(), Vector3::zeros());
    }

    #[test]
    fn test_from_points_center_and_size() {
        let points = [
            Point3::new(-5.0, 0.0, -4.0),
            Point3::new(5.0, 3.0, 4.0),
            Point3::new(1.0, 1.0, 1.0),
        ];
        let bounds = Aabb::from_points(points.iter());
        assert_relative_eq!(bounds.center(), Point3::new(0.0, 1.5, 0.0));
        assert_relative_eq!(bounds.size(), Vector3::new(10.0, 3.0, 8.0));
    }

    #[test]
    fn test_union_ignores_empty() {
        let a = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        assert_eq!(a.union(&Aabb::empty()), a);
        assert_eq!(Aabb::empty().union(&a), a);

        let b = Aabb::new(Point3::new(-1.0, 2.0, 0.5), Point3::new(0.0, 3.0, 0.5));
        let merged = a.union(&b);
        assert_eq!(merged.min, Point3::new(-1.0, 0.0, 0.0));
        assert_eq!(merged.max, Point3::new(1.0, 3.0, 1.0));
    }

    #[test]
    fn test_ray_slab_hits_flat_box() {
        // A wall-like box with zero thickness along x
        let wall = Aabb::new(Point3::new(5.0, 0.0, -4.0), Point3::new(5.0, 3.0, 4.0));
        let toward = Ray::new(Point3::new(0.0, 1.5, 0.0), Vector3::x()).unwrap();
        let away = Ray::new(Point3::new(0.0, 1.5, 0.0), -Vector3::x()).unwrap();
        let above = Ray::new(Point3::new(0.0, 3.5, 0.0), Vector3::x()).unwrap();

        assert!(wall.intersects_ray(&toward, 50.0));
        assert!(!wall.intersects_ray(&toward, 4.0));
        assert!(!wall.intersects_ray(&away, 50.0));
        assert!(!wall.intersects_ray(&above, 50.0));
    }
}
