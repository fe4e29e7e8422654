// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Simple primitive builders: quads and rectangular rooms.

use crate::mesh::Mesh;
use crate::surface::{Surface, Triangle};
use nalgebra::Point3;

/// Append a flat-shaded triangle
fn add_triangle_to_mesh(mesh: &mut Mesh, v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) {
    let Some(triangle) = Triangle::new(v0, v1, v2) else {
        return;
    };

    let base_idx = mesh.vertex_count() as u32;
    mesh.add_vertex(triangle.v0, triangle.normal);
    mesh.add_vertex(triangle.v1, triangle.normal);
    mesh.add_vertex(triangle.v2, triangle.normal);
    mesh.add_triangle(base_idx, base_idx + 1, base_idx + 2);
}

/// Planar quad from four corners in winding order (two triangles)
pub fn quad(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>, d: Point3<f64>) -> Mesh {
    let mut mesh = Mesh::with_capacity(6, 6);
    add_triangle_to_mesh(&mut mesh, a, b, c);
    add_triangle_to_mesh(&mut mesh, a, c, d);
    mesh
}

/// Rectangular room centered on the origin in x/z with its floor at y = 0.
///
/// `width` runs along x, `depth` along z. Returns six surfaces, each wound
/// so its normal points into the room: `wall-east` (+x), `wall-west` (-x),
/// `wall-north` (+z), `wall-south` (-z), `floor` and `ceiling`.
pub fn room(width: f64, depth: f64, height: f64) -> Vec<Surface> {
    let hx = width / 2.0;
    let hz = depth / 2.0;
    let p = |x: f64, y: f64, z: f64| Point3::new(x, y, z);

    vec![
        Surface::new(quad(p(hx, 0.0, -hz), p(hx, 0.0, hz), p(hx, height, hz), p(hx, height, -hz)))
            .with_name("wall-east"),
        Surface::new(quad(p(-hx, 0.0, -hz), p(-hx, height, -hz), p(-hx, height, hz), p(-hx, 0.0, hz)))
            .with_name("wall-west"),
        Surface::new(quad(p(-hx, 0.0, hz), p(-hx, height, hz), p(hx, height, hz), p(hx, 0.0, hz)))
            .with_name("wall-north"),
        Surface::new(quad(p(-hx, 0.0, -hz), p(hx, 0.0, -hz), p(hx, height, -hz), p(-hx, height, -hz)))
            .with_name("wall-south"),
        Surface::new(quad(p(-hx, 0.0, -hz), p(-hx, 0.0, hz), p(hx, 0.0, hz), p(hx, 0.0, -hz)))
            .with_name("floor"),
        Surface::new(quad(p(-hx, height, -hz), p(hx, height, -hz), p(hx, height, hz), p(-hx, height, hz)))
            .with_name("ceiling"),
    ]
}
