use nalgebra::Vector3;

use crate::{error::Result, mesh::Triangle, plane::Plane, Pos, DEFAULT_TOLERANCE};

/// Finds where the segment from `p1` to `p2` crosses a plane given by a point
/// and a normal. The normal does not need to be unit length, but a near-zero
/// normal is rejected with [`crate::SliceError::InvalidPlane`].
///
/// Returns `None` if the segment is parallel to the plane (this includes
/// segments lying inside it) or if only the infinite line through the
/// segment reaches the plane.
pub fn intersect(
    plane_origin: Pos,
    plane_normal: Vector3<f64>,
    p1: Pos,
    p2: Pos,
) -> Result<Option<Pos>> {
    let plane = Plane::new(plane_origin, plane_normal)?;
    Ok(intersect_edge(&plane, p1, p2, DEFAULT_TOLERANCE))
}

/// Intersects a segment with an already validated plane. The parameter `t` is
/// accepted on the closed range `[0, 1]`, so a vertex lying exactly on the
/// plane is returned as an intersection.
#[inline]
pub fn intersect_edge(plane: &Plane, p1: Pos, p2: Pos, tolerance: f64) -> Option<Pos> {
    let normal = plane.normal();
    let line = p2 - p1;

    let dot = normal.dot(&line);
    if dot.abs() < tolerance {
        return None;
    }

    // How far along the segment the plane is, 0 at p1 and 1 at p2.
    let t = normal.dot(&(plane.origin() - p1)) / dot;
    (0.0..=1.0).contains(&t).then(|| p1 + t * line)
}

/// Intersects a plane with a triangle. Each edge is tested in order and the
/// hits are kept in that order. Only a triangle with exactly two hits produces
/// a segment, one hit (a grazing vertex) and three hits (a vertex on the plane
/// reported by both of its edges) are both dropped.
pub fn intersect_triangle(plane: &Plane, triangle: &Triangle, tolerance: f64) -> Option<[Pos; 2]> {
    let mut out = [Pos::zeros(); 3];
    let mut n = 0;

    for (a, b) in triangle.edges() {
        if let Some(point) = intersect_edge(plane, a, b, tolerance) {
            out[n] = point;
            n += 1;
        }
    }

    (n == 2).then_some([out[0], out[1]])
}
