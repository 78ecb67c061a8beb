//! Ray-triangle intersection.
//!
//! Uses the Möller-Trumbore algorithm. A miss is `None`, never an error.

use isotrace_core::Triangle;
use isotrace_math::Ray;

/// Tolerance for parallel rays and for hits at the ray origin.
pub const EPSILON: f64 = 1e-7;

/// Ray parameter and barycentric offsets of a ray-triangle hit.
///
/// The hit point is `v0 + u * (v1 - v0) + v * (v2 - v0)`, which equals
/// `ray.at(t)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    pub t: f64,
    pub u: f64,
    pub v: f64,
}

/// A hit on a specific mesh triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Index into the mesh's triangle sequence
    pub triangle: usize,
    pub t: f64,
    pub u: f64,
    pub v: f64,
}

impl Intersection {
    pub fn new(triangle: usize, hit: TriangleHit) -> Self {
        Self {
            triangle,
            t: hit.t,
            u: hit.u,
            v: hit.v,
        }
    }
}

/// Möller-Trumbore ray-triangle intersection.
///
/// Rejects rays parallel to the triangle's plane (`|det| < EPSILON`) and
/// hits at or behind the origin (`t <= EPSILON`).
pub fn intersect(ray: &Ray, triangle: &Triangle) -> Option<TriangleHit> {
    let [v0, v1, v2] = triangle.vertices;
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let pvec = ray.direction.cross(edge2);
    let det = edge1.dot(pvec);

    // Ray is parallel to triangle
    if det.abs() < EPSILON {
        return None;
    }

    let tvec = ray.origin - v0;
    let u = tvec.dot(pvec) / det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(edge1);
    let v = ray.direction.dot(qvec) / det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(qvec) / det;
    if t <= EPSILON {
        return None;
    }

    Some(TriangleHit { t, u, v })
}
