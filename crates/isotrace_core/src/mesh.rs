//! Triangle mesh representation for isotrace.
//!
//! A `Mesh` is an ordered sequence of triangles with a parallel,
//! index-aligned sequence of UV triangles. Triangle `i` is textured by
//! UV triangle `i`; the two sequences always have the same length.

use isotrace_math::{DVec2, DVec3};

/// A triangle given by its three vertex positions.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Triangle {
    pub vertices: [DVec3; 3],
}

impl Triangle {
    pub fn new(v0: DVec3, v1: DVec3, v2: DVec3) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    #[inline]
    pub fn v0(&self) -> DVec3 {
        self.vertices[0]
    }

    #[inline]
    pub fn v1(&self) -> DVec3 {
        self.vertices[1]
    }

    #[inline]
    pub fn v2(&self) -> DVec3 {
        self.vertices[2]
    }
}

/// Texture coordinates for the three corners of a triangle.
///
/// Coordinates are in raster orientation: `(0, 0)` is the top-left corner
/// of the texture and `y` grows downwards.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct UvTriangle {
    pub coords: [DVec2; 3],
}

impl UvTriangle {
    pub fn new(a: DVec2, b: DVec2, c: DVec2) -> Self {
        Self { coords: [a, b, c] }
    }

    /// Map barycentric offsets `(u, v)` relative to the first corner into
    /// texture space.
    pub fn interpolate(&self, u: f64, v: f64) -> DVec2 {
        let [a, b, c] = self.coords;
        a + (b - a) * u + (c - a) * v
    }
}

/// An ordered triangle mesh with one UV triangle per triangle.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    triangles: Vec<Triangle>,
    uvs: Vec<UvTriangle>,
}

impl Mesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a face. This is the only way to grow a mesh, which keeps
    /// triangles and UVs index-aligned.
    pub fn push_face(&mut self, triangle: Triangle, uv: UvTriangle) {
        self.triangles.push(triangle);
        self.uvs.push(uv);
    }

    /// Triangles in declaration order.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// UV triangles, index-aligned with `triangles()`.
    pub fn uvs(&self) -> &[UvTriangle] {
        &self.uvs
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}
