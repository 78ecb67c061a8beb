use crate::{Axis, DVec3};

/// A ray in 3D space with origin and direction.
///
/// The direction is not required to be unit length; ray parameters `t`
/// are measured in multiples of `direction`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }

    /// Origin coordinate along a single axis.
    #[inline]
    pub fn origin_on(&self, axis: Axis) -> f64 {
        self.origin[axis.index()]
    }

    /// Direction component along a single axis.
    #[inline]
    pub fn direction_on(&self, axis: Axis) -> f64 {
        self.direction[axis.index()]
    }
}
