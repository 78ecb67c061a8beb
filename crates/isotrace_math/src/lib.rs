// Re-export glam for convenience
pub use glam::*;

// isotrace math types
mod axis;
mod ray;
pub use axis::Axis;
pub use ray::Ray;
