// Re-export glam for convenience
pub use glam::*;

// orb math types
mod ray;
mod vector;
pub use ray::Ray;
pub use vector::VectorExt;
