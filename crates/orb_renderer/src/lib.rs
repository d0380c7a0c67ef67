//! orb renderer - CPU sphere ray tracer
//!
//! Casts one primary ray per pixel, shades the nearest sphere with hard
//! shadows from every light, and adds a single reflection highlight.

mod camera;
mod display;
mod renderer;
mod scene;
mod sphere;
mod tracer;

pub use camera::Camera;
pub use display::{DisplaySink, ImageFileSink};
pub use renderer::{
    color_to_rgb8, render, render_parallel, render_pixel, BackgroundSource, ImageBuffer,
};
pub use scene::{Scene, SceneObject};
pub use sphere::Sphere;
pub use tracer::{trace, Trace, TraceMode};

/// Re-export the shared math and config types
pub use orb_core::RenderConfig;
pub use orb_math::{Ray, Vec3, VectorExt};

/// RGB color, components nominally in [0, 1]
pub type Color = Vec3;
