//! orb core - renderer-agnostic scene description and inputs.
//!
//! This crate provides:
//!
//! - **Scene description**: `SphereDesc`, `SceneDesc`, with validation
//! - **Render configuration**: `RenderConfig` and the `SceneFile` JSON format
//! - **Background images**: `Background`, loaded through the `image` crate
//!
//! # Example
//!
//! ```ignore
//! use orb_core::{Background, SceneFile};
//!
//! let file = SceneFile::load("golf.json")?;
//! let background = Background::load("sky.png")?;
//! println!("{} spheres, {} lights", file.scene.len(), file.scene.light_count());
//! ```

pub mod background;
pub mod config;
pub mod scene;

// Re-export commonly used types
pub use background::{Background, BackgroundError, BackgroundResult};
pub use config::{ConfigError, ConfigResult, RenderConfig, SceneFile};
pub use scene::{SceneDesc, SceneError, SceneResult, SphereDesc};
