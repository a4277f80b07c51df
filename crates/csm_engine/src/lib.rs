//! # CSM Engine
//!
//! CPU side of cascaded shadow mapping.
//!
//! ## Features
//!
//! - **Bounding volumes**: Online bounding-sphere accumulation and AABBs
//! - **Cascade splitting**: Practical split scheme with stable per-slice light matrices
//! - **Scene container**: Id-ordered objects over a handle-based mesh pool
//! - **Frame setup**: Clip-range fitting, light projections and packed shadow uniforms
//! - **Configuration**: TOML and RON settings replacing compile-time switches
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use csm_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DemoConfig::default();
//!     let mut pool = MeshPool::new();
//!     let scene = primitives::demo_scene(&mut pool)?;
//!
//!     let camera = Camera::from_config(&config.camera, Vec3::new(0.0, 2.0, 8.0), Vec3::zeros());
//!     let planner = ShadowPlanner::from_config(&config);
//!     let frame = planner.plan(&scene, &camera, Vec3::new(-2.0, 4.0, -1.0));
//!
//!     for cascade in &frame.cascades {
//!         println!("split at {:.3}", cascade.split_depth);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod bounds;
pub mod scene;
pub mod shadows;
pub mod render;

#[cfg(test)]
mod tests;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        bounds::{Aabb, BoundingSphere},
        config::{CameraConfig, Config, ConfigError, DemoConfig, ShadowConfig, ShadowTechnique},
        foundation::{
            math::{Mat4, Vec3},
            time::{FpsCounter, FrameClock},
        },
        render::{Camera, DebugView, DrawBackend, FrameContext, RecordingBackend, RenderError, ShadowFrame, ShadowPlanner},
        scene::{primitives, MeshData, MeshHandle, MeshPool, ObjectId, Scene, SceneError, SceneObject},
        shadows::{CascadeDescriptor, CascadeSplitter, LightProjection, ShadowUniforms},
    };
}
