//! Rendering-side frame logic
//!
//! No GPU code lives here. This module turns the scene, camera and light
//! into the matrices a renderer needs each frame and defines the small
//! [`DrawBackend`] seam a real renderer plugs into.

pub mod backend;
pub mod camera;
pub mod frame;
pub mod frame_setup;

pub use backend::{DrawBackend, DrawCommand, RecordingBackend, RenderError};
pub use camera::Camera;
pub use frame::{DebugView, FrameContext, FrameInfo, LightAnimation};
pub use frame_setup::{ClipRange, ShadowFrame, ShadowPlanner};
