//! Draw backend abstraction
//!
//! The scene issues one draw per object through [`DrawBackend`]. GPU
//! backends live outside this crate; [`RecordingBackend`] keeps the calls in
//! memory for headless runs and tests.

use thiserror::Error;

use crate::foundation::math::Mat4;
use crate::scene::MeshHandle;

/// Errors reported by draw backends
#[derive(Error, Debug)]
pub enum RenderError {
    /// A rendering operation failed during execution
    #[error("Rendering failed: {0}")]
    RenderingFailed(String),
}

/// Minimal interface the scene needs to draw itself
pub trait DrawBackend {
    /// Set the model matrix used by the next draw
    fn set_model_matrix(&mut self, model: &Mat4);

    /// Draw `mesh` with the current state
    fn draw(&mut self, mesh: MeshHandle) -> Result<(), RenderError>;
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    /// Mesh that was drawn
    pub mesh: MeshHandle,
    /// Model matrix bound at draw time
    pub model: Mat4,
}

/// Backend that records draw calls instead of issuing them
#[derive(Debug, Clone)]
pub struct RecordingBackend {
    model: Mat4,
    commands: Vec<DrawCommand>,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingBackend {
    /// Create a backend with an identity model matrix
    pub fn new() -> Self {
        Self {
            model: Mat4::identity(),
            commands: Vec::new(),
        }
    }

    /// Draw calls recorded so far
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop recorded calls, e.g. at the start of a pass
    pub fn clear(&mut self) {
        self.commands.clear();
        self.model = Mat4::identity();
    }
}

impl DrawBackend for RecordingBackend {
    fn set_model_matrix(&mut self, model: &Mat4) {
        self.model = *model;
    }

    fn draw(&mut self, mesh: MeshHandle) -> Result<(), RenderError> {
        self.commands.push(DrawCommand { mesh, model: self.model });
        Ok(())
    }
}
