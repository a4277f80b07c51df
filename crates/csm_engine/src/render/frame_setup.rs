//! Per-frame shadow setup
//!
//! [`ShadowPlanner::plan`] runs the CPU side of a shadow-mapped frame:
//!
//! 1. camera view matrix
//! 2. clip range, fixed or fitted to the scene bounds in view space
//! 3. inverse view-projection
//! 4. cascades, or one light projection for the single-map technique
//!
//! The resulting [`ShadowFrame`] carries everything the depth pass and the
//! lighting pass need, including the packed uniform block.

use crate::bounds::Aabb;
use crate::config::{CameraConfig, DemoConfig, ShadowConfig, ShadowTechnique};
use crate::foundation::math::{world_up, Mat4, Vec3};
use crate::scene::Scene;
use crate::shadows::{
    light_direction_from_position, CascadeDescriptor, CascadeSplitter, LightProjection, ShadowUniforms,
};
use super::Camera;

/// Smallest gap kept between fitted near and far planes
pub const MIN_CLIP_DEPTH: f32 = 1e-3;

/// Camera near and far plane distances
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRange {
    /// Near plane distance
    pub near: f32,
    /// Far plane distance
    pub far: f32,
}

impl ClipRange {
    /// Configured constant planes
    pub fn fixed(config: &CameraConfig) -> Self {
        Self { near: config.near, far: config.far }
    }

    /// Planes hugging a view-space box
    ///
    /// The near plane never drops below `min_near` and the far plane always
    /// stays beyond the near plane, even when the box is behind the camera.
    pub fn from_view_extents(extents: &Aabb, min_near: f32) -> Self {
        let near = (-extents.max.z).max(min_near);
        let far = (-extents.min.z).max(near + MIN_CLIP_DEPTH);
        Self { near, far }
    }
}

/// Shadow matrices and camera state for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowFrame {
    /// Technique the matrices were built for
    pub technique: ShadowTechnique,
    /// Camera view matrix
    pub view: Mat4,
    /// Camera projection for `clip`
    pub projection: Mat4,
    /// Inverse of `projection * view`
    pub inv_view_proj: Mat4,
    /// Camera clip range
    pub clip: ClipRange,
    /// View-space box around every scene object, if the scene has any
    pub scene_extents: Option<Aabb>,
    /// Light position this frame
    pub light_position: Vec3,
    /// Single-map light projection
    pub light: LightProjection,
    /// Cascades, nearest first; empty for the single-map technique
    pub cascades: Vec<CascadeDescriptor>,
}

impl ShadowFrame {
    /// Pack the shadow matrices for the lighting pass
    pub fn uniforms(&self) -> ShadowUniforms {
        match self.technique {
            ShadowTechnique::Single => ShadowUniforms::from_single(&self.light),
            ShadowTechnique::Cascaded => ShadowUniforms::from_cascades(&self.cascades),
        }
    }

    /// Light-space matrices the depth pass renders with, one per map
    pub fn depth_pass_matrices(&self) -> Vec<Mat4> {
        match self.technique {
            ShadowTechnique::Single => vec![self.light.light_space()],
            ShadowTechnique::Cascaded => self.cascades.iter().map(|cascade| cascade.light_space).collect(),
        }
    }
}

/// Builds a [`ShadowFrame`] from the scene, camera and light every frame
#[derive(Debug, Clone)]
pub struct ShadowPlanner {
    camera: CameraConfig,
    shadows: ShadowConfig,
    splitter: CascadeSplitter,
}

impl ShadowPlanner {
    /// Create a planner from camera and shadow settings
    pub fn new(camera: CameraConfig, shadows: ShadowConfig) -> Self {
        let splitter = CascadeSplitter::from_config(&shadows);
        Self { camera, shadows, splitter }
    }

    /// Create a planner from the demo settings
    pub fn from_config(config: &DemoConfig) -> Self {
        Self::new(config.camera.clone(), config.shadows.clone())
    }

    /// Shadow settings in use
    pub fn shadow_config(&self) -> &ShadowConfig {
        &self.shadows
    }

    /// Compute this frame's camera and shadow matrices
    ///
    /// A light at the origin has no direction; it is moved straight above
    /// the origin so both techniques still get finite matrices.
    pub fn plan(&self, scene: &Scene, camera: &Camera, light_position: Vec3) -> ShadowFrame {
        let (light_position, light_direction) = match light_direction_from_position(light_position) {
            Some(direction) => (light_position, direction),
            None => {
                log::warn!("Light sits at the origin, placing it straight above");
                (world_up(), -world_up())
            }
        };

        let view = camera.view_matrix();

        let all_bounds = scene.full_bounding_sphere();
        let scene_extents = (!all_bounds.is_empty()).then(|| all_bounds.min_max(&view));
        let clip = match scene_extents {
            Some(extents) if self.camera.fit_clip_to_scene => {
                ClipRange::from_view_extents(&extents, self.camera.near)
            }
            _ => ClipRange::fixed(&self.camera),
        };

        let projection = camera.projection_matrix(clip.near, clip.far);
        let inv_view_proj = (projection * view).try_inverse().unwrap_or_else(|| {
            log::warn!("Camera view-projection is singular, cascades will be degenerate");
            Mat4::identity()
        });

        let light = if self.shadows.fit_light_to_scene {
            LightProjection::fitted(light_position, scene.bounding_sphere())
                .unwrap_or_else(|| LightProjection::fixed(light_position))
        } else {
            LightProjection::fixed(light_position)
        };

        let cascades = match self.shadows.technique {
            ShadowTechnique::Single => Vec::new(),
            ShadowTechnique::Cascaded => {
                self.splitter.update(clip.near, clip.far, &inv_view_proj, light_direction)
            }
        };

        log::trace!(
            "Shadow frame: clip [{:.3}, {:.3}], light [{:.3}, {:.3}], {} cascades",
            clip.near,
            clip.far,
            light.near,
            light.far,
            cascades.len()
        );

        ShadowFrame {
            technique: self.shadows.technique,
            view,
            projection,
            inv_view_proj,
            clip,
            scene_extents,
            light_position,
            light,
            cascades,
        }
    }
}
