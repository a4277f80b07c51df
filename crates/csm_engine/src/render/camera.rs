//! # Perspective Camera
//!
//! Look-at camera producing OpenGL-convention matrices: right-handed view
//! space looking down -Z, clip depth in [-1, 1]. Near and far planes are not
//! stored on the camera; the frame setup picks them every frame, either from
//! configuration or by fitting them to the scene bounds.

use crate::config::CameraConfig;
use crate::foundation::math::{utils, world_up, Mat4, Mat4Ext, Vec3};

/// 3D perspective camera
///
/// # Coordinate System
/// Right-handed and Y-up in view space:
/// - X+ = Right
/// - Y+ = Up
/// - Z- = Forward (into the screen)
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,

    /// Point the camera is looking at in world space
    pub target: Vec3,

    /// Up vector for camera orientation (typically [0, 1, 0])
    pub up: Vec3,

    /// Vertical field of view in radians
    pub fov: f32,

    /// Aspect ratio (width / height)
    pub aspect: f32,
}

impl Camera {
    /// Create a perspective camera looking at the origin
    ///
    /// # Arguments
    /// * `position` - Camera position in world space
    /// * `fov_degrees` - Vertical field of view in degrees
    /// * `aspect` - Aspect ratio (width / height) of the viewport
    pub fn perspective(position: Vec3, fov_degrees: f32, aspect: f32) -> Self {
        Self {
            position,
            target: Vec3::zeros(),
            up: world_up(),
            fov: utils::deg_to_rad(fov_degrees),
            aspect,
        }
    }

    /// Create a camera from configuration
    pub fn from_config(config: &CameraConfig, position: Vec3, target: Vec3) -> Self {
        let mut camera = Self::perspective(position, config.fov_degrees, config.aspect());
        camera.target = target;
        camera
    }

    /// Update camera position in world space
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        log::trace!("Camera position updated to: {:?}", position);
    }

    /// Move the camera on a horizontal circle around its target
    ///
    /// `angle` is in radians, measured from +Z towards +X.
    pub fn orbit(&mut self, angle: f32, radius: f32, height: f32) {
        let offset = Vec3::new(angle.sin() * radius, height, angle.cos() * radius);
        self.set_position(self.target + offset);
    }

    /// World-to-view transform
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.target, self.up)
    }

    /// Perspective projection for the given clip range
    pub fn projection_matrix(&self, near: f32, far: f32) -> Mat4 {
        Mat4::perspective(self.fov, self.aspect, near, far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_view_matrix_looks_down_negative_z() {
        let camera = Camera::perspective(Vec3::new(0.0, 0.0, 3.0), 45.0, 16.0 / 9.0);
        let view = camera.view_matrix();

        let origin = view.transform_position(Vec3::zeros());
        assert_relative_eq!(origin, Vec3::new(0.0, 0.0, -3.0), epsilon = 1e-6);
    }

    #[test]
    fn test_projection_maps_clip_planes() {
        let camera = Camera::perspective(Vec3::new(0.0, 0.0, 3.0), 45.0, 1.0);
        let projection = camera.projection_matrix(0.5, 20.0);

        let near = projection.project_position(Vec3::new(0.0, 0.0, -0.5));
        let far = projection.project_position(Vec3::new(0.0, 0.0, -20.0));
        assert_relative_eq!(near.z, -1.0, epsilon = 1e-5);
        assert_relative_eq!(far.z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_orbit_keeps_distance() {
        let mut camera = Camera::perspective(Vec3::new(0.0, 0.0, 5.0), 45.0, 1.0);
        camera.orbit(1.2, 5.0, 2.0);
        let offset = camera.position - camera.target;
        assert_relative_eq!(offset.y, 2.0);
        assert_relative_eq!(offset.xz().norm(), 5.0, epsilon = 1e-5);
    }

    #[test]
    fn test_from_config_uses_viewport_aspect() {
        let config = CameraConfig::default();
        let camera = Camera::from_config(&config, Vec3::new(0.0, 1.0, 6.0), Vec3::zeros());
        assert_relative_eq!(camera.aspect, 1280.0 / 720.0);
        assert_relative_eq!(camera.fov, utils::deg_to_rad(45.0));
    }
}
