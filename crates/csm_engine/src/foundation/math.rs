//! Math utilities and types
//!
//! Thin aliases over `nalgebra` plus the handful of matrix constructors the
//! shadow code needs. All projections follow OpenGL clip conventions
//! (right-handed view space looking down -Z, NDC depth in [-1, 1]).

pub use nalgebra::{Matrix4, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// World up axis used by every look-at in the engine
pub fn world_up() -> Vec3 {
    Vec3::y()
}

/// Math utility functions
pub mod utils {
    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees.to_radians()
    }

    /// Round `value` up to the next multiple of `1 / steps`
    pub fn ceil_to_step(value: f32, steps: f32) -> f32 {
        (value * steps).ceil() / steps
    }
}

/// Extension trait for Mat4 with the constructors used by the shadow passes
pub trait Mat4Ext {
    /// Perspective projection (`fov_y` in radians)
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Orthographic projection box
    fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4;

    /// Right-handed look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;

    /// Transform a position (w = 1) without a perspective divide
    fn transform_position(&self, point: Vec3) -> Vec3;

    /// Transform a position (w = 1) and divide by the resulting w
    fn project_position(&self, point: Vec3) -> Vec3;
}

impl Mat4Ext for Mat4 {
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::new_perspective(aspect, fov_y, near, far)
    }

    fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
        Mat4::new_orthographic(left, right, bottom, top, near, far)
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        Mat4::look_at_rh(&Point3::from(eye), &Point3::from(target), &up)
    }

    fn transform_position(&self, point: Vec3) -> Vec3 {
        let p = self * Vec4::new(point.x, point.y, point.z, 1.0);
        Vec3::new(p.x, p.y, p.z)
    }

    fn project_position(&self, point: Vec3) -> Vec3 {
        let p = self * Vec4::new(point.x, point.y, point.z, 1.0);
        Vec3::new(p.x / p.w, p.y / p.w, p.z / p.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_look_at_moves_target_onto_negative_z() {
        let view = Mat4::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::zeros(), world_up());
        let target = view.transform_position(Vec3::zeros());
        assert_relative_eq!(target, Vec3::new(0.0, 0.0, -5.0), epsilon = 1e-5);
    }

    #[test]
    fn test_perspective_maps_near_and_far_to_ndc_bounds() {
        let proj = Mat4::perspective(utils::deg_to_rad(45.0), 1.0, 0.5, 20.0);
        let near = proj.project_position(Vec3::new(0.0, 0.0, -0.5));
        let far = proj.project_position(Vec3::new(0.0, 0.0, -20.0));
        assert_relative_eq!(near.z, -1.0, epsilon = 1e-5);
        assert_relative_eq!(far.z, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_ceil_to_step() {
        assert_relative_eq!(utils::ceil_to_step(1.01, 16.0), 1.0625);
        assert_relative_eq!(utils::ceil_to_step(2.0, 16.0), 2.0);
    }
}
