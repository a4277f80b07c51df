//! Single shadow map projection
//!
//! The non-cascaded technique renders one depth map looking from the light
//! position at the world origin. Its orthographic box is either a fixed
//! size or fitted to the scene's bounding sphere seen from the light.

use crate::bounds::BoundingSphere;
use crate::foundation::math::{Mat4, Mat4Ext, Vec3};
use super::stable_up;

/// Half-size of the fixed light box in X and Y
const FIXED_HALF_EXTENT: f32 = 10.0;
/// Near plane of the fixed light box
const FIXED_NEAR: f32 = 1.0;
/// Far plane of the fixed light box
const FIXED_FAR: f32 = 7.5;

/// Light view and orthographic projection for one shadow map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightProjection {
    /// Light view matrix
    pub view: Mat4,
    /// Orthographic projection
    pub projection: Mat4,
    /// Near plane distance along the light direction
    pub near: f32,
    /// Far plane distance along the light direction
    pub far: f32,
}

impl LightProjection {
    /// Fixed 20x20 box between 1 and 7.5 units in front of the light
    pub fn fixed(light_position: Vec3) -> Self {
        let view = light_view(light_position);
        let projection = Mat4::orthographic(
            -FIXED_HALF_EXTENT,
            FIXED_HALF_EXTENT,
            -FIXED_HALF_EXTENT,
            FIXED_HALF_EXTENT,
            FIXED_NEAR,
            FIXED_FAR,
        );
        Self { view, projection, near: FIXED_NEAR, far: FIXED_FAR }
    }

    /// Box fitted around `scene_bounds` in light view space
    ///
    /// Returns `None` when the bounds are empty.
    pub fn fitted(light_position: Vec3, scene_bounds: &BoundingSphere) -> Option<Self> {
        if scene_bounds.is_empty() {
            return None;
        }

        let view = light_view(light_position);
        let extents = scene_bounds.min_max(&view);
        let near = -extents.max.z;
        let far = -extents.min.z;
        let projection = Mat4::orthographic(
            extents.min.x,
            extents.max.x,
            extents.min.y,
            extents.max.y,
            near,
            far,
        );
        Some(Self { view, projection, near, far })
    }

    /// Combined light-space matrix (`projection * view`)
    pub fn light_space(&self) -> Mat4 {
        self.projection * self.view
    }
}

fn light_view(light_position: Vec3) -> Mat4 {
    Mat4::look_at(light_position, Vec3::zeros(), stable_up(-light_position))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cube_bounds(center: Vec3) -> BoundingSphere {
        let mut corners = Vec::new();
        for &x in &[-1.0, 1.0] {
            for &y in &[-1.0, 1.0] {
                for &z in &[-1.0, 1.0] {
                    corners.push(center + Vec3::new(x, y, z));
                }
            }
        }
        BoundingSphere::from_points(corners)
    }

    #[test]
    fn test_fixed_box() {
        let projection = LightProjection::fixed(Vec3::new(-2.0, 4.0, -1.0));
        assert_eq!(projection.near, 1.0);
        assert_eq!(projection.far, 7.5);
    }

    #[test]
    fn test_fitted_box_encloses_scene() {
        let bounds = cube_bounds(Vec3::zeros());
        let light = Vec3::new(-2.0, 6.0, -1.0);
        let projection = LightProjection::fitted(light, &bounds).expect("non-empty bounds");

        let distance = (light - bounds.center()).norm();
        assert_relative_eq!(projection.near, distance - bounds.radius(), epsilon = 1e-4);
        assert_relative_eq!(projection.far, distance + bounds.radius(), epsilon = 1e-4);

        let light_space = projection.light_space();
        for &x in &[-1.0, 1.0] {
            for &z in &[-1.0, 1.0] {
                let ndc = light_space.project_position(Vec3::new(x, 1.0, z));
                assert!(ndc.iter().all(|v| v.abs() <= 1.0 + 1e-4), "{:?}", ndc);
            }
        }
    }

    #[test]
    fn test_fitted_requires_bounds() {
        assert!(LightProjection::fitted(Vec3::new(1.0, 1.0, 1.0), &BoundingSphere::new()).is_none());
    }
}
