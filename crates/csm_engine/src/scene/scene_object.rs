//! Mesh instance placed in the world

use crate::bounds::BoundingSphere;
use crate::foundation::math::Mat4;
use super::{MeshData, MeshHandle, MeshPool, SceneError};

/// A mesh handle with its model transform and world-space bounds
///
/// The bounds are computed once from the mesh positions at construction,
/// so the transform is fixed for the object's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    mesh: MeshHandle,
    transform: Mat4,
    bounds: BoundingSphere,
}

impl SceneObject {
    /// Create an object from a mesh stored in `pool`
    pub fn new(pool: &MeshPool, mesh: MeshHandle, transform: Mat4) -> Result<Self, SceneError> {
        let data = pool.get(mesh).ok_or(SceneError::MeshNotFound)?;
        Ok(Self::from_mesh_data(mesh, data, transform))
    }

    /// Create an object when the mesh data is already at hand
    pub fn from_mesh_data(mesh: MeshHandle, data: &MeshData, transform: Mat4) -> Self {
        let bounds = data.bounding_sphere(&transform);
        log::trace!(
            "Scene object bounds: center {:?}, radius {}",
            bounds.center(),
            bounds.radius()
        );
        Self { mesh, transform, bounds }
    }

    /// Handle of the mesh to draw
    pub fn mesh(&self) -> MeshHandle {
        self.mesh
    }

    /// Model matrix
    pub fn transform(&self) -> &Mat4 {
        &self.transform
    }

    /// World-space bounding sphere
    pub fn bounding_sphere(&self) -> &BoundingSphere {
        &self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::scene::primitives;
    use approx::assert_relative_eq;

    #[test]
    fn test_bounds_follow_transform() {
        let mut pool = MeshPool::new();
        let cube = pool.insert(primitives::cube());
        let transform = Mat4::new_translation(&Vec3::new(2.0, 0.0, 1.0)) * Mat4::new_scaling(0.5);

        let object = SceneObject::new(&pool, cube, transform).expect("cube is in the pool");
        let bounds = object.bounding_sphere();
        assert_relative_eq!(bounds.center(), Vec3::new(2.0, 0.0, 1.0), epsilon = 1e-6);
        assert_relative_eq!(bounds.radius(), 0.5 * 3.0_f32.sqrt(), epsilon = 1e-5);
        assert_eq!(object.mesh(), cube);
    }

    #[test]
    fn test_unknown_mesh() {
        let mut pool = MeshPool::new();
        let cube = pool.insert(primitives::cube());
        pool.remove(cube);

        let result = SceneObject::new(&pool, cube, Mat4::identity());
        assert!(matches!(result, Err(SceneError::MeshNotFound)));
    }
}
