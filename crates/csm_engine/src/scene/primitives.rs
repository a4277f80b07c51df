//! Built-in demo geometry
//!
//! Both meshes use the position/normal/uv layout (stride 8) and are emitted
//! as plain triangle lists, two triangles per quad.

use nalgebra::Unit;

use crate::foundation::math::{utils, Mat4, Vec3};
use super::{MeshData, MeshPool, Scene, SceneError, SceneObject, VertexLayout, ObjectId};

/// Id of the ground plane in [`demo_scene`]
pub const GROUND_ID: ObjectId = 0;

/// Half-size of the ground plane
const GROUND_HALF_EXTENT: f32 = 25.0;
/// Height of the ground plane
const GROUND_HEIGHT: f32 = -0.5;

/// Quad corners in (u, v), two counter-clockwise triangles
const QUAD_CORNERS: [(f32, f32); 6] = [
    (-1.0, -1.0),
    (1.0, -1.0),
    (1.0, 1.0),
    (1.0, 1.0),
    (-1.0, 1.0),
    (-1.0, -1.0),
];

fn push_quad(vertices: &mut Vec<f32>, center: Vec3, axis_u: Vec3, axis_v: Vec3, uv_scale: f32) {
    let normal = axis_u.cross(&axis_v).normalize();
    for &(s, t) in &QUAD_CORNERS {
        let position = center + axis_u * s + axis_v * t;
        vertices.extend_from_slice(&[
            position.x,
            position.y,
            position.z,
            normal.x,
            normal.y,
            normal.z,
            (s + 1.0) * 0.5 * uv_scale,
            (t + 1.0) * 0.5 * uv_scale,
        ]);
    }
}

/// 50x50 ground plane at y = -0.5 facing up, with tiling texture coordinates
pub fn plane() -> MeshData {
    let mut vertices = Vec::with_capacity(6 * 8);
    push_quad(
        &mut vertices,
        Vec3::new(0.0, GROUND_HEIGHT, 0.0),
        Vec3::x() * GROUND_HALF_EXTENT,
        -Vec3::z() * GROUND_HALF_EXTENT,
        GROUND_HALF_EXTENT,
    );
    MeshData::new(vertices, VertexLayout::position_normal_uv())
}

/// Cube spanning [-1, 1] on every axis with outward normals (36 vertices)
pub fn cube() -> MeshData {
    let faces = [
        (Vec3::x(), -Vec3::z(), Vec3::y()),
        (-Vec3::x(), Vec3::z(), Vec3::y()),
        (Vec3::y(), Vec3::x(), -Vec3::z()),
        (-Vec3::y(), Vec3::x(), Vec3::z()),
        (Vec3::z(), Vec3::x(), Vec3::y()),
        (-Vec3::z(), -Vec3::x(), Vec3::y()),
    ];

    let mut vertices = Vec::with_capacity(36 * 8);
    for (normal, axis_u, axis_v) in faces {
        push_quad(&mut vertices, normal, axis_u, axis_v, 1.0);
    }
    MeshData::new(vertices, VertexLayout::position_normal_uv())
}

/// Ground plane plus three cubes
///
/// The plane is stored under [`GROUND_ID`] and excluded from the aggregate
/// bounds; the cubes use ids 1 to 3.
pub fn demo_scene(pool: &mut MeshPool) -> Result<Scene, SceneError> {
    let plane = pool.insert(plane());
    let cube = pool.insert(cube());

    let tilted_axis = Unit::new_normalize(Vec3::new(1.0, 0.0, 1.0));
    let cube_transforms = [
        Mat4::new_translation(&Vec3::new(0.0, 1.5, 0.0)) * Mat4::new_scaling(0.5),
        Mat4::new_translation(&Vec3::new(2.0, 0.0, 1.0)) * Mat4::new_scaling(0.5),
        Mat4::new_translation(&Vec3::new(-1.0, 0.0, 2.0))
            * Mat4::from_axis_angle(&tilted_axis, utils::deg_to_rad(60.0))
            * Mat4::new_scaling(0.25),
    ];

    let mut scene = Scene::new();
    scene.add(GROUND_ID, SceneObject::new(pool, plane, Mat4::identity())?, false)?;
    for (id, transform) in (1..).zip(cube_transforms) {
        scene.add(id, SceneObject::new(pool, cube, transform)?, true)?;
    }

    log::info!(
        "Demo scene ready: {} objects, bounds radius {:.3}",
        scene.len(),
        scene.bounding_sphere().radius()
    );
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cube_shape() {
        let cube = cube();
        assert_eq!(cube.vertex_count(), 36);
        assert!(cube.positions().all(|p| p.iter().all(|c| c.abs() == 1.0)));

        let bounds = cube.bounding_sphere(&Mat4::identity());
        assert_relative_eq!(bounds.center(), Vec3::zeros(), epsilon = 1e-6);
        assert_relative_eq!(bounds.radius(), 3.0_f32.sqrt(), epsilon = 1e-5);
    }

    #[test]
    fn test_cube_normals_point_outward() {
        let cube = cube();
        for vertex in cube.vertices().chunks_exact(8) {
            let position = Vec3::new(vertex[0], vertex[1], vertex[2]);
            let normal = Vec3::new(vertex[3], vertex[4], vertex[5]);
            assert_relative_eq!(position.dot(&normal), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_plane_is_flat() {
        let plane = plane();
        assert_eq!(plane.vertex_count(), 6);
        assert!(plane.positions().all(|p| p.y == GROUND_HEIGHT));
        assert!(plane.positions().any(|p| p.x == 25.0 && p.z == -25.0));
    }

    #[test]
    fn test_demo_scene_layout() {
        let mut pool = MeshPool::new();
        let scene = demo_scene(&mut pool).expect("demo scene builds");

        assert_eq!(scene.len(), 4);
        assert_eq!(pool.len(), 2);
        assert_eq!(scene.is_included_in_bounds(GROUND_ID).ok(), Some(false));

        // the aggregate stays near the cubes, far smaller than the ground
        let bounds = scene.bounding_sphere();
        assert!(bounds.radius() < 5.0);
        for id in 1..=3 {
            let cube = scene.get(id).expect("cube present");
            assert!(bounds.contains_sphere(cube.bounding_sphere(), 1e-4));
        }
    }
}
