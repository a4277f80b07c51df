//! Bounding volumes
//!
//! [`BoundingSphere`] is the accumulator the scene and the shadow fitting
//! are built on; [`Aabb`] is what it projects to when a caller needs
//! min/max extents in some other space (view space for clip fitting, light
//! space for the single-map projection).

mod aabb;
mod bounding_sphere;

pub use aabb::Aabb;
pub use bounding_sphere::BoundingSphere;
