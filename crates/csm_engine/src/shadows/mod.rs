//! Shadow map fitting
//!
//! Computes the light-space matrices consumed by the depth pass and the
//! lighting pass:
//! - [`cascade`]: per-slice orthographic matrices for cascaded shadow maps
//! - [`light_projection`]: a single orthographic matrix around the scene
//! - [`uniforms`]: the packed GPU layout of either result

pub mod cascade;
pub mod light_projection;
pub mod uniforms;

pub use cascade::{
    build_cascade, compute_splits, light_direction_from_position, CascadeDescriptor,
    CascadeSplitter, DEFAULT_CASCADE_COUNT, DEFAULT_SPLIT_LAMBDA,
};
pub use light_projection::LightProjection;
pub use uniforms::{ShadowUniforms, MAX_SHADOW_CASCADES};

use crate::foundation::math::{world_up, Vec3};

/// Up vector for a light looking along `direction`
///
/// World up, unless the light points (almost) straight up or down, where
/// the look-at basis would collapse; +Z is used there instead.
pub(crate) fn stable_up(direction: Vec3) -> Vec3 {
    let up = world_up();
    if direction.cross(&up).norm_squared() < 1e-8 {
        Vec3::z()
    } else {
        up
    }
}
