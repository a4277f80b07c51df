//! GPU layout of the shadow matrices
//!
//! Matches a std140 uniform block of the form
//!
//! ```glsl
//! layout (std140) uniform Shadows {
//!     mat4 lightSpaceMatrices[8];
//!     vec4 cascadeSplits[8];   // x = split depth
//!     uint cascadeCount;
//! };
//! ```

use bytemuck::{Pod, Zeroable};

use super::{CascadeDescriptor, LightProjection};

/// Upper bound on cascades the uniform block can carry
pub const MAX_SHADOW_CASCADES: usize = 8;

/// Packed shadow data for the lighting pass
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ShadowUniforms {
    /// Column-major light-space matrices, one per cascade
    pub light_space: [[[f32; 4]; 4]; MAX_SHADOW_CASCADES],
    /// Split depth in `x`, the rest is std140 padding
    pub splits: [[f32; 4]; MAX_SHADOW_CASCADES],
    /// Number of populated entries
    pub cascade_count: u32,
    /// Padding to a 16-byte multiple
    pub _padding: [u32; 3],
}

impl ShadowUniforms {
    /// Pack up to [`MAX_SHADOW_CASCADES`] cascades; extra cascades are dropped
    pub fn from_cascades(cascades: &[CascadeDescriptor]) -> Self {
        let mut uniforms = Self::zeroed();
        if cascades.len() > MAX_SHADOW_CASCADES {
            log::warn!(
                "Dropping {} cascades beyond the uniform limit of {}",
                cascades.len() - MAX_SHADOW_CASCADES,
                MAX_SHADOW_CASCADES
            );
        }

        let mut count = 0u32;
        for (slot, cascade) in cascades.iter().take(MAX_SHADOW_CASCADES).enumerate() {
            uniforms.light_space[slot] = cascade.light_space.into();
            uniforms.splits[slot][0] = cascade.split_depth;
            count += 1;
        }
        uniforms.cascade_count = count;
        uniforms
    }

    /// Pack a single shadow map as one cascade covering the whole range
    pub fn from_single(projection: &LightProjection) -> Self {
        let mut uniforms = Self::zeroed();
        uniforms.light_space[0] = projection.light_space().into();
        uniforms.cascade_count = 1;
        uniforms
    }

    /// Raw bytes for a buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Mat4;

    #[test]
    fn test_layout_is_std140_sized() {
        assert_eq!(std::mem::size_of::<ShadowUniforms>(), 64 * 8 + 16 * 8 + 16);
        assert_eq!(ShadowUniforms::zeroed().as_bytes().len(), std::mem::size_of::<ShadowUniforms>());
    }

    #[test]
    fn test_packs_cascades_in_order() {
        let cascades: Vec<CascadeDescriptor> = (0..3)
            .map(|i| CascadeDescriptor {
                split_depth: -(i as f32),
                light_space: Mat4::new_scaling(i as f32 + 1.0),
            })
            .collect();
        let uniforms = ShadowUniforms::from_cascades(&cascades);

        assert_eq!(uniforms.cascade_count, 3);
        assert_eq!(uniforms.splits[2][0], -2.0);
        assert_eq!(uniforms.light_space[1][0][0], 2.0);
        assert_eq!(uniforms.light_space[3], [[0.0; 4]; 4]);
    }

    #[test]
    fn test_truncates_to_limit() {
        let cascade = CascadeDescriptor { split_depth: -1.0, light_space: Mat4::identity() };
        let uniforms = ShadowUniforms::from_cascades(&[cascade; MAX_SHADOW_CASCADES + 2]);
        assert_eq!(uniforms.cascade_count as usize, MAX_SHADOW_CASCADES);
    }
}
