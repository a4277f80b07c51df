//! Cascade splitting and per-cascade light matrices
//!
//! The camera depth range is cut into slices with the "practical split
//! scheme" (a blend of logarithmic and uniform splits, GPU Gems 3 ch. 10).
//! Each slice is bounded by a sphere and gets an orthographic light
//! projection sized to that sphere, so the projection size does not change
//! as the camera rotates.

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};
use crate::config::ShadowConfig;
use super::stable_up;

/// Default blend factor between logarithmic and uniform splits
pub const DEFAULT_SPLIT_LAMBDA: f32 = 0.9;

/// Default number of cascades
pub const DEFAULT_CASCADE_COUNT: usize = 4;

/// Slice radii are rounded up to a multiple of `1 / RADIUS_SNAP_STEPS`
const RADIUS_SNAP_STEPS: f32 = 16.0;

/// NDC cube corners, near face first, in matching order on both faces
const NDC_CORNERS: [[f32; 3]; 8] = [
    [-1.0, 1.0, -1.0],
    [1.0, 1.0, -1.0],
    [1.0, -1.0, -1.0],
    [-1.0, -1.0, -1.0],
    [-1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    [1.0, -1.0, 1.0],
    [-1.0, -1.0, 1.0],
];

/// One shadow cascade
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CascadeDescriptor {
    /// Negative view-space depth of the slice's near edge
    pub split_depth: f32,
    /// Light-space view-projection (`projection * view`)
    pub light_space: Mat4,
}

/// Fractional split positions for `cascade_count` cascades
///
/// Returns one value per cascade, strictly increasing within (0, 1], where
/// value `i` marks the far edge of cascade `i` as a fraction of
/// `far - near`. `lambda = 1` gives pure logarithmic splits, `lambda = 0`
/// pure uniform ones. An empty or inverted range (or `near <= 0`) yields no
/// splits.
pub fn compute_splits(near: f32, far: f32, cascade_count: usize, lambda: f32) -> Vec<f32> {
    if cascade_count == 0 || !(near > 0.0 && near < far) {
        return Vec::new();
    }

    let range = far - near;
    let ratio = far / near;
    (0..cascade_count)
        .map(|i| {
            let p = (i + 1) as f32 / cascade_count as f32;
            let log = near * ratio.powf(p);
            let uniform = near + range * p;
            let depth = lambda * log + (1.0 - lambda) * uniform;
            ((depth - near) / range).min(1.0)
        })
        .collect()
}

/// World-space corners of the frustum slice between two split fractions
///
/// The NDC cube is unprojected through `inv_view_proj`, then every
/// near/far corner pair is interpolated at `split_low` and `split_high`.
/// Near-face corners come first.
pub fn frustum_slice(split_low: f32, split_high: f32, inv_view_proj: &Mat4) -> [Vec3; 8] {
    let mut corners =
        NDC_CORNERS.map(|[x, y, z]| inv_view_proj.project_position(Vec3::new(x, y, z)));

    for i in 0..4 {
        let edge = corners[i + 4] - corners[i];
        corners[i + 4] = corners[i] + edge * split_high;
        corners[i] += edge * split_low;
    }
    corners
}

/// Centroid and snapped radius of a slice
///
/// The centroid is the plain mean of the corners, not the volume centroid.
/// The radius is the largest corner distance rounded up to 1/16 so that
/// small camera moves do not change the projection size.
pub fn slice_bounds(corners: &[Vec3; 8]) -> (Vec3, f32) {
    let center = corners.iter().fold(Vec3::zeros(), |sum, corner| sum + corner) / 8.0;
    let radius = corners
        .iter()
        .map(|corner| (corner - center).norm())
        .fold(0.0_f32, f32::max);
    (center, utils::ceil_to_step(radius, RADIUS_SNAP_STEPS))
}

/// Build the cascade covering `[split_low, split_high]` of the camera range
///
/// `light_direction` points from the light into the scene; it is
/// normalized here, and a zero vector gives an undefined (NaN) matrix.
pub fn build_cascade(
    split_low: f32,
    split_high: f32,
    inv_view_proj: &Mat4,
    light_direction: Vec3,
    near: f32,
    far: f32,
) -> CascadeDescriptor {
    let corners = frustum_slice(split_low, split_high, inv_view_proj);
    let (center, radius) = slice_bounds(&corners);

    let direction = light_direction.normalize();
    let eye = center - direction * radius;
    let view = Mat4::look_at(eye, center, stable_up(direction));
    let projection = Mat4::orthographic(-radius, radius, -radius, radius, 0.0, 2.0 * radius);

    CascadeDescriptor {
        split_depth: -(near + split_low * (far - near)),
        light_space: projection * view,
    }
}

/// Light direction for a light at `position` shining at the origin
///
/// Returns `None` for a light sitting on the origin.
pub fn light_direction_from_position(position: Vec3) -> Option<Vec3> {
    (-position).try_normalize(f32::EPSILON)
}

/// Splits the camera frustum into cascades every frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CascadeSplitter {
    cascade_count: usize,
    lambda: f32,
}

impl Default for CascadeSplitter {
    fn default() -> Self {
        Self::new(DEFAULT_CASCADE_COUNT, DEFAULT_SPLIT_LAMBDA)
    }
}

impl CascadeSplitter {
    /// Create a splitter for `cascade_count` cascades
    pub fn new(cascade_count: usize, lambda: f32) -> Self {
        Self { cascade_count, lambda }
    }

    /// Create a splitter from the shadow settings
    pub fn from_config(config: &ShadowConfig) -> Self {
        Self::new(config.cascade_count, config.split_lambda)
    }

    /// Number of cascades produced per update
    pub fn cascade_count(&self) -> usize {
        self.cascade_count
    }

    /// Split blend factor
    pub fn lambda(&self) -> f32 {
        self.lambda
    }

    /// Fractional splits for the given clip range
    pub fn compute_splits(&self, near: f32, far: f32) -> Vec<f32> {
        compute_splits(near, far, self.cascade_count, self.lambda)
    }

    /// Recompute all cascades for this frame, nearest first
    pub fn update(
        &self,
        near: f32,
        far: f32,
        inv_view_proj: &Mat4,
        light_direction: Vec3,
    ) -> Vec<CascadeDescriptor> {
        let splits = self.compute_splits(near, far);

        let mut split_low = 0.0;
        let mut cascades = Vec::with_capacity(splits.len());
        for split_high in splits {
            cascades.push(build_cascade(split_low, split_high, inv_view_proj, light_direction, near, far));
            split_low = split_high;
        }

        log::trace!("Updated {} cascades for clip range [{}, {}]", cascades.len(), near, far);
        cascades
    }
}
