//! Online bounding-sphere accumulation
//!
//! The sphere is grown one point or sub-sphere at a time. The center is a
//! running average of everything added (weighted by sample count) and the
//! radius grows just enough to keep both the previous sphere and the new
//! sample inside after the center moves. That makes the result a loose,
//! insertion-order dependent bound rather than a minimal enclosing sphere,
//! which is fine for fitting shadow and clip volumes.

use crate::bounds::Aabb;
use crate::foundation::math::{Mat4, Mat4Ext, Vec3};

/// A bounding sphere with the number of samples folded into it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    center: Vec3,
    radius: f32,
    count: u32,
}

impl Default for BoundingSphere {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundingSphere {
    /// Create an empty sphere (origin, zero radius, no samples)
    pub fn new() -> Self {
        Self {
            center: Vec3::zeros(),
            radius: 0.0,
            count: 0,
        }
    }

    /// Build a sphere over a finite point set
    ///
    /// Uses two passes: the center is the mean of all points (the value the
    /// running average converges to) and the radius is the largest distance
    /// from that center, so the result is the tightest sphere around the
    /// centroid.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Vec3>,
        I::IntoIter: Clone,
    {
        let points = points.into_iter();

        let mut sum = Vec3::zeros();
        let mut count = 0u32;
        for point in points.clone() {
            sum += point;
            count += 1;
        }
        if count == 0 {
            return Self::new();
        }

        let center = sum / count as f32;
        let radius = points
            .map(|point| (point - center).norm())
            .fold(0.0_f32, f32::max);

        Self { center, radius, count }
    }

    /// Build a sphere from interleaved float vertex data
    ///
    /// Reads three floats at `offset` inside every `stride`-sized vertex,
    /// transforms them by `transform` (w = 1) and folds them in. Trailing
    /// floats that do not make up a whole vertex are ignored.
    pub fn from_strided(data: &[f32], stride: usize, offset: usize, transform: &Mat4) -> Self {
        if stride == 0 || offset + 3 > stride {
            return Self::new();
        }

        let positions = data
            .chunks_exact(stride)
            .map(|vertex| transform.transform_position(Vec3::new(
                vertex[offset],
                vertex[offset + 1],
                vertex[offset + 2],
            )));
        Self::from_points(positions)
    }

    /// Extend the sphere to contain `point`
    pub fn add_point(&mut self, point: Vec3) {
        self.extend(point, 0.0, 1);
    }

    /// Extend the sphere to contain `other`
    ///
    /// An empty `other` leaves this sphere untouched.
    pub fn add_sphere(&mut self, other: &BoundingSphere) {
        self.extend(other.center, other.radius, other.count);
    }

    /// Clear back to the empty state
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn extend(&mut self, center: Vec3, radius: f32, weight: u32) {
        if weight == 0 {
            return;
        }
        if self.count == 0 {
            self.center = center;
            self.radius = radius;
            self.count = weight;
            return;
        }

        let previous = self.center;
        let total = self.count + weight;
        self.center = (previous * self.count as f32 + center * weight as f32) / total as f32;

        // the old sphere stays inside once the radius absorbs the center drift
        let drift = (self.center - previous).norm();
        let reach = (center - self.center).norm() + radius;
        self.radius = (self.radius + drift).max(reach);
        self.count = total;
    }

    /// Sphere center
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Sphere radius
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Number of samples folded into the sphere
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Whether nothing has been added since creation or the last reset
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Whether `point` lies inside the sphere, allowing `epsilon` of slack
    pub fn contains_point(&self, point: Vec3, epsilon: f32) -> bool {
        (point - self.center).norm() <= self.radius + epsilon
    }

    /// Whether `other` lies entirely inside this sphere
    pub fn contains_sphere(&self, other: &BoundingSphere, epsilon: f32) -> bool {
        (other.center - self.center).norm() + other.radius <= self.radius + epsilon
    }

    /// Conservative box around the sphere in the space of `transform`
    ///
    /// Only the center is transformed; the box is the center expanded by the
    /// radius on every axis, so `transform` is assumed not to scale.
    pub fn min_max(&self, transform: &Mat4) -> Aabb {
        let center = transform.transform_position(self.center);
        Aabb::from_center_extents(center, Vec3::repeat(self.radius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    const EPSILON: f32 = 1e-4;

    fn unit_cube_corners() -> Vec<Vec3> {
        let mut corners = Vec::new();
        for &x in &[-1.0, 1.0] {
            for &y in &[-1.0, 1.0] {
                for &z in &[-1.0, 1.0] {
                    corners.push(Vec3::new(x, y, z));
                }
            }
        }
        corners
    }

    fn random_points(rng: &mut StdRng, count: usize) -> Vec<Vec3> {
        (0..count)
            .map(|_| Vec3::new(
                rng.gen_range(-50.0..50.0),
                rng.gen_range(-50.0..50.0),
                rng.gen_range(-50.0..50.0),
            ))
            .collect()
    }

    #[test]
    fn test_empty_sphere() {
        let sphere = BoundingSphere::new();
        assert!(sphere.is_empty());
        assert_eq!(sphere.center(), Vec3::zeros());
        assert_eq!(sphere.radius(), 0.0);
        assert_eq!(sphere.count(), 0);
    }

    #[test]
    fn test_first_point_becomes_center() {
        let mut sphere = BoundingSphere::new();
        sphere.add_point(Vec3::new(3.0, -2.0, 1.0));
        assert_eq!(sphere.center(), Vec3::new(3.0, -2.0, 1.0));
        assert_eq!(sphere.radius(), 0.0);
        assert_eq!(sphere.count(), 1);
    }

    #[test]
    fn test_running_average_center() {
        let mut sphere = BoundingSphere::new();
        sphere.add_point(Vec3::new(0.0, 0.0, 0.0));
        sphere.add_point(Vec3::new(10.0, 0.0, 0.0));
        assert_relative_eq!(sphere.center(), Vec3::new(5.0, 0.0, 0.0));
        assert_relative_eq!(sphere.radius(), 5.0);

        sphere.add_point(Vec3::new(10.0, 0.0, 0.0));
        assert_relative_eq!(sphere.center(), Vec3::new(20.0 / 3.0, 0.0, 0.0), epsilon = EPSILON);
        // the first point must still be inside after the center drifted
        assert!(sphere.contains_point(Vec3::zeros(), EPSILON));
    }

    #[test]
    fn test_unit_cube_corners() {
        let sphere = BoundingSphere::from_points(unit_cube_corners());
        assert_relative_eq!(sphere.center(), Vec3::zeros(), epsilon = EPSILON);
        assert_relative_eq!(sphere.radius(), 3.0_f32.sqrt(), epsilon = EPSILON);
        assert_eq!(sphere.count(), 8);
    }

    #[test]
    fn test_online_sphere_contains_every_point_in_any_order() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..50 {
            let mut points = random_points(&mut rng, 64);
            points.shuffle(&mut rng);

            let mut sphere = BoundingSphere::new();
            for point in &points {
                sphere.add_point(*point);
            }
            assert_eq!(sphere.count(), 64);
            for point in &points {
                assert!(sphere.contains_point(*point, EPSILON), "{:?} escaped {:?}", point, sphere);
            }
        }
    }

    #[test]
    fn test_radius_never_shrinks() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut sphere = BoundingSphere::new();
        let mut previous = 0.0;
        for point in random_points(&mut rng, 200) {
            sphere.add_point(point);
            assert!(sphere.radius() >= previous);
            previous = sphere.radius();
        }
    }

    #[test]
    fn test_batch_sphere_contains_every_point() {
        let mut rng = StdRng::seed_from_u64(42);
        let points = random_points(&mut rng, 128);
        let sphere = BoundingSphere::from_points(points.iter().copied());
        for point in &points {
            assert!(sphere.contains_point(*point, EPSILON));
        }
    }

    #[test]
    fn test_added_sphere_keeps_its_points() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..20 {
            let a_points = random_points(&mut rng, 16);
            let b_points: Vec<Vec3> = random_points(&mut rng, 16)
                .into_iter()
                .map(|p| p + Vec3::new(80.0, 0.0, 0.0))
                .collect();

            let mut a = BoundingSphere::new();
            for point in &a_points {
                a.add_point(*point);
            }
            let b = BoundingSphere::from_points(b_points.iter().copied());

            a.add_sphere(&b);
            assert_eq!(a.count(), 32);
            assert!(a.contains_sphere(&b, EPSILON));
            for point in a_points.iter().chain(&b_points) {
                assert!(a.contains_point(*point, EPSILON));
            }
        }
    }

    #[test]
    fn test_adding_empty_sphere_is_noop() {
        let mut sphere = BoundingSphere::new();
        sphere.add_sphere(&BoundingSphere::new());
        assert!(sphere.is_empty());

        sphere.add_point(Vec3::new(1.0, 1.0, 1.0));
        let before = sphere;
        sphere.add_sphere(&BoundingSphere::new());
        assert_eq!(sphere, before);
    }

    #[test]
    fn test_reset_clears_all_fields() {
        let mut sphere = BoundingSphere::from_points(unit_cube_corners());
        sphere.reset();
        assert_eq!(sphere, BoundingSphere::new());
    }

    #[test]
    fn test_from_strided_reads_position_attribute() {
        // position at offset 2 of a 5-float vertex, one trailing partial vertex
        let data = [
            9.0, 9.0, -1.0, 0.0, 0.0,
            9.0, 9.0, 1.0, 0.0, 0.0,
            9.0, 9.0,
        ];
        let transform = Mat4::new_translation(&Vec3::new(0.0, 2.0, 0.0));
        let sphere = BoundingSphere::from_strided(&data, 5, 2, &transform);

        assert_eq!(sphere.count(), 2);
        assert_relative_eq!(sphere.center(), Vec3::new(0.0, 2.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(sphere.radius(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_from_strided_rejects_bad_layout() {
        let data = [0.0; 12];
        assert!(BoundingSphere::from_strided(&data, 0, 0, &Mat4::identity()).is_empty());
        assert!(BoundingSphere::from_strided(&data, 4, 2, &Mat4::identity()).is_empty());
    }

    #[test]
    fn test_min_max_in_view_space() {
        let sphere = BoundingSphere::from_points(unit_cube_corners());
        let view = Mat4::new_translation(&Vec3::new(0.0, 0.0, -10.0));
        let aabb = sphere.min_max(&view);
        let r = 3.0_f32.sqrt();

        assert_relative_eq!(aabb.min, Vec3::new(-r, -r, -10.0 - r), epsilon = EPSILON);
        assert_relative_eq!(aabb.max, Vec3::new(r, r, -10.0 + r), epsilon = EPSILON);
    }
}
