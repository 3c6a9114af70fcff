//! # Density Field
//!
//! Metaball-style scalar field around a skeleton chain.
//!
//! ## Algorithm
//!
//! Every node contributes one primitive:
//!
//! - a node with a `next` neighbor is a tapered segment from itself to that
//!   neighbor. The query point is projected onto the segment (clamped), the
//!   radii are interpolated at the projection and the offset is expressed in
//!   a frame looking along the segment;
//! - a node without `next` is an ellipsoid in the node's own frame.
//!
//! The normalized distance to a primitive is
//! `sqrt((x/rx)^2 + (y/ry)^2 + (z/rz)^2)` with `rz = (rx + ry) / 2`. The
//! field keeps the smallest distance over all primitives and maps it to
//! `clamp01(exp(-4 d^2))`. Taking the minimum instead of a smooth union can
//! bend the gradient sharply where two primitives meet.
//!
//! The field borrows the chain and caches nothing, so it always reflects the
//! chain's current state.

use crate::gradient::estimate_gradient;
use body_skeleton::{Frame, NodeId, SkeletonChain, SkeletonNode};
use config::constants::{DENSITY_FALLOFF, EPSILON};
use glam::DVec3;

/// A scalar field that can be sampled anywhere in space.
///
/// The sampler and triangulator only depend on this trait, so they run on
/// any field, not only on skeleton-derived ones.
pub trait ScalarField {
    /// Field value at `point`.
    fn density(&self, point: DVec3) -> f64;

    /// Gradient at `point`, finite differences by default.
    fn gradient(&self, point: DVec3) -> DVec3 {
        estimate_gradient(self, point)
    }
}

/// Maps a normalized distance to a density in [0, 1].
#[inline]
pub fn falloff(distance: f64) -> f64 {
    (-distance * distance * DENSITY_FALLOFF).exp().clamp(0.0, 1.0)
}

/// Density field of a skeleton chain.
///
/// # Example
///
/// ```rust
/// use body_mesh::{DensityField, ScalarField};
/// use body_skeleton::SkeletonChain;
/// use glam::DVec3;
///
/// let mut chain = SkeletonChain::new();
/// chain.add_node(DVec3::ZERO, 1.0, 1.0).unwrap();
///
/// let field = DensityField::new(&chain);
/// assert_eq!(field.density(DVec3::ZERO), 1.0);
/// assert!((field.density(DVec3::X) - (-4.0f64).exp()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DensityField<'a> {
    chain: &'a SkeletonChain,
}

impl<'a> DensityField<'a> {
    /// Wraps a chain.
    pub fn new(chain: &'a SkeletonChain) -> Self {
        Self { chain }
    }

    /// The underlying chain.
    pub fn chain(&self) -> &'a SkeletonChain {
        self.chain
    }

    /// Smallest normalized distance from `point` to any primitive.
    ///
    /// Returns `f64::MAX` for an empty chain.
    pub fn normalized_distance(&self, point: DVec3) -> f64 {
        self.chain
            .iter_ids()
            .map(|id| self.primitive_distance(id, point))
            .fold(f64::MAX, f64::min)
    }

    /// Normalized distance from `point` to the primitive owned by `id`.
    ///
    /// Unknown ids are infinitely far away.
    pub fn primitive_distance(&self, id: NodeId, point: DVec3) -> f64 {
        let Ok(node) = self.chain.node(id) else {
            return f64::MAX;
        };
        match node.next().and_then(|next| self.chain.node(next).ok()) {
            Some(next) if (next.position() - node.position()).length_squared() > EPSILON => {
                distance_to_segment(point, node, next)
            }
            // A collapsed segment is measured like an isolated node
            _ => self.distance_to_node(id, node, point),
        }
    }

    fn distance_to_node(&self, id: NodeId, node: &SkeletonNode, point: DVec3) -> f64 {
        let frame = self.chain.frame(id).unwrap_or_default();
        let local = frame.to_local(point - node.position());
        ellipsoid_distance(local, radii(node))
    }
}

impl ScalarField for DensityField<'_> {
    fn density(&self, point: DVec3) -> f64 {
        falloff(self.normalized_distance(point))
    }
}

fn distance_to_segment(point: DVec3, a: &SkeletonNode, b: &SkeletonNode) -> f64 {
    let ab = b.position() - a.position();
    let ap = point - a.position();
    let t = (ap.dot(ab) / ab.length_squared()).clamp(0.0, 1.0);
    let on_segment = a.position() + ab * t;

    let segment_radii = radii(a).lerp(radii(b), t);
    let frame = Frame::from_forward(ab);

    let local = frame.to_local(point - on_segment);
    ellipsoid_distance(local, segment_radii)
}

/// Semi-axes of a node along its local right, up and forward axes.
#[inline]
fn radii(node: &SkeletonNode) -> DVec3 {
    DVec3::new(node.radius_x(), node.radius_y(), node.radius_z())
}

/// Normalized radial distance of a local offset from an ellipsoid with the
/// given semi-axes.
fn ellipsoid_distance(local: DVec3, radii: DVec3) -> f64 {
    (local / radii).length()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn single_node(radius_x: f64, radius_y: f64) -> SkeletonChain {
        let mut chain = SkeletonChain::new();
        chain.add_node(DVec3::ZERO, radius_x, radius_y).unwrap();
        chain
    }

    fn capsule() -> SkeletonChain {
        let mut chain = SkeletonChain::new();
        chain.push_linked(DVec3::ZERO, 0.5, 0.5).unwrap();
        chain.push_linked(DVec3::new(2.0, 0.0, 0.0), 0.5, 0.5).unwrap();
        chain
    }

    #[test]
    fn test_empty_chain_has_zero_density() {
        let chain = SkeletonChain::new();
        let field = DensityField::new(&chain);
        assert_eq!(field.normalized_distance(DVec3::ZERO), f64::MAX);
        assert_eq!(field.density(DVec3::ZERO), 0.0);
    }

    #[test]
    fn test_isolated_node_reference_values() {
        let chain = single_node(1.0, 1.0);
        let field = DensityField::new(&chain);
        assert_eq!(field.density(DVec3::ZERO), 1.0);
        assert_relative_eq!(field.density(DVec3::X), 0.0183, epsilon = 1e-4);
    }

    #[test]
    fn test_isolated_node_is_anisotropic() {
        // Default frame: radius_x along world X, radius_y along world Y
        let chain = single_node(2.0, 1.0);
        let field = DensityField::new(&chain);
        assert_relative_eq!(field.normalized_distance(DVec3::new(2.0, 0.0, 0.0)), 1.0);
        assert_relative_eq!(field.normalized_distance(DVec3::new(0.0, 1.0, 0.0)), 1.0);
        // Out-of-plane extent is the mean radius
        assert_relative_eq!(field.normalized_distance(DVec3::new(0.0, 0.0, 1.5)), 1.0);
    }

    #[test]
    fn test_out_of_plane_extent_is_node_radius_z() {
        let chain = single_node(0.4, 1.0);
        let field = DensityField::new(&chain);
        let radius_z = chain.nodes()[0].radius_z();
        assert_relative_eq!(
            field.normalized_distance(DVec3::new(0.0, 0.0, radius_z)),
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_segment_interior_is_radial() {
        let chain = capsule();
        let field = DensityField::new(&chain);
        // Anywhere along the axis the distance is zero
        assert_eq!(field.normalized_distance(DVec3::new(1.0, 0.0, 0.0)), 0.0);
        assert_relative_eq!(field.normalized_distance(DVec3::new(1.0, 0.5, 0.0)), 1.0);
        assert_relative_eq!(field.normalized_distance(DVec3::new(0.7, 0.0, -0.5)), 1.0);
    }

    #[test]
    fn test_segment_interpolates_radii() {
        let mut chain = SkeletonChain::new();
        chain.push_linked(DVec3::ZERO, 1.0, 1.0).unwrap();
        chain.push_linked(DVec3::new(0.0, 0.0, 4.0), 0.5, 0.5).unwrap();
        let field = DensityField::new(&chain);
        // Halfway the radius is 0.75
        assert_relative_eq!(
            field.normalized_distance(DVec3::new(0.75, 0.0, 2.0)),
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_collapsed_segment_measures_node() {
        let mut chain = SkeletonChain::new();
        chain.push_linked(DVec3::ZERO, 1.0, 1.0).unwrap();
        chain.push_linked(DVec3::ZERO, 1.0, 1.0).unwrap();
        let field = DensityField::new(&chain);
        let d = field.normalized_distance(DVec3::new(0.0, 1.0, 0.0));
        assert!(d.is_finite());
        assert_relative_eq!(d, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_closest_primitive_dominates() {
        let mut chain = SkeletonChain::new();
        chain.add_node(DVec3::ZERO, 1.0, 1.0).unwrap();
        chain.add_node(DVec3::new(10.0, 0.0, 0.0), 1.0, 1.0).unwrap();
        let field = DensityField::new(&chain);
        assert_eq!(field.density(DVec3::new(10.0, 0.0, 0.0)), 1.0);
        assert_relative_eq!(field.normalized_distance(DVec3::new(9.0, 0.0, 0.0)), 1.0);
    }

    #[test]
    fn test_density_is_bounded_and_reproducible() {
        let chain = capsule();
        let field = DensityField::new(&chain);
        for i in -20..=20 {
            let p = DVec3::new(f64::from(i) * 0.17, f64::from(i) * -0.05, 0.3);
            let d = field.density(p);
            assert!((0.0..=1.0).contains(&d));
            assert_eq!(d.to_bits(), field.density(p).to_bits());
        }
    }

    #[test]
    fn test_falloff_shape() {
        assert_eq!(falloff(0.0), 1.0);
        assert!(falloff(0.5) > falloff(1.0));
        assert_eq!(falloff(f64::MAX), 0.0);
    }
}
