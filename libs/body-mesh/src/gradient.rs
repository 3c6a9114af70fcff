//! # Gradient Estimation
//!
//! Central finite differences along the world axes. The result is not
//! normalized; callers that only need a direction normalize it themselves.
//! Each estimate costs six density evaluations.

use crate::field::ScalarField;
use config::constants::GRADIENT_EPSILON;
use glam::DVec3;

/// Central-difference gradient of `density` at `point` with step `epsilon`.
///
/// # Example
///
/// ```rust
/// use body_mesh::gradient::central_difference;
/// use glam::DVec3;
///
/// // f(p) = 3x + 2z has gradient (3, 0, 2)
/// let g = central_difference(|p: DVec3| 3.0 * p.x + 2.0 * p.z, DVec3::ONE, 0.01);
/// assert!((g - DVec3::new(3.0, 0.0, 2.0)).length() < 1e-9);
/// ```
pub fn central_difference<F>(density: F, point: DVec3, epsilon: f64) -> DVec3
where
    F: Fn(DVec3) -> f64,
{
    let axis = |unit: DVec3| {
        let step = unit * epsilon;
        density(point + step) - density(point - step)
    };
    DVec3::new(axis(DVec3::X), axis(DVec3::Y), axis(DVec3::Z)) / (2.0 * epsilon)
}

/// Gradient of a scalar field using the reference step [`GRADIENT_EPSILON`].
pub fn estimate_gradient<F>(field: &F, point: DVec3) -> DVec3
where
    F: ScalarField + ?Sized,
{
    central_difference(|p| field.density(p), point, GRADIENT_EPSILON)
}
