//! # Surface Sampler
//!
//! Stochastic projection of random points onto an isosurface.
//!
//! ## Algorithm
//!
//! 1. Draw a uniform point in the sampling box.
//! 2. Up to `projection_steps` times: if `|density - threshold|` is below
//!    [`PROJECTION_TOLERANCE`], accept the point unless an earlier sample is
//!    closer than `min_distance_between_points`, and stop. Otherwise move
//!    it by `-normalize(gradient) * delta * projection_step_size`.
//! 3. Repeat until `max_surface_samples` points are accepted or
//!    `max_surface_samples * ATTEMPT_BUDGET_FACTOR` candidates are drawn.
//!
//! Running out of attempts is not an error; the caller gets whatever was
//! found.

use crate::config::{GeneratorConfig, NeighborSearch};
use crate::field::ScalarField;
use crate::spatial::PointGrid;
use body_skeleton::{Aabb, SkeletonChain};
use config::constants::{ATTEMPT_BUDGET_FACTOR, BOUNDS_EXPANSION, EMPTY_BOUNDS_SIZE, PROJECTION_TOLERANCE};
use glam::DVec3;
use log::{debug, warn};
use rand::Rng;

/// A sample on the isosurface.
///
/// The normal is the normalized field gradient, so it points toward
/// increasing density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    /// Position
    pub position: DVec3,
    /// Unit normal (zero where the gradient vanishes)
    pub normal: DVec3,
}

/// Sampling domain for a chain: the node bounds grown by
/// [`BOUNDS_EXPANSION`], or a unit box at the chain origin when empty.
///
/// # Example
///
/// ```rust
/// use body_mesh::sampler::sampling_bounds;
/// use body_skeleton::SkeletonChain;
/// use glam::DVec3;
///
/// let bounds = sampling_bounds(&SkeletonChain::new());
/// assert_eq!(bounds.size(), DVec3::ONE);
/// ```
pub fn sampling_bounds(chain: &SkeletonChain) -> Aabb {
    match chain.node_bounds() {
        Some(bounds) => bounds.expanded(BOUNDS_EXPANSION),
        None => Aabb::from_center_size(chain.origin(), DVec3::splat(EMPTY_BOUNDS_SIZE)),
    }
}

/// Accepted samples plus the spacing index used to reject crowded ones.
struct SampleSet {
    points: Vec<SurfacePoint>,
    grid: Option<PointGrid>,
    min_distance: f64,
}

impl SampleSet {
    fn new(config: &GeneratorConfig) -> Self {
        let min_distance = config.min_distance_between_points;
        let grid = match config.neighbor_search {
            NeighborSearch::Grid => Some(PointGrid::new(min_distance)),
            NeighborSearch::BruteForce => None,
        };
        Self {
            points: Vec::new(),
            grid,
            min_distance,
        }
    }

    fn len(&self) -> usize {
        self.points.len()
    }

    fn too_close(&self, position: DVec3) -> bool {
        let limit = self.min_distance * self.min_distance;
        let crowded = |index: usize| (self.points[index].position - position).length_squared() < limit;
        match &self.grid {
            Some(grid) => grid.any_candidate(position, self.min_distance, crowded),
            None => (0..self.points.len()).any(crowded),
        }
    }

    fn push(&mut self, point: SurfacePoint) {
        if let Some(grid) = &mut self.grid {
            grid.insert(self.points.len(), point.position);
        }
        self.points.push(point);
    }
}

/// Samples points on the `surface_threshold` isosurface of `field` inside
/// `bounds`.
///
/// Every returned point has `|density - threshold| < PROJECTION_TOLERANCE`
/// and no two returned points are closer than
/// `min_distance_between_points`. The config is used as given; sanitize it
/// with [`GeneratorConfig::clamped`] first.
pub fn sample_surface<F, R>(field: &F, bounds: &Aabb, config: &GeneratorConfig, rng: &mut R) -> Vec<SurfacePoint>
where
    F: ScalarField + ?Sized,
    R: Rng + ?Sized,
{
    let target = config.max_surface_samples;
    let budget = target.saturating_mul(ATTEMPT_BUDGET_FACTOR);
    let mut samples = SampleSet::new(config);
    let mut attempts = 0;

    debug!(
        "sampling up to {target} points in [{}, {}] with {budget} attempts",
        bounds.min, bounds.max
    );

    while samples.len() < target && attempts < budget {
        attempts += 1;
        let mut point = uniform_point(bounds, rng);

        for _ in 0..config.projection_steps {
            let delta = field.density(point) - config.surface_threshold;
            if delta.abs() < PROJECTION_TOLERANCE {
                if !samples.too_close(point) {
                    samples.push(SurfacePoint {
                        position: point,
                        normal: field.gradient(point).normalize_or_zero(),
                    });
                }
                break;
            }
            let direction = field.gradient(point).normalize_or_zero();
            point -= direction * (delta * config.projection_step_size);
        }
    }

    if samples.len() < target {
        warn!(
            "attempt budget exhausted: accepted {} of {target} surface samples",
            samples.len()
        );
    }
    debug!("accepted {} surface samples after {attempts} attempts", samples.len());
    samples.points
}

/// Uniform point in `bounds`.
///
/// Interpolates between the corners so boxes wider than `f64::MAX` still
/// yield finite coordinates.
fn uniform_point<R>(bounds: &Aabb, rng: &mut R) -> DVec3
where
    R: Rng + ?Sized,
{
    let t = DVec3::new(rng.gen::<f64>(), rng.gen::<f64>(), rng.gen::<f64>());
    bounds.min * (DVec3::ONE - t) + bounds.max * t
}
