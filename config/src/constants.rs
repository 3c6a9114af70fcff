//! # Configuration Constants
//!
//! Centralized constants for the body generator. Default generator
//! parameters, numerical tolerances and skeleton defaults live here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Generator Defaults**: Externally settable sampling/meshing parameters
//! - **Field**: Density falloff and gradient estimation
//! - **Sampling**: Projection tolerance, bounds and attempt budget
//! - **Skeleton**: Node defaults and orientation fallback

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// Lengths below this are treated as zero, e.g. when a segment collapses to
/// a point or a direction cannot be normalized.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// let segment_length: f64 = 0.0;
/// assert!(segment_length < EPSILON);
/// ```
pub const EPSILON: f64 = 1e-10;

// =============================================================================
// GENERATOR DEFAULTS
// =============================================================================

/// Default target isovalue of the density field.
pub const DEFAULT_SURFACE_THRESHOLD: f64 = 0.5;

/// Default debug-visualization density.
///
/// Only used to size debug point markers; it has no effect on sampling.
pub const DEFAULT_SAMPLE_DENSITY: f64 = 0.2;

/// Default upper bound on accepted surface samples.
///
/// Triangulation enumerates point triples, so this value bounds the cost of
/// the whole pipeline.
pub const DEFAULT_MAX_SURFACE_SAMPLES: usize = 3000;

/// Default number of projection iterations per random candidate.
pub const DEFAULT_PROJECTION_STEPS: u32 = 8;

/// Default scale applied to each projection step.
pub const DEFAULT_PROJECTION_STEP_SIZE: f64 = 0.1;

/// Default minimum spacing between accepted surface samples.
pub const DEFAULT_MIN_DISTANCE_BETWEEN_POINTS: f64 = 0.1;

/// Default maximum edge length of an emitted triangle.
pub const DEFAULT_MAX_TRIANGULATION_DISTANCE: f64 = 0.5;

/// Generators regenerate on `regenerate()` calls unless told otherwise.
pub const DEFAULT_AUTO_UPDATE: bool = true;

// =============================================================================
// FIELD CONSTANTS
// =============================================================================

/// Gain of the exponential falloff `exp(-k * d^2)`.
///
/// # Example
///
/// ```rust
/// use config::constants::DENSITY_FALLOFF;
///
/// // Density one normalized radius away from a node center
/// let density = (-DENSITY_FALLOFF).exp();
/// assert!((density - 0.0183).abs() < 1e-4);
/// ```
pub const DENSITY_FALLOFF: f64 = 4.0;

/// Step used by the central finite-difference gradient estimate.
pub const GRADIENT_EPSILON: f64 = 0.01;

// =============================================================================
// SAMPLING CONSTANTS
// =============================================================================

/// A projected candidate is on the surface once `|density - threshold|`
/// drops below this value.
pub const PROJECTION_TOLERANCE: f64 = 0.02;

/// A candidate triangle is kept when its centroid density is within this
/// distance of the threshold.
pub const CENTROID_TOLERANCE: f64 = 0.05;

/// Growth of the sampling box size around the skeleton nodes.
///
/// The box grows by this amount along each axis, i.e. by half of it on each
/// side.
pub const BOUNDS_EXPANSION: f64 = 2.0;

/// Edge length of the fallback sampling box used for an empty skeleton.
pub const EMPTY_BOUNDS_SIZE: f64 = 1.0;

/// Random candidates drawn per requested sample before sampling gives up.
///
/// # Example
///
/// ```rust
/// use config::constants::{ATTEMPT_BUDGET_FACTOR, DEFAULT_MAX_SURFACE_SAMPLES};
///
/// let budget = DEFAULT_MAX_SURFACE_SAMPLES * ATTEMPT_BUDGET_FACTOR;
/// assert_eq!(budget, 30_000);
/// ```
pub const ATTEMPT_BUDGET_FACTOR: usize = 10;

// =============================================================================
// SKELETON CONSTANTS
// =============================================================================

/// Default cross-section radius of a freshly authored skeleton node.
pub const DEFAULT_NODE_RADIUS: f64 = 0.5;

/// When `|forward · up|` exceeds this, the world-up hint is replaced by the
/// world-right axis before building a frame.
pub const UP_PARALLEL_THRESHOLD: f64 = 0.99;

/// Segment count of the cross-section outline drawn around each node.
pub const CROSS_SECTION_SEGMENTS: u32 = 32;

/// Debug marker radius is `sample_density * DEBUG_POINT_SCALE`.
pub const DEBUG_POINT_SCALE: f64 = 0.2;
