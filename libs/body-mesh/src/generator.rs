//! # Body Generator
//!
//! Owns the point cloud and the output mesh and runs the pipeline
//! `chain → samples → mesh`. Each run rebuilds both from scratch and swaps
//! them in only once complete.
//!
//! Everything runs on the calling thread. The chain is borrowed for the
//! duration of a run, so it cannot be edited while the mesh is built.

use crate::config::GeneratorConfig;
use crate::field::DensityField;
use crate::mesh::Mesh;
use crate::sampler::{sample_surface, sampling_bounds, SurfacePoint};
use crate::triangulate::triangulate;
use body_skeleton::SkeletonChain;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Procedural body surface generator.
///
/// # Example
///
/// ```rust
/// use body_mesh::{BodyGenerator, GeneratorConfig};
/// use body_skeleton::SkeletonChain;
/// use glam::DVec3;
///
/// let mut chain = SkeletonChain::new();
/// chain.add_node(DVec3::ZERO, 1.0, 1.0).unwrap();
///
/// let config = GeneratorConfig {
///     max_surface_samples: 60,
///     min_distance_between_points: 0.3,
///     ..GeneratorConfig::seeded(42)
/// };
/// let mut generator = BodyGenerator::new(config);
/// generator.generate(&chain);
///
/// assert!(!generator.points().is_empty());
/// assert!(generator.mesh().is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct BodyGenerator {
    config: GeneratorConfig,
    points: Vec<SurfacePoint>,
    mesh: Option<Mesh>,
}

impl BodyGenerator {
    /// Creates a generator; the configuration is sanitized by clamping.
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config: config.clamped(),
            points: Vec::new(),
            mesh: None,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Replaces the configuration. Existing output is kept until the next run.
    pub fn set_config(&mut self, config: GeneratorConfig) {
        self.config = config.clamped();
    }

    /// Surface samples of the last run, for debug visualization.
    pub fn points(&self) -> &[SurfacePoint] {
        &self.points
    }

    /// Mesh of the last run, if any.
    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    /// Rebuilds points and mesh from `chain`.
    ///
    /// Sampling uses the configured seed, or the thread RNG when unset.
    pub fn generate(&mut self, chain: &SkeletonChain) -> &Mesh {
        let mut rng: Box<dyn RngCore> = match self.config.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(rand::thread_rng()),
        };
        self.generate_with_rng(chain, &mut *rng)
    }

    /// Rebuilds points and mesh from `chain` drawing samples from `rng`.
    pub fn generate_with_rng<R>(&mut self, chain: &SkeletonChain, rng: &mut R) -> &Mesh
    where
        R: Rng + ?Sized,
    {
        let field = DensityField::new(chain);
        let bounds = sampling_bounds(chain);
        debug!("generating body for {} skeleton nodes", chain.len());

        let points = sample_surface(&field, &bounds, &self.config, rng);
        let mesh = triangulate(&points, &field, &self.config);
        info!(
            "installed body mesh: {} points, {} vertices, {} triangles",
            points.len(),
            mesh.vertex_count(),
            mesh.triangle_count()
        );

        self.points = points;
        self.mesh.insert(mesh)
    }

    /// Regenerates after an authoring edit when `auto_update` is enabled.
    ///
    /// Returns whether a new mesh was built.
    pub fn regenerate(&mut self, chain: &SkeletonChain) -> bool {
        if !self.config.auto_update {
            return false;
        }
        self.generate(chain);
        true
    }

    /// Drops the point cloud, keeping the mesh.
    pub fn clear_points(&mut self) {
        self.points.clear();
    }

    /// Drops the mesh, keeping the point cloud.
    pub fn clear_mesh(&mut self) {
        self.mesh = None;
    }

    /// Drops both outputs.
    pub fn clear_all(&mut self) {
        self.clear_mesh();
        self.clear_points();
    }
}
