//! # Body Mesh
//!
//! Procedural body surfaces from skeleton chains. A chain of oriented
//! elliptical cross-sections defines a density field; random samples are
//! projected onto one of its isosurfaces and the resulting point cloud is
//! triangulated.
//!
//! ## Architecture
//!
//! ```text
//! body-skeleton (SkeletonChain)
//!       ↓
//! DensityField → gradient
//!       ↓
//! sample_surface (Vec<SurfacePoint>)
//!       ↓
//! triangulate (Mesh)
//! ```
//!
//! ## Limitations
//!
//! The triangulator emits every triple passing its distance and density
//! filters. Meshes can therefore contain overlapping faces and holes and are
//! not guaranteed to be manifold.
//!
//! ## Usage
//!
//! ```rust
//! use body_mesh::{BodyGenerator, GeneratorConfig};
//! use body_skeleton::SkeletonChain;
//! use glam::DVec3;
//!
//! let mut chain = SkeletonChain::new();
//! chain.push_linked(DVec3::ZERO, 0.5, 0.5)?;
//! chain.push_linked(DVec3::new(2.0, 0.0, 0.0), 0.5, 0.5)?;
//!
//! let mut generator = BodyGenerator::new(GeneratorConfig {
//!     max_surface_samples: 200,
//!     ..GeneratorConfig::seeded(7)
//! });
//! let mesh = generator.generate(&chain);
//! assert!(mesh.validate());
//! # Ok::<(), body_skeleton::SkeletonError>(())
//! ```

pub mod config;
pub mod error;
pub mod field;
pub mod generator;
pub mod gradient;
pub mod mesh;
pub mod sampler;
pub mod spatial;
pub mod triangulate;

pub use config::{GeneratorConfig, NeighborSearch};
pub use error::ConfigError;
pub use field::{DensityField, ScalarField};
pub use generator::BodyGenerator;
pub use mesh::Mesh;
pub use sampler::{sample_surface, sampling_bounds, SurfacePoint};
pub use triangulate::triangulate;
