//! # Body Skeleton
//!
//! Skeleton chain model for the procedural body generator. A chain is an
//! ordered arena of oriented elliptical cross-sections; `body-mesh` turns it
//! into a density field and then into a triangle mesh.
//!
//! ## Architecture
//!
//! ```text
//! authoring surface → body-skeleton (SkeletonChain) → body-mesh (Mesh)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use body_skeleton::SkeletonChain;
//! use glam::DVec3;
//!
//! let mut chain = SkeletonChain::new();
//! let torso = chain.push_linked(DVec3::ZERO, 0.8, 0.6)?;
//! chain.push_linked(DVec3::new(0.0, 1.5, 0.0), 0.5, 0.5)?;
//!
//! let frame = chain.frame(torso)?;
//! assert!((frame.forward() - DVec3::Y).length() < 1e-12);
//! # Ok::<(), body_skeleton::SkeletonError>(())
//! ```

pub mod bounds;
pub mod chain;
pub mod error;
pub mod frame;
pub mod node;

pub use bounds::Aabb;
pub use chain::SkeletonChain;
pub use error::{SkeletonError, SkeletonResult};
pub use frame::Frame;
pub use node::{NodeId, SkeletonNode};
