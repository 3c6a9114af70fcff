//! # Skeleton Errors
//!
//! Error types for skeleton chain editing.

use thiserror::Error;

/// Result alias for skeleton operations.
pub type SkeletonResult<T> = Result<T, SkeletonError>;

/// Errors that can occur while building or editing a skeleton chain.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SkeletonError {
    /// Cross-section radii must be strictly positive and finite.
    #[error("Invalid radii: ({radius_x}, {radius_y}) must be positive and finite")]
    InvalidRadius {
        /// Requested radius along the local right axis
        radius_x: f64,
        /// Requested radius along the local up axis
        radius_y: f64,
    },

    /// Node positions must be finite.
    #[error("Invalid position: [{x}, {y}, {z}] is not finite")]
    InvalidPosition {
        /// X coordinate
        x: f64,
        /// Y coordinate
        y: f64,
        /// Z coordinate
        z: f64,
    },

    /// A node id does not refer to a node of this chain.
    #[error("Unknown node {id} (chain has {len} nodes)")]
    UnknownNode {
        /// Offending index
        id: usize,
        /// Number of nodes in the chain
        len: usize,
    },

    /// A node cannot be its own neighbor.
    #[error("Node {id} cannot be linked to itself")]
    SelfLink {
        /// Offending index
        id: usize,
    },

    /// Linking these nodes would close a loop.
    #[error("Linking node {from} to node {to} would create a cycle")]
    CycleDetected {
        /// Node whose `next` would be set
        from: usize,
        /// Node that would become `next`
        to: usize,
    },

    /// Outline requests need at least a triangle.
    #[error("Cross-section outline needs at least 3 segments, got {0}")]
    InvalidSegments(u32),
}
