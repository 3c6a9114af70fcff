//! # Skeleton Nodes
//!
//! A node is an ellipsoidal cross-section placed along the body's medial
//! line. Neighbor links are indices into the owning [`SkeletonChain`].
//!
//! [`SkeletonChain`]: crate::SkeletonChain

use crate::error::{SkeletonError, SkeletonResult};
use config::constants::DEFAULT_NODE_RADIUS;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a node inside its chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    /// Wraps a raw arena index.
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw arena index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One oriented control point of the skeleton.
///
/// Orientation is not stored; it is derived from the neighbors by
/// [`SkeletonChain::frame`](crate::SkeletonChain::frame).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkeletonNode {
    position: DVec3,
    radius_x: f64,
    radius_y: f64,
    #[serde(default)]
    previous: Option<NodeId>,
    #[serde(default)]
    next: Option<NodeId>,
}

impl SkeletonNode {
    /// Creates an unlinked node.
    ///
    /// # Errors
    ///
    /// Fails when the position is not finite or either radius is not
    /// strictly positive and finite.
    pub fn new(position: DVec3, radius_x: f64, radius_y: f64) -> SkeletonResult<Self> {
        validate_position(position)?;
        validate_radii(radius_x, radius_y)?;
        Ok(Self {
            position,
            radius_x,
            radius_y,
            previous: None,
            next: None,
        })
    }

    /// Creates an unlinked node with the default cross-section.
    ///
    /// # Errors
    ///
    /// Fails when the position is not finite.
    pub fn at(position: DVec3) -> SkeletonResult<Self> {
        Self::new(position, DEFAULT_NODE_RADIUS, DEFAULT_NODE_RADIUS)
    }

    /// World-space position.
    #[inline]
    pub fn position(&self) -> DVec3 {
        self.position
    }

    /// Radius along the local right axis.
    #[inline]
    pub fn radius_x(&self) -> f64 {
        self.radius_x
    }

    /// Radius along the local up axis.
    #[inline]
    pub fn radius_y(&self) -> f64 {
        self.radius_y
    }

    /// Out-of-plane extent: the mean of the two cross-section radii.
    #[inline]
    pub fn radius_z(&self) -> f64 {
        (self.radius_x + self.radius_y) * 0.5
    }

    /// Previous neighbor, if any.
    #[inline]
    pub fn previous(&self) -> Option<NodeId> {
        self.previous
    }

    /// Next neighbor, if any.
    #[inline]
    pub fn next(&self) -> Option<NodeId> {
        self.next
    }

    pub(crate) fn set_position(&mut self, position: DVec3) -> SkeletonResult<()> {
        validate_position(position)?;
        self.position = position;
        Ok(())
    }

    pub(crate) fn set_radii(&mut self, radius_x: f64, radius_y: f64) -> SkeletonResult<()> {
        validate_radii(radius_x, radius_y)?;
        self.radius_x = radius_x;
        self.radius_y = radius_y;
        Ok(())
    }

    pub(crate) fn set_previous(&mut self, previous: Option<NodeId>) {
        self.previous = previous;
    }

    pub(crate) fn set_next(&mut self, next: Option<NodeId>) {
        self.next = next;
    }
}

pub(crate) fn validate_position(position: DVec3) -> SkeletonResult<()> {
    if position.is_finite() {
        Ok(())
    } else {
        Err(SkeletonError::InvalidPosition {
            x: position.x,
            y: position.y,
            z: position.z,
        })
    }
}

pub(crate) fn validate_radii(radius_x: f64, radius_y: f64) -> SkeletonResult<()> {
    let valid = |r: f64| r.is_finite() && r > 0.0;
    if valid(radius_x) && valid(radius_y) {
        Ok(())
    } else {
        Err(SkeletonError::InvalidRadius { radius_x, radius_y })
    }
}
