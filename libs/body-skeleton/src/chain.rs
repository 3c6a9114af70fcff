//! # Skeleton Chain
//!
//! Owned arena of [`SkeletonNode`]s. Links are stored as [`NodeId`]s so
//! neighbor lookup is O(1) without shared ownership. The chain is authored
//! externally; the meshing side only reads it.
//!
//! ## Invariants
//!
//! - Every node has strictly positive, finite radii and a finite position
//! - Every link refers to a node of the same chain, never to itself
//! - Following `next` links never revisits a node (open chain)

use crate::bounds::Aabb;
use crate::error::{SkeletonError, SkeletonResult};
use crate::frame::{Frame, DEFAULT_FORWARD};
use crate::node::{validate_position, NodeId, SkeletonNode};
use config::constants::CROSS_SECTION_SEGMENTS;
use glam::{DQuat, DVec3};
use log::trace;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Ordered list of skeleton nodes.
///
/// # Example
///
/// ```rust
/// use body_skeleton::SkeletonChain;
/// use glam::DVec3;
///
/// let mut chain = SkeletonChain::new();
/// let head = chain.push_linked(DVec3::ZERO, 0.5, 0.5).unwrap();
/// let tail = chain.push_linked(DVec3::new(2.0, 0.0, 0.0), 0.5, 0.5).unwrap();
///
/// assert_eq!(chain.node(head).unwrap().next(), Some(tail));
/// assert_eq!(chain.forward(head).unwrap(), DVec3::X);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ChainRecord")]
pub struct SkeletonChain {
    origin: DVec3,
    nodes: Vec<SkeletonNode>,
}

/// Unvalidated serialized form of a chain.
#[derive(Deserialize)]
struct ChainRecord {
    #[serde(default)]
    origin: DVec3,
    #[serde(default)]
    nodes: Vec<SkeletonNode>,
}

impl TryFrom<ChainRecord> for SkeletonChain {
    type Error = SkeletonError;

    fn try_from(record: ChainRecord) -> SkeletonResult<Self> {
        let chain = Self {
            origin: record.origin,
            nodes: record.nodes,
        };
        chain.validate()?;
        Ok(chain)
    }
}

impl SkeletonChain {
    /// Creates an empty chain at the world origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty chain owned by an object at `origin`.
    ///
    /// The origin only matters for an empty chain, whose sampling domain is
    /// a unit box centered there.
    ///
    /// # Errors
    ///
    /// Fails when `origin` is not finite.
    pub fn with_origin(origin: DVec3) -> SkeletonResult<Self> {
        validate_position(origin)?;
        Ok(Self {
            origin,
            nodes: Vec::new(),
        })
    }

    /// Position of the owning object.
    #[inline]
    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the chain has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in authoring order.
    #[inline]
    pub fn nodes(&self) -> &[SkeletonNode] {
        &self.nodes
    }

    /// Node ids in authoring order.
    pub fn iter_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId::new)
    }

    /// Looks up a node.
    ///
    /// # Errors
    ///
    /// Fails when `id` is out of range.
    pub fn node(&self, id: NodeId) -> SkeletonResult<&SkeletonNode> {
        self.nodes.get(id.index()).ok_or(SkeletonError::UnknownNode {
            id: id.index(),
            len: self.nodes.len(),
        })
    }

    fn node_mut(&mut self, id: NodeId) -> SkeletonResult<&mut SkeletonNode> {
        let len = self.nodes.len();
        self.nodes
            .get_mut(id.index())
            .ok_or(SkeletonError::UnknownNode { id: id.index(), len })
    }

    /// Nodes without a previous neighbor, i.e. the start of each run.
    pub fn heads(&self) -> Vec<NodeId> {
        self.iter_ids()
            .filter(|&id| self.nodes[id.index()].previous().is_none())
            .collect()
    }

    // =========================================================================
    // EDITING
    // =========================================================================

    /// Appends an unlinked node.
    ///
    /// # Errors
    ///
    /// Fails on a non-finite position or non-positive radii.
    pub fn add_node(&mut self, position: DVec3, radius_x: f64, radius_y: f64) -> SkeletonResult<NodeId> {
        let node = SkeletonNode::new(position, radius_x, radius_y)?;
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        trace!("added skeleton node {id} at {position}");
        Ok(id)
    }

    /// Appends a node and links the previously last node to it.
    ///
    /// # Errors
    ///
    /// Fails on a non-finite position or non-positive radii.
    pub fn push_linked(&mut self, position: DVec3, radius_x: f64, radius_y: f64) -> SkeletonResult<NodeId> {
        let tail = self.nodes.len().checked_sub(1).map(NodeId::new);
        let id = self.add_node(position, radius_x, radius_y)?;
        if let Some(tail) = tail {
            self.link(tail, id)?;
        }
        Ok(id)
    }

    /// Makes `to` the next neighbor of `from` and `from` the previous
    /// neighbor of `to`, detaching whatever they were linked to before.
    ///
    /// # Errors
    ///
    /// Fails for unknown ids, self links, or a link that would close a loop.
    pub fn link(&mut self, from: NodeId, to: NodeId) -> SkeletonResult<()> {
        self.node(from)?;
        self.node(to)?;
        if from == to {
            return Err(SkeletonError::SelfLink { id: from.index() });
        }
        if self.reaches(to, from) {
            return Err(SkeletonError::CycleDetected {
                from: from.index(),
                to: to.index(),
            });
        }

        if let Some(old_next) = self.nodes[from.index()].next() {
            if self.nodes[old_next.index()].previous() == Some(from) {
                self.nodes[old_next.index()].set_previous(None);
            }
        }
        if let Some(old_previous) = self.nodes[to.index()].previous() {
            if self.nodes[old_previous.index()].next() == Some(to) {
                self.nodes[old_previous.index()].set_next(None);
            }
        }

        self.nodes[from.index()].set_next(Some(to));
        self.nodes[to.index()].set_previous(Some(from));
        trace!("linked skeleton node {from} -> {to}");
        Ok(())
    }

    /// Removes the `next` link of `id` (and the matching back link).
    ///
    /// # Errors
    ///
    /// Fails when `id` is out of range.
    pub fn unlink_next(&mut self, id: NodeId) -> SkeletonResult<()> {
        let next = self.node(id)?.next();
        if let Some(next) = next {
            if self.nodes[next.index()].previous() == Some(id) {
                self.nodes[next.index()].set_previous(None);
            }
            self.nodes[id.index()].set_next(None);
            trace!("unlinked skeleton node {id} -> {next}");
        }
        Ok(())
    }

    /// Moves a node.
    ///
    /// # Errors
    ///
    /// Fails for an unknown id or a non-finite position.
    pub fn set_position(&mut self, id: NodeId, position: DVec3) -> SkeletonResult<()> {
        self.node_mut(id)?.set_position(position)
    }

    /// Changes a node's cross-section radii.
    ///
    /// # Errors
    ///
    /// Fails for an unknown id or non-positive radii.
    pub fn set_radii(&mut self, id: NodeId, radius_x: f64, radius_y: f64) -> SkeletonResult<()> {
        self.node_mut(id)?.set_radii(radius_x, radius_y)
    }

    /// Whether following `next` links from `start` arrives at `target`.
    fn reaches(&self, start: NodeId, target: NodeId) -> bool {
        let mut current = Some(start);
        let mut steps = 0;
        while let Some(id) = current {
            if id == target {
                return true;
            }
            // Bounded walk; a valid chain never needs more than len steps
            steps += 1;
            if steps > self.nodes.len() {
                return true;
            }
            current = self.nodes.get(id.index()).and_then(SkeletonNode::next);
        }
        false
    }

    /// Checks every chain invariant.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> SkeletonResult<()> {
        validate_position(self.origin)?;
        let len = self.nodes.len();
        for (index, node) in self.nodes.iter().enumerate() {
            SkeletonNode::new(node.position(), node.radius_x(), node.radius_y())?;
            for link in [node.previous(), node.next()].into_iter().flatten() {
                if link.index() >= len {
                    return Err(SkeletonError::UnknownNode { id: link.index(), len });
                }
                if link.index() == index {
                    return Err(SkeletonError::SelfLink { id: index });
                }
            }
            if let Some(next) = node.next() {
                if self.reaches(next, NodeId::new(index)) {
                    return Err(SkeletonError::CycleDetected {
                        from: index,
                        to: next.index(),
                    });
                }
            }
        }
        Ok(())
    }

    // =========================================================================
    // ORIENTATION
    // =========================================================================

    /// Forward axis of a node, derived from its neighbors.
    ///
    /// Both neighbors: from previous to next. One neighbor: toward next or
    /// away from previous. None: [`DEFAULT_FORWARD`].
    ///
    /// # Errors
    ///
    /// Fails when `id` is out of range.
    pub fn forward(&self, id: NodeId) -> SkeletonResult<DVec3> {
        let node = self.node(id)?;
        let position_of = |link: NodeId| self.nodes[link.index()].position();
        let direction = match (node.previous(), node.next()) {
            (Some(previous), Some(next)) => position_of(next) - position_of(previous),
            (None, Some(next)) => position_of(next) - node.position(),
            (Some(previous), None) => node.position() - position_of(previous),
            (None, None) => DEFAULT_FORWARD,
        };
        Ok(direction.normalize_or_zero())
    }

    /// Orthonormal frame of a node.
    ///
    /// # Errors
    ///
    /// Fails when `id` is out of range.
    pub fn frame(&self, id: NodeId) -> SkeletonResult<Frame> {
        Ok(Frame::from_forward(self.forward(id)?))
    }

    /// Orientation of a node as a rotation from world axes.
    ///
    /// # Errors
    ///
    /// Fails when `id` is out of range.
    pub fn orientation(&self, id: NodeId) -> SkeletonResult<DQuat> {
        Ok(self.frame(id)?.orientation())
    }

    /// World-space outline of a node's elliptical cross-section.
    ///
    /// Returns `segments` points starting on the local right axis, with
    /// `radius_x` along right and `radius_y` along up.
    ///
    /// # Errors
    ///
    /// Fails for an unknown id or fewer than 3 segments.
    pub fn cross_section_ring(&self, id: NodeId, segments: u32) -> SkeletonResult<Vec<DVec3>> {
        if segments < 3 {
            return Err(SkeletonError::InvalidSegments(segments));
        }
        let node = self.node(id)?;
        let frame = self.frame(id)?;

        let ring = (0..segments)
            .map(|i| {
                let angle = TAU * f64::from(i) / f64::from(segments);
                let local = DVec3::new(
                    angle.cos() * node.radius_x(),
                    angle.sin() * node.radius_y(),
                    0.0,
                );
                node.position() + frame.to_world(local)
            })
            .collect();
        Ok(ring)
    }

    /// [`SkeletonChain::cross_section_ring`] with the editor's default of
    /// [`CROSS_SECTION_SEGMENTS`] points.
    ///
    /// # Errors
    ///
    /// Fails when `id` is out of range.
    pub fn default_cross_section_ring(&self, id: NodeId) -> SkeletonResult<Vec<DVec3>> {
        self.cross_section_ring(id, CROSS_SECTION_SEGMENTS)
    }

    /// Box enclosing every node position, or `None` for an empty chain.
    pub fn node_bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.nodes.iter().map(SkeletonNode::position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn three_node_chain() -> (SkeletonChain, [NodeId; 3]) {
        let mut chain = SkeletonChain::new();
        let a = chain.push_linked(DVec3::ZERO, 0.5, 0.5).unwrap();
        let b = chain.push_linked(DVec3::new(1.0, 0.0, 0.0), 0.4, 0.6).unwrap();
        let c = chain.push_linked(DVec3::new(1.0, 1.0, 0.0), 0.3, 0.3).unwrap();
        (chain, [a, b, c])
    }

    #[test]
    fn test_push_linked_links_both_ways() {
        let (chain, [a, b, c]) = three_node_chain();
        assert_eq!(chain.node(a).unwrap().next(), Some(b));
        assert_eq!(chain.node(b).unwrap().previous(), Some(a));
        assert_eq!(chain.node(b).unwrap().next(), Some(c));
        assert_eq!(chain.node(c).unwrap().previous(), Some(b));
        assert_eq!(chain.heads(), vec![a]);
    }

    #[test]
    fn test_forward_rules() {
        let (chain, [a, b, c]) = three_node_chain();
        // Head: toward next
        assert_eq!(chain.forward(a).unwrap(), DVec3::X);
        // Middle: previous to next
        let mid = chain.forward(b).unwrap();
        assert_relative_eq!(mid.x, 1.0 / 2f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(mid.y, 1.0 / 2f64.sqrt(), epsilon = 1e-12);
        // Tail: away from previous
        assert_eq!(chain.forward(c).unwrap(), DVec3::Y);
    }

    #[test]
    fn test_isolated_node_uses_default_axis() {
        let mut chain = SkeletonChain::new();
        let id = chain.add_node(DVec3::new(3.0, 0.0, 0.0), 1.0, 1.0).unwrap();
        assert_eq!(chain.forward(id).unwrap(), DEFAULT_FORWARD);
        assert_eq!(chain.frame(id).unwrap(), Frame::default());
    }

    #[test]
    fn test_link_rejects_self() {
        let mut chain = SkeletonChain::new();
        let a = chain.add_node(DVec3::ZERO, 1.0, 1.0).unwrap();
        assert_eq!(chain.link(a, a), Err(SkeletonError::SelfLink { id: 0 }));
    }

    #[test]
    fn test_link_rejects_cycle() {
        let (mut chain, [a, _, c]) = three_node_chain();
        let err = chain.link(c, a).unwrap_err();
        assert_eq!(err, SkeletonError::CycleDetected { from: 2, to: 0 });
    }

    #[test]
    fn test_link_rejects_unknown() {
        let mut chain = SkeletonChain::new();
        let a = chain.add_node(DVec3::ZERO, 1.0, 1.0).unwrap();
        let err = chain.link(a, NodeId::new(9)).unwrap_err();
        assert_eq!(err, SkeletonError::UnknownNode { id: 9, len: 1 });
    }

    #[test]
    fn test_relink_detaches_old_neighbors() {
        let (mut chain, [a, b, c]) = three_node_chain();
        chain.link(a, c).unwrap();
        assert_eq!(chain.node(a).unwrap().next(), Some(c));
        assert_eq!(chain.node(c).unwrap().previous(), Some(a));
        assert_eq!(chain.node(b).unwrap().previous(), None);
        assert_eq!(chain.node(b).unwrap().next(), None);
        assert!(chain.validate().is_ok());
    }

    #[test]
    fn test_unlink_next() {
        let (mut chain, [a, b, _]) = three_node_chain();
        chain.unlink_next(a).unwrap();
        assert_eq!(chain.node(a).unwrap().next(), None);
        assert_eq!(chain.node(b).unwrap().previous(), None);
        assert_eq!(chain.heads(), vec![a, b]);
    }

    #[test]
    fn test_set_radii_validates() {
        let (mut chain, [a, _, _]) = three_node_chain();
        assert!(chain.set_radii(a, -1.0, 1.0).is_err());
        chain.set_radii(a, 2.0, 3.0).unwrap();
        assert_eq!(chain.node(a).unwrap().radius_x(), 2.0);
        assert_eq!(chain.node(a).unwrap().radius_y(), 3.0);
    }

    #[test]
    fn test_set_position_updates_orientation() {
        let (mut chain, [a, b, _]) = three_node_chain();
        chain.set_position(b, DVec3::new(0.0, 0.0, 2.0)).unwrap();
        assert_eq!(chain.forward(a).unwrap(), DVec3::Z);
    }

    #[test]
    fn test_cross_section_ring() {
        let mut chain = SkeletonChain::new();
        let id = chain.add_node(DVec3::new(0.0, 0.0, 1.0), 2.0, 1.0).unwrap();
        let ring = chain.cross_section_ring(id, 4).unwrap();
        assert_eq!(ring.len(), 4);
        assert_relative_eq!(ring[0].x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(ring[1].y, 1.0, epsilon = 1e-12);
        for point in &ring {
            assert_relative_eq!(point.z, 1.0, epsilon = 1e-12);
        }
        assert_eq!(
            chain.cross_section_ring(id, 2),
            Err(SkeletonError::InvalidSegments(2))
        );
    }

    #[test]
    fn test_default_cross_section_ring() {
        let (chain, [_, b, _]) = three_node_chain();
        let ring = chain.default_cross_section_ring(b).unwrap();
        assert_eq!(ring.len(), CROSS_SECTION_SEGMENTS as usize);
        assert_eq!(ring, chain.cross_section_ring(b, 32).unwrap());

        // Every outline point lies in the node's cross-section plane
        let node = chain.node(b).unwrap();
        let forward = chain.forward(b).unwrap();
        for point in &ring {
            assert_relative_eq!((*point - node.position()).dot(forward), 0.0, epsilon = 1e-12);
        }
        assert!(chain.default_cross_section_ring(NodeId::new(7)).is_err());
    }

    #[test]
    fn test_node_bounds() {
        let (chain, _) = three_node_chain();
        let bounds = chain.node_bounds().unwrap();
        assert_eq!(bounds.min, DVec3::ZERO);
        assert_eq!(bounds.max, DVec3::new(1.0, 1.0, 0.0));
        assert!(SkeletonChain::new().node_bounds().is_none());
    }
}
