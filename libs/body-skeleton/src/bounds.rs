//! # Axis-Aligned Bounds

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner
    pub min: DVec3,
    /// Maximum corner
    pub max: DVec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::from_point(DVec3::ZERO)
    }
}

impl Aabb {
    /// Creates a box from its corners.
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Creates a zero-size box at `point`.
    pub fn from_point(point: DVec3) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Creates a box with the given center and full size.
    pub fn from_center_size(center: DVec3, size: DVec3) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Smallest box containing every point, or `None` for no points.
    ///
    /// # Example
    ///
    /// ```rust
    /// use body_skeleton::Aabb;
    /// use glam::DVec3;
    ///
    /// let bounds = Aabb::from_points([DVec3::ZERO, DVec3::new(2.0, -1.0, 0.5)]).unwrap();
    /// assert_eq!(bounds.min, DVec3::new(0.0, -1.0, 0.0));
    /// assert_eq!(bounds.max, DVec3::new(2.0, 0.0, 0.5));
    /// ```
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = DVec3>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self::from_point(first);
        for point in iter {
            bounds.encapsulate(point);
        }
        Some(bounds)
    }

    /// Grows the box to contain `point`.
    pub fn encapsulate(&mut self, point: DVec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Grows the full size by `amount` along every axis (half on each side).
    pub fn expand(&mut self, amount: f64) {
        let half = DVec3::splat(amount * 0.5);
        self.min -= half;
        self.max += half;
    }

    /// Returns an expanded copy.
    #[must_use]
    pub fn expanded(mut self, amount: f64) -> Self {
        self.expand(amount);
        self
    }

    /// Center point.
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Full size along each axis.
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Whether `point` lies inside or on the boundary.
    pub fn contains(&self, point: DVec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}
