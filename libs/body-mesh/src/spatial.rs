//! # Spatial Hash Grid
//!
//! Uniform hash grid over point positions, used to answer "which points may
//! lie within `radius` of here" without scanning the whole cloud.
//!
//! Queries return a superset of the true neighbors; callers still apply
//! their exact distance predicate, so results match an exhaustive scan.
//!
//! ## Example
//!
//! ```rust
//! use body_mesh::spatial::PointGrid;
//! use glam::DVec3;
//!
//! let mut grid = PointGrid::new(0.5);
//! grid.insert(0, DVec3::ZERO);
//! grid.insert(1, DVec3::new(5.0, 0.0, 0.0));
//!
//! let near = grid.candidates(DVec3::new(0.1, 0.0, 0.0), 0.5);
//! assert_eq!(near, vec![0]);
//! ```

use config::constants::EPSILON;
use glam::DVec3;
use std::collections::HashMap;

/// 3D cell coordinate for spatial hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CellCoord {
    x: i64,
    y: i64,
    z: i64,
}

impl CellCoord {
    /// Creates a cell coordinate from 3D position.
    fn from_position(pos: DVec3, cell_size: f64) -> Self {
        Self {
            x: (pos.x / cell_size).floor() as i64,
            y: (pos.y / cell_size).floor() as i64,
            z: (pos.z / cell_size).floor() as i64,
        }
    }
}

/// Hash grid mapping cells to point indices.
#[derive(Debug, Clone)]
pub struct PointGrid {
    /// Hash grid: cell -> point indices
    cells: HashMap<CellCoord, Vec<usize>>,
    /// Cell size for hashing
    cell_size: f64,
    /// Total point count
    len: usize,
}

impl PointGrid {
    /// Creates an empty grid. Non-positive sizes are raised to a tiny
    /// positive value.
    pub fn new(cell_size: f64) -> Self {
        let cell_size = if cell_size.is_finite() {
            cell_size.max(EPSILON)
        } else {
            f64::MAX
        };
        Self {
            cells: HashMap::new(),
            cell_size,
            len: 0,
        }
    }

    /// Builds a grid over `positions`, indexed by slice position.
    pub fn from_positions<I>(cell_size: f64, positions: I) -> Self
    where
        I: IntoIterator<Item = DVec3>,
    {
        let mut grid = Self::new(cell_size);
        for (index, position) in positions.into_iter().enumerate() {
            grid.insert(index, position);
        }
        grid
    }

    /// Number of indexed points.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no point is indexed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Effective cell size.
    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Indexes a point.
    pub fn insert(&mut self, index: usize, position: DVec3) {
        let cell = CellCoord::from_position(position, self.cell_size);
        self.cells.entry(cell).or_default().push(index);
        self.len += 1;
    }

    /// Indices of every point in the cells overlapping the cube of
    /// half-size `radius` around `center`, in unspecified order.
    pub fn candidates(&self, center: DVec3, radius: f64) -> Vec<usize> {
        let mut result = Vec::new();
        self.any_candidate(center, radius, |index| {
            result.push(index);
            false
        });
        result
    }

    /// Whether any candidate within `radius` of `center` satisfies `predicate`.
    pub fn any_candidate<P>(&self, center: DVec3, radius: f64, mut predicate: P) -> bool
    where
        P: FnMut(usize) -> bool,
    {
        let reach = DVec3::splat(radius.max(0.0));
        let min = CellCoord::from_position(center - reach, self.cell_size);
        let max = CellCoord::from_position(center + reach, self.cell_size);

        for cx in min.x..=max.x {
            for cy in min.y..=max.y {
                for cz in min.z..=max.z {
                    if let Some(indices) = self.cells.get(&CellCoord { x: cx, y: cy, z: cz }) {
                        if indices.iter().any(|&index| predicate(index)) {
                            return true;
                        }
                    }
                }
            }
        }
        false
    }
}
