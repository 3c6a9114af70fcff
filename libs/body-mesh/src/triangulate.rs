//! # Point Cloud Triangulation
//!
//! Turns surface samples into triangles by testing point triples.
//!
//! ## Algorithm
//!
//! Every unordered triple `i < j < k` is a candidate. A candidate is kept
//! when all three edges are at most `max_triangulation_distance` long and
//! the field at its centroid is within [`CENTROID_TOLERANCE`] of the
//! threshold. Kept triangles are wound so their geometric normal agrees
//! with the field gradient at the centroid.
//!
//! Vertices are not shared between triangles, and nothing removes
//! overlapping or duplicate faces or fills holes: the output is exactly the
//! set of triples passing the local filters.
//!
//! With [`NeighborSearch::Grid`] only triples whose edges can pass the
//! distance filter are enumerated. They are visited in the same `(i, j, k)`
//! order as the exhaustive scan, so both strategies produce identical
//! meshes.

use crate::config::{GeneratorConfig, NeighborSearch};
use crate::field::ScalarField;
use crate::mesh::Mesh;
use crate::sampler::SurfacePoint;
use crate::spatial::PointGrid;
use config::constants::CENTROID_TOLERANCE;
use glam::DVec3;
use log::debug;

/// Candidate filters shared by both enumeration strategies.
struct TriangleFilter<'a, F: ?Sized> {
    field: &'a F,
    threshold: f64,
    max_edge_squared: f64,
}

impl<F: ScalarField + ?Sized> TriangleFilter<'_, F> {
    #[inline]
    fn edge_fits(&self, a: DVec3, b: DVec3) -> bool {
        (a - b).length_squared() <= self.max_edge_squared
    }

    /// Emits the triangle if its centroid lies close enough to the surface.
    fn try_emit(&self, mesh: &mut Mesh, a: DVec3, b: DVec3, c: DVec3) -> bool {
        let center = (a + b + c) / 3.0;
        if (self.field.density(center) - self.threshold).abs() > CENTROID_TOLERANCE {
            return false;
        }

        let normal = (b - a).cross(c - a).normalize_or_zero();
        let flip = normal.dot(self.field.gradient(center)) < 0.0;

        let base = mesh.add_vertex(a);
        mesh.add_vertex(b);
        mesh.add_vertex(c);
        if flip {
            mesh.add_triangle(base, base + 2, base + 1);
        } else {
            mesh.add_triangle(base, base + 1, base + 2);
        }
        true
    }
}

/// Triangulates surface samples against `field`.
///
/// Returns an empty mesh for fewer than three points. Otherwise per-vertex
/// normals and bounds are recomputed on the assembled mesh.
///
/// # Example
///
/// ```rust
/// use body_mesh::{triangulate, DensityField, GeneratorConfig};
/// use body_skeleton::SkeletonChain;
///
/// let chain = SkeletonChain::new();
/// let mesh = triangulate(&[], &DensityField::new(&chain), &GeneratorConfig::default());
/// assert!(mesh.is_empty());
/// assert_eq!(mesh.triangle_count(), 0);
/// ```
pub fn triangulate<F>(points: &[SurfacePoint], field: &F, config: &GeneratorConfig) -> Mesh
where
    F: ScalarField + ?Sized,
{
    if points.len() < 3 {
        return Mesh::new();
    }

    let filter = TriangleFilter {
        field,
        threshold: config.surface_threshold,
        max_edge_squared: config.max_triangulation_distance * config.max_triangulation_distance,
    };
    let mut mesh = Mesh::new();

    let candidates = match config.neighbor_search {
        NeighborSearch::BruteForce => triangulate_exhaustive(points, &filter, &mut mesh),
        NeighborSearch::Grid => {
            triangulate_with_grid(points, &filter, config.max_triangulation_distance, &mut mesh)
        }
    };

    mesh.compute_normals();
    mesh.recalculate_bounds();
    debug!(
        "triangulated {} points: {candidates} candidate triples, {} triangles",
        points.len(),
        mesh.triangle_count()
    );
    mesh
}

fn triangulate_exhaustive<F>(points: &[SurfacePoint], filter: &TriangleFilter<'_, F>, mesh: &mut Mesh) -> usize
where
    F: ScalarField + ?Sized,
{
    let count = points.len();
    let mut candidates = 0;
    for i in 0..count {
        for j in i + 1..count {
            for k in j + 1..count {
                let a = points[i].position;
                let b = points[j].position;
                let c = points[k].position;

                if !filter.edge_fits(a, b) || !filter.edge_fits(a, c) || !filter.edge_fits(b, c) {
                    continue;
                }
                candidates += 1;
                filter.try_emit(mesh, a, b, c);
            }
        }
    }
    candidates
}

fn triangulate_with_grid<F>(
    points: &[SurfacePoint],
    filter: &TriangleFilter<'_, F>,
    max_edge: f64,
    mesh: &mut Mesh,
) -> usize
where
    F: ScalarField + ?Sized,
{
    let grid = PointGrid::from_positions(max_edge, points.iter().map(|p| p.position));

    // Neighbors with a larger index, ascending, so triples come out in scan order
    let forward_neighbors: Vec<Vec<usize>> = points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let mut near: Vec<usize> = grid
                .candidates(p.position, max_edge)
                .into_iter()
                .filter(|&j| j > i && filter.edge_fits(p.position, points[j].position))
                .collect();
            near.sort_unstable();
            near
        })
        .collect();

    let mut candidates = 0;
    for (i, near) in forward_neighbors.iter().enumerate() {
        let a = points[i].position;
        for (offset, &j) in near.iter().enumerate() {
            let b = points[j].position;
            for &k in &near[offset + 1..] {
                let c = points[k].position;
                if !filter.edge_fits(b, c) {
                    continue;
                }
                candidates += 1;
                filter.try_emit(mesh, a, b, c);
            }
        }
    }
    candidates
}
