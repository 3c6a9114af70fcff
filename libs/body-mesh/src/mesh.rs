//! # Mesh Data Structure
//!
//! Triangle buffers handed to the rendering/collision collaborator.

use body_skeleton::Aabb;
use glam::DVec3;

/// A triangle mesh with vertices, indices and per-vertex normals.
///
/// Generated meshes never share vertices: corner `n` of triangle `t` is
/// vertex `3t + n` up to winding.
///
/// # Example
///
/// ```rust
/// use body_mesh::Mesh;
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// mesh.add_triangle(0, 1, 2);
/// mesh.compute_normals();
/// assert_eq!(mesh.normals().unwrap()[0], DVec3::Z);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions (f64 for precision)
    vertices: Vec<DVec3>,
    /// Triangle indices (3 indices per triangle)
    triangles: Vec<[u32; 3]>,
    /// Vertex normals, present once computed
    normals: Option<Vec<DVec3>>,
    /// Bounding box as of the last recalculation
    bounds: Aabb,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Adds a triangle by vertex indices.
    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) {
        self.triangles.push([v0, v1, v2]);
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns a reference to the triangles.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Returns the vertex at the given index.
    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        self.vertices[index as usize]
    }

    /// Returns the triangle at the given index.
    #[inline]
    pub fn triangle(&self, index: usize) -> [u32; 3] {
        self.triangles[index]
    }

    /// Corner positions of a triangle in winding order.
    pub fn triangle_positions(&self, index: usize) -> [DVec3; 3] {
        self.triangles[index].map(|v| self.vertex(v))
    }

    /// Returns the vertex normals.
    pub fn normals(&self) -> Option<&[DVec3]> {
        self.normals.as_deref()
    }

    /// Computes area-weighted vertex normals from the faces.
    ///
    /// Vertices of degenerate faces keep a zero normal.
    pub fn compute_normals(&mut self) {
        let mut normals = vec![DVec3::ZERO; self.vertices.len()];

        for tri in &self.triangles {
            let v0 = self.vertices[tri[0] as usize];
            let v1 = self.vertices[tri[1] as usize];
            let v2 = self.vertices[tri[2] as usize];

            let normal = (v1 - v0).cross(v2 - v0);

            normals[tri[0] as usize] += normal;
            normals[tri[1] as usize] += normal;
            normals[tri[2] as usize] += normal;
        }

        for normal in &mut normals {
            *normal = normal.normalize_or_zero();
        }

        self.normals = Some(normals);
    }

    /// Recomputes the bounding box from the vertices.
    ///
    /// An empty mesh gets a zero-size box at the origin.
    pub fn recalculate_bounds(&mut self) {
        self.bounds = Aabb::from_points(self.vertices.iter().copied()).unwrap_or_default();
    }

    /// Bounding box as of the last [`Mesh::recalculate_bounds`].
    #[inline]
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Checks that every triangle index refers to an existing vertex.
    ///
    /// Degenerate (zero-area) faces are allowed; the triangulator keeps
    /// whatever passes its filters.
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertices.len();
        let normals_match = self
            .normals
            .as_ref()
            .map_or(true, |normals| normals.len() == vertex_count);

        normals_match
            && self
                .triangles
                .iter()
                .all(|tri| tri.iter().all(|&v| (v as usize) < vertex_count))
    }

    /// Exports vertices as f32 array for GPU.
    ///
    /// Returns flattened [x, y, z, x, y, z, ...] array.
    pub fn vertices_f32(&self) -> Vec<f32> {
        flatten_f32(&self.vertices)
    }

    /// Exports triangle indices as u32 array for GPU.
    ///
    /// Returns flattened [i0, i1, i2, i0, i1, i2, ...] array.
    pub fn indices_u32(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }

    /// Exports normals as f32 array for GPU.
    pub fn normals_f32(&self) -> Option<Vec<f32>> {
        self.normals.as_deref().map(flatten_f32)
    }
}

fn flatten_f32(values: &[DVec3]) -> Vec<f32> {
    let mut result = Vec::with_capacity(values.len() * 3);
    for v in values {
        result.push(v.x as f32);
        result.push(v.y as f32);
        result.push(v.z as f32);
    }
    result
}
