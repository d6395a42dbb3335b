//! Raw mesh buffers and normal reconstruction.

use crate::math::Vector3;

/// Flat vertex/index/normal/uv buffers for one mesh.
///
/// `vertices` holds 3 floats per vertex, `triangles` 3 indices per
/// triangle (every index a valid vertex index), `normals` 3 floats per
/// vertex once [`MeshGeometry::recompute_normals`] has run. `uvs` is
/// either empty, 2 floats per vertex for hand-built meshes, or 2 floats
/// per triangle corner when produced by the OBJ parser (see
/// [`crate::loader::obj`]).
///
/// Meshes are built once by a load or merge and treated as immutable
/// afterwards; the only mutable bit is the [`bound`](MeshGeometry::is_bound)
/// flag the renderer boundary uses to track GPU residency.
#[derive(Debug, Clone, Default)]
pub struct MeshGeometry {
    pub vertices: Vec<f32>,
    pub triangles: Vec<u32>,
    pub normals: Vec<f32>,
    pub uvs: Vec<f32>,
    bound: bool,
}

impl MeshGeometry {
    pub fn new(vertices: Vec<f32>, triangles: Vec<u32>) -> Self {
        Self {
            vertices,
            triangles,
            normals: Vec::new(),
            uvs: Vec::new(),
            bound: false,
        }
    }

    /// Number of vertices (positions, not floats).
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Position of vertex `i`.
    pub fn position(&self, i: usize) -> Vector3 {
        Vector3::new(
            self.vertices[i * 3],
            self.vertices[i * 3 + 1],
            self.vertices[i * 3 + 2],
        )
    }

    /// Rebuilds per-vertex normals from triangle winding.
    ///
    /// For each triangle `(p1, p2, p3)` the unnormalized face normal
    /// `(p2 - p1) x (p3 - p1)` is accumulated into all three vertices, so
    /// a vertex shared by several faces gets an area-weighted average.
    /// Accumulators are normalized at the end; a vertex no triangle
    /// touches keeps the zero vector instead of raising a division error.
    ///
    /// Convention: counter-clockwise winding viewed from outside yields
    /// outward normals. Renderers that cull clockwise-front instead want
    /// [`MeshGeometry::flip_normals`] after this.
    pub fn recompute_normals(&mut self) {
        self.normals.clear();
        self.normals.resize(self.vertices.len(), 0.0);
        for tri in self.triangles.chunks_exact(3) {
            let (i1, i2, i3) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let p1 = self.position(i1);
            let face = Vector3::cross(self.position(i2) - p1, self.position(i3) - p1);
            for &i in &[i1, i2, i3] {
                self.normals[i * 3] += face.x;
                self.normals[i * 3 + 1] += face.y;
                self.normals[i * 3 + 2] += face.z;
            }
        }
        for n in self.normals.chunks_exact_mut(3) {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            if len == 0.0 {
                continue;
            }
            let inv = 1.0 / len;
            n[0] *= inv;
            n[1] *= inv;
            n[2] *= inv;
        }
    }

    /// Negates every normal, switching between the counter-clockwise and
    /// clockwise front-face conventions.
    pub fn flip_normals(&mut self) {
        for n in &mut self.normals {
            *n = -*n;
        }
    }

    /// Whether the renderer has already bound this mesh to GPU resources.
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Marks the mesh as bound. Called by the render driver after a
    /// successful [`crate::render::RenderBackend::bind_mesh`].
    pub fn mark_bound(&mut self) {
        self.bound = true;
    }

    /// Clears the bound flag, e.g. after a GPU context loss.
    pub fn clear_binding(&mut self) {
        self.bound = false;
    }
}
