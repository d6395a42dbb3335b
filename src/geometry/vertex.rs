//! Interleaved GPU vertex format.

use super::mesh::MeshGeometry;

/// One interleaved vertex: position and normal, tightly packed for
/// upload with `bytemuck::cast_slice`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3D {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshGeometry {
    /// Zips the flat position and normal buffers into interleaved
    /// vertices. A mesh without normals interleaves zero vectors.
    pub fn interleaved(&self) -> Vec<Vertex3D> {
        (0..self.vertex_count())
            .map(|i| Vertex3D {
                position: [
                    self.vertices[i * 3],
                    self.vertices[i * 3 + 1],
                    self.vertices[i * 3 + 2],
                ],
                normal: if self.normals.len() == self.vertices.len() {
                    [
                        self.normals[i * 3],
                        self.normals[i * 3 + 1],
                        self.normals[i * 3 + 2],
                    ]
                } else {
                    [0.0; 3]
                },
            })
            .collect()
    }
}
