//! Merging meshes into shared buffers.

use super::mesh::MeshGeometry;

/// Concatenates `meshes` into a single shared-buffer mesh.
///
/// Vertex, normal, and uv buffers are appended in input order; each
/// mesh's triangle indices are offset by the cumulative vertex count of
/// the meshes before it, so the merged mesh renders exactly like drawing
/// every input separately at identity transform. Winding and per-mesh
/// vertex order are preserved; coincident vertices across inputs are not
/// deduplicated. Merging an empty slice yields an empty mesh.
pub fn merge(meshes: &[MeshGeometry]) -> MeshGeometry {
    let mut merged = MeshGeometry::new(
        Vec::with_capacity(meshes.iter().map(|m| m.vertices.len()).sum()),
        Vec::with_capacity(meshes.iter().map(|m| m.triangles.len()).sum()),
    );
    merged.normals = Vec::with_capacity(meshes.iter().map(|m| m.normals.len()).sum());
    merged.uvs = Vec::with_capacity(meshes.iter().map(|m| m.uvs.len()).sum());

    let mut vertex_offset = 0u32;
    for mesh in meshes {
        merged.vertices.extend_from_slice(&mesh.vertices);
        merged.normals.extend_from_slice(&mesh.normals);
        merged.uvs.extend_from_slice(&mesh.uvs);
        merged
            .triangles
            .extend(mesh.triangles.iter().map(|&i| i + vertex_offset));
        vertex_offset += mesh.vertex_count() as u32;
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_mesh() -> MeshGeometry {
        let mut m = MeshGeometry::new(
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            vec![0, 1, 2],
        );
        m.recompute_normals();
        m
    }

    #[test]
    fn test_merge_offsets_indices_by_cumulative_vertex_count() {
        let merged = merge(&[triangle_mesh(), triangle_mesh()]);
        assert_eq!(merged.vertex_count(), 6);
        assert_eq!(merged.triangles, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(merged.normals.len(), merged.vertices.len());
    }

    #[test]
    fn test_merge_preserves_input_order_and_winding() {
        let mut second = triangle_mesh();
        second.vertices[0] = 9.0;
        let merged = merge(&[triangle_mesh(), second]);
        // First mesh untouched at the front, second appended after.
        assert_eq!(merged.vertices[0], 0.0);
        assert_eq!(merged.vertices[9], 9.0);
        assert_eq!(&merged.triangles[3..6], &[3, 4, 5]);
    }

    #[test]
    fn test_merge_of_three_meshes_accumulates_offsets() {
        let merged = merge(&[triangle_mesh(), triangle_mesh(), triangle_mesh()]);
        assert_eq!(merged.triangles, vec![0, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(merged.triangle_count(), 3);
    }

    #[test]
    fn test_merge_nothing_is_empty() {
        let merged = merge(&[]);
        assert_eq!(merged.vertex_count(), 0);
        assert_eq!(merged.triangle_count(), 0);
    }
}
