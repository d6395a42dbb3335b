//! Wavefront OBJ subset parser.
//!
//! Supported line prefixes are `v ` (position), `vt` (texture
//! coordinate), and `f ` (face); everything else is ignored silently.
//! Malformed lines are never fatal: they are logged through [`log::warn`]
//! and skipped, and parsing always produces a mesh from whatever was
//! usable.

use log::warn;

use crate::geometry::MeshGeometry;

/// Parses OBJ `text` into a [`MeshGeometry`] with reconstructed normals.
///
/// Face indices are 1-based in the source format and converted to
/// 0-based. Quads are fan-triangulated around their first corner; faces
/// with fewer than 3 or more than 4 corners are logged and skipped.
///
/// The uv channel of the result is per-triangle-corner (two floats per
/// emitted index, parallel to `triangles`), because one vertex position
/// may carry different texture coordinates per face corner. If any face
/// corner lacks a resolvable uv index the whole channel is dropped with a
/// warning, keeping it parallel or absent but never ragged.
pub fn parse_obj(text: &str) -> MeshGeometry {
    let mut vertices: Vec<f32> = Vec::new();
    let mut triangles: Vec<u32> = Vec::new();
    let mut uv_table: Vec<[f32; 2]> = Vec::new();
    let mut corner_uvs: Vec<f32> = Vec::new();
    let mut uvs_complete = true;

    for (idx, line) in text.lines().enumerate() {
        let lineno = idx + 1;
        if line.starts_with("v ") {
            let coords: Vec<f32> = line[2..]
                .split_whitespace()
                .take(3)
                .filter_map(|t| t.parse().ok())
                .collect();
            if coords.len() < 3 {
                warn!("line {}: vertex with fewer than 3 coordinates, skipping", lineno);
                continue;
            }
            vertices.extend_from_slice(&coords);
        } else if line.starts_with("vt") {
            let coords: Vec<f32> = line[2..]
                .split_whitespace()
                .filter_map(|t| t.parse().ok())
                .collect();
            if coords.len() < 2 {
                warn!("line {}: texture coordinate with fewer than 2 components, skipping", lineno);
                continue;
            }
            if coords.len() > 2 {
                warn!("line {}: texture coordinate with >2 components, keeping the first two", lineno);
            }
            uv_table.push([coords[0], coords[1]]);
        } else if line.starts_with("f ") {
            parse_face(
                &line[2..],
                lineno,
                vertices.len() / 3,
                &uv_table,
                &mut triangles,
                &mut corner_uvs,
                &mut uvs_complete,
            );
        }
    }

    if !uvs_complete && !corner_uvs.is_empty() {
        warn!("dropping uv channel: not every face corner resolved a texture coordinate");
    }

    let mut mesh = MeshGeometry::new(vertices, triangles);
    if uvs_complete {
        mesh.uvs = corner_uvs;
    }
    mesh.recompute_normals();
    mesh
}

// One corner of a face line: `vertex[/uv[/normal]]`, 1-based.
fn parse_corner(token: &str, vertex_count: usize, lineno: usize) -> Option<(u32, Option<usize>)> {
    let mut parts = token.split('/');
    let vertex: usize = match parts.next().and_then(|t| t.parse().ok()) {
        Some(v) if v >= 1 && v <= vertex_count => v,
        _ => {
            warn!("line {}: face references vertex {:?} out of range, skipping face", lineno, token);
            return None;
        }
    };
    let uv = parts
        .next()
        .filter(|t| !t.is_empty())
        .and_then(|t| t.parse::<usize>().ok())
        .filter(|&t| t >= 1)
        .map(|t| t - 1);
    Some(((vertex - 1) as u32, uv))
}

fn parse_face(
    body: &str,
    lineno: usize,
    vertex_count: usize,
    uv_table: &[[f32; 2]],
    triangles: &mut Vec<u32>,
    corner_uvs: &mut Vec<f32>,
    uvs_complete: &mut bool,
) {
    let tokens: Vec<&str> = body.split_whitespace().collect();
    if tokens.len() < 3 || tokens.len() > 4 {
        warn!("line {}: face with {} corners, skipping", lineno, tokens.len());
        return;
    }

    let mut corners = Vec::with_capacity(tokens.len());
    for &token in &tokens {
        match parse_corner(token, vertex_count, lineno) {
            Some(c) => corners.push(c),
            None => return,
        }
    }

    // Fan triangulation anchored at the first corner.
    for i in 1..corners.len() - 1 {
        for &(vertex, uv) in &[corners[0], corners[i], corners[i + 1]] {
            triangles.push(vertex);
            match uv.and_then(|t| uv_table.get(t)) {
                Some(&[u, v]) => corner_uvs.extend_from_slice(&[u, v]),
                None => *uvs_complete = false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    #[test]
    fn test_single_triangle() {
        let mesh = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        assert_eq!(mesh.vertices, vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        assert_eq!(mesh.triangles, vec![0, 1, 2]);
        for n in mesh.normals.chunks_exact(3) {
            assert!(n[0].abs() < EPS && n[1].abs() < EPS);
            assert!((n[2] - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn test_quad_fans_into_two_triangles_sharing_vertex_0() {
        let mesh = parse_obj("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n");
        assert_eq!(mesh.triangles, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn test_degenerate_and_oversized_faces_are_skipped() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 0 0 1\nv 1 1 1\nf 1 2\nf 1 2 3 4 5\nf 1 2 3\n";
        let mesh = parse_obj(text);
        assert_eq!(mesh.triangles, vec![0, 1, 2]);
    }

    #[test]
    fn test_face_with_out_of_range_index_is_skipped() {
        let mesh = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 9\nf 1 2 3\n");
        assert_eq!(mesh.triangles, vec![0, 1, 2]);
    }

    #[test]
    fn test_unknown_prefixes_are_ignored() {
        let text = "# comment\no cube\ns off\nvn 0 0 1\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let mesh = parse_obj(text);
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_uvs_are_per_corner_parallel_to_triangles() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvt 0 1\nf 1/1 2/2 3/3\n";
        let mesh = parse_obj(text);
        assert_eq!(mesh.uvs, vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
        assert_eq!(mesh.uvs.len(), mesh.triangles.len() * 2);
    }

    #[test]
    fn test_shared_position_may_carry_different_uvs_per_corner() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvt 0 1\nvt 1 1\n\
                    f 1/1 2/2 3/3\nf 1/4 2/2 3/3\n";
        let mesh = parse_obj(text);
        // Same position index 0, two different uvs.
        assert_eq!(&mesh.uvs[0..2], &[0.0, 0.0]);
        assert_eq!(&mesh.uvs[6..8], &[1.0, 1.0]);
    }

    #[test]
    fn test_partial_uvs_drop_the_channel() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nf 1/1 2 3\n";
        let mesh = parse_obj(text);
        assert!(mesh.uvs.is_empty());
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_normals_match_vertices_after_parse() {
        let mesh = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nv 5 5 5\nf 1 2 3\n");
        assert_eq!(mesh.normals.len(), mesh.vertices.len());
        // Vertex 4 sits on no face and keeps the zero normal.
        assert_eq!(&mesh.normals[9..12], &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_agrees_with_reference_parser_on_tetrahedron() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 0 0 1\n\
                    f 1 2 3\nf 1 4 2\nf 1 3 4\nf 2 4 3\n";
        let ours = parse_obj(text);

        let mut reader = std::io::BufReader::new(text.as_bytes());
        let (models, _) = tobj::load_obj_buf(
            &mut reader,
            &tobj::LoadOptions::default(),
            |_| Err(tobj::LoadError::OpenFileFailed),
        )
        .expect("reference parser accepts the fixture");
        let reference = &models[0].mesh;

        assert_eq!(ours.vertices, reference.positions);
        assert_eq!(ours.triangles, reference.indices);
    }
}
