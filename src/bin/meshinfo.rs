//! Inspect OBJ meshes from the command line.
//!
//! ```text
//! meshinfo [--merge] [--flip-normals] FILE...
//! ```
//!
//! Loads each file through the library's OBJ parser and prints buffer
//! statistics and the bounding box. With `--merge` all inputs are merged
//! into one shared-buffer mesh first, which is handy for sanity-checking
//! index offsets before committing a merged asset.

use anyhow::{bail, Context, Result};
use kelpie::geometry::{merge, MeshGeometry};
use kelpie::loader::load_mesh;
use kelpie::math::Vector3;
use log::debug;

fn main() -> Result<()> {
    env_logger::init();

    let mut merge_inputs = false;
    let mut flip_normals = false;
    let mut paths: Vec<String> = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--merge" => merge_inputs = true,
            "--flip-normals" => flip_normals = true,
            "--help" | "-h" => {
                println!("usage: meshinfo [--merge] [--flip-normals] FILE...");
                return Ok(());
            }
            _ => paths.push(arg),
        }
    }
    if paths.is_empty() {
        bail!("no input files; usage: meshinfo [--merge] [--flip-normals] FILE...");
    }

    let mut meshes = Vec::with_capacity(paths.len());
    for path in &paths {
        let mut mesh = load_mesh(path).with_context(|| format!("loading {path}"))?;
        if flip_normals {
            mesh.flip_normals();
        }
        meshes.push(mesh);
    }

    if merge_inputs {
        debug!("merging {} meshes", meshes.len());
        report("merged", &merge(&meshes));
    } else {
        for (path, mesh) in paths.iter().zip(&meshes) {
            report(path, mesh);
        }
    }
    Ok(())
}

fn report(label: &str, mesh: &MeshGeometry) {
    println!("{label}:");
    println!("  vertices:  {}", mesh.vertex_count());
    println!("  triangles: {}", mesh.triangle_count());
    if mesh.uvs.is_empty() {
        println!("  uvs:       none");
    } else {
        println!("  uvs:       {} corners", mesh.uvs.len() / 2);
    }

    let zero_normals = mesh
        .normals
        .chunks_exact(3)
        .filter(|n| n.iter().all(|&c| c == 0.0))
        .count();
    println!("  zero-length normals: {zero_normals}");

    if mesh.vertex_count() > 0 {
        let mut min = mesh.position(0);
        let mut max = min;
        for i in 1..mesh.vertex_count() {
            let p = mesh.position(i);
            min = Vector3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z));
            max = Vector3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z));
        }
        println!("  bounds: ({min}) to ({max})");
    }
}
