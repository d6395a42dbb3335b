//! # Mesh and Material Loading
//!
//! Text-format parsers plus the file boundary that dispatches on
//! extension. Parsing itself never fails — malformed lines are logged and
//! skipped — so the only error cases live at the file boundary:
//! unreadable files and unsupported extensions, both typed [`LoadError`]
//! variants. A failed load produces no partial geometry.

pub mod mtl;
pub mod obj;

use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

use crate::geometry::MeshGeometry;

pub use mtl::{parse_mtl, Material};
pub use obj::parse_obj;

/// Failure at the file-load boundary.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: {}", path.display())]
    UnsupportedExtension { path: PathBuf },

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Loads a mesh from an `.obj` file.
pub fn load_mesh(path: impl AsRef<Path>) -> Result<MeshGeometry, LoadError> {
    let path = path.as_ref();
    let text = read_with_extension(path, "obj")?;
    let mesh = parse_obj(&text);
    info!(
        "mesh from {:?} loaded: {} vertices, {} triangles",
        path,
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Loads material definitions from an `.mtl` file.
pub fn load_materials(path: impl AsRef<Path>) -> Result<Vec<Material>, LoadError> {
    let path = path.as_ref();
    let text = read_with_extension(path, "mtl")?;
    let materials = parse_mtl(&text);
    info!("{} materials loaded from {:?}", materials.len(), path);
    Ok(materials)
}

// The extension gate runs before any I/O, so an unsupported path never
// touches the filesystem.
fn read_with_extension(path: &Path, expected: &str) -> Result<String, LoadError> {
    let supported = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case(expected))
        .unwrap_or(false);
    if !supported {
        return Err(LoadError::UnsupportedExtension {
            path: path.to_path_buf(),
        });
    }
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}
