//! # Mesh Geometry
//!
//! Flat vertex/index/normal/uv buffers, per-vertex normal reconstruction
//! from triangle winding, shared-buffer merging, and the interleaved
//! vertex format the GPU boundary consumes.

pub mod merge;
pub mod mesh;
pub mod vertex;

pub use merge::merge;
pub use mesh::MeshGeometry;
pub use vertex::Vertex3D;
