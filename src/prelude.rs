//! # Kelpie Prelude
//!
//! One-stop imports for typical scene assembly and loading code.
//!
//! ```rust
//! use kelpie::prelude::*;
//!
//! let mut scene = Scene::new();
//! let mesh = scene.add_mesh(parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n"));
//! let node = scene.add_node("triangle");
//! scene.node_mut(node).unwrap().set_mesh(Some(mesh));
//! ```

// Re-export math value types
pub use crate::math::{Matrix4, Vector3};

// Re-export scene graph types
pub use crate::scene::{Camera, MeshId, NodeId, Scene, SceneNode, Transform};

// Re-export geometry and loading
pub use crate::geometry::{merge, MeshGeometry, Vertex3D};
pub use crate::loader::{load_materials, load_mesh, parse_mtl, parse_obj, LoadError, Material};

// Re-export the frame-loop surface
pub use crate::clock::Clock;
pub use crate::render::{render_scene, RenderBackend};
