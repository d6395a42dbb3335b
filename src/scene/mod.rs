//! # Scene Graph
//!
//! Arena-owned nodes with per-node transforms, plus the camera. Handles
//! ([`NodeId`], [`MeshId`]) stand in for references everywhere, which
//! keeps the parent/child graph cycle-free by construction.

pub mod camera;
pub mod node;
pub mod transform;

pub use camera::Camera;
pub use node::{MeshId, NodeId, Scene, SceneNode};
pub use transform::Transform;
