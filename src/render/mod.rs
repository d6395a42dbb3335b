//! # Renderer Boundary
//!
//! The graphics API lives outside this crate; it is reached through
//! [`RenderBackend`], and [`render_scene`] is the per-frame traversal
//! driver that feeds it. The driver owns the bind-once discipline: a mesh
//! is handed to [`RenderBackend::bind_mesh`] the first time it is drawn
//! and its [`bound`](crate::geometry::MeshGeometry::is_bound) flag is set
//! afterwards, so backends can create GPU resources lazily without
//! tracking residency themselves.

use crate::geometry::MeshGeometry;
use crate::math::Matrix4;
use crate::scene::{Camera, MeshId, Scene};

/// What a graphics backend must provide to draw a scene.
///
/// `world`, `view`, and `projection` arrive in the flat row-vector layout
/// of [`Matrix4`]; `math::convert` turns them into cgmath types where a
/// backend wants those.
pub trait RenderBackend {
    /// Called once per frame before any draw, with the camera's view and
    /// projection matrices.
    fn set_view_projection(&mut self, view: &Matrix4, projection: &Matrix4);

    /// Called the first time a mesh is drawn, before its first
    /// [`RenderBackend::draw_mesh`]. Create vertex/index resources here.
    fn bind_mesh(&mut self, id: MeshId, mesh: &MeshGeometry);

    /// Draw `mesh` with the node's world matrix. Nodes keep flat world
    /// matrices (no parent composition), so one draw call per node.
    fn draw_mesh(&mut self, id: MeshId, world: &Matrix4, mesh: &MeshGeometry);
}

/// Renders every mesh-bearing node of `scene` through `backend`, in node
/// creation order.
///
/// `aspect` is the current surface aspect ratio, forwarded to the
/// camera's projection cache. Nodes whose mesh handle no longer resolves
/// are skipped.
pub fn render_scene<B: RenderBackend>(
    backend: &mut B,
    scene: &mut Scene,
    camera: &mut Camera,
    aspect: f32,
) {
    let view = *camera.transform.view_matrix();
    let projection = *camera.projection_matrix(aspect);
    backend.set_view_projection(&view, &projection);

    let (nodes, meshes) = scene.nodes_and_meshes_mut();
    for node in nodes.iter_mut() {
        let Some(mesh_id) = node.mesh() else {
            continue;
        };
        let Some(mesh) = meshes.get_mut(mesh_id.index()) else {
            continue;
        };
        if !mesh.is_bound() {
            backend.bind_mesh(mesh_id, mesh);
            mesh.mark_bound();
        }
        backend.draw_mesh(mesh_id, node.transform.world_matrix(), mesh);
    }
}
