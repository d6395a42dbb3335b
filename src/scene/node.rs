//! Arena-based scene graph.
//!
//! Nodes and meshes live in [`Scene`]-owned arenas and are addressed by
//! stable [`NodeId`] / [`MeshId`] handles. Parent/child links are handles
//! too, so the graph has no ownership cycles and a stale handle is an
//! ignorable value rather than a dangling pointer. Nodes are created once
//! at scene assembly and never removed; [`Scene::detach`] unlinks a node
//! back into a root without invalidating anything.

use log::debug;

use crate::geometry::MeshGeometry;

use super::transform::Transform;

/// Stable handle to a node in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

/// Stable handle to a mesh in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(pub(crate) u32);

impl MeshId {
    pub(crate) fn index(&self) -> usize {
        self.0 as usize
    }
}

/// A named node owning a [`Transform`], an optional mesh reference, and
/// an ordered list of child handles.
///
/// World and view matrices come straight from the node's own transform:
/// a child's world matrix is NOT pre-multiplied by its parent's. The
/// hierarchy is organizational only, and downstream renderers assume flat
/// world matrices.
#[derive(Debug)]
pub struct SceneNode {
    pub name: String,
    pub transform: Transform,
    mesh: Option<MeshId>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl SceneNode {
    fn new(name: String) -> Self {
        Self {
            name,
            transform: Transform::default(),
            mesh: None,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Replaces the mesh reference. Chains, builder style.
    pub fn set_mesh(&mut self, mesh: Option<MeshId>) -> &mut Self {
        self.mesh = mesh;
        self
    }

    pub fn mesh(&self) -> Option<MeshId> {
        self.mesh
    }

    /// The parent handle, or `None` for a root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child handles in insertion order, which is also traversal order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Owner of the node and mesh arenas.
#[derive(Debug, Default)]
pub struct Scene {
    nodes: Vec<SceneNode>,
    meshes: Vec<MeshGeometry>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new root node and returns its handle.
    pub fn add_node(&mut self, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(SceneNode::new(name.into()));
        id
    }

    /// Moves a mesh into the scene and returns its handle.
    pub fn add_mesh(&mut self, mesh: MeshGeometry) -> MeshId {
        let id = MeshId(self.meshes.len() as u32);
        self.meshes.push(mesh);
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0 as usize)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.0 as usize)
    }

    pub fn mesh(&self, id: MeshId) -> Option<&MeshGeometry> {
        self.meshes.get(id.0 as usize)
    }

    pub fn mesh_mut(&mut self, id: MeshId) -> Option<&mut MeshGeometry> {
        self.meshes.get_mut(id.0 as usize)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// All nodes with their handles, in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }

    /// Handles of every root node, in creation order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes()
            .filter(|(_, n)| n.parent.is_none())
            .map(|(id, _)| id)
    }

    /// Appends each child in `children` to `parent`, in argument order.
    ///
    /// Every attached child gets `parent` as its back-reference; a child
    /// that already had a parent is detached from it first, so a node is
    /// always in exactly one children list. Handles that do not name a
    /// live node, self-attachment, and attachments that would close a
    /// cycle are skipped with a debug log.
    pub fn attach(&mut self, parent: NodeId, children: &[NodeId]) {
        if self.node(parent).is_none() {
            debug!("attach: unknown parent handle {:?}", parent);
            return;
        }
        for &child in children {
            if child == parent {
                debug!("attach: skipping self-attachment of {:?}", child);
                continue;
            }
            if self.node(child).is_none() {
                debug!("attach: skipping unknown child handle {:?}", child);
                continue;
            }
            if self.is_ancestor(child, parent) {
                debug!(
                    "attach: {:?} is an ancestor of {:?}, skipping cycle",
                    child, parent
                );
                continue;
            }
            self.detach(child);
            self.nodes[child.0 as usize].parent = Some(parent);
            self.nodes[parent.0 as usize].children.push(child);
        }
    }

    /// Removes `child` from its parent's children list, making it a root.
    /// A root or unknown handle is left untouched.
    pub fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.node(child).and_then(|n| n.parent) else {
            return;
        };
        self.nodes[child.0 as usize].parent = None;
        let siblings = &mut self.nodes[parent.0 as usize].children;
        siblings.retain(|&c| c != child);
    }

    // True if `candidate` is `node` itself or one of its ancestors.
    fn is_ancestor(&self, candidate: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            if id == candidate {
                return true;
            }
            cursor = self.node(id).and_then(|n| n.parent);
        }
        false
    }

    pub(crate) fn nodes_and_meshes_mut(&mut self) -> (&mut [SceneNode], &mut [MeshGeometry]) {
        (&mut self.nodes, &mut self.meshes)
    }
}
