//! Explicit transform tree.
//!
//! Nodes live in an arena and hold parent-relative transforms; world matrices
//! are resolved by composition when the draw list is collected.

use glam::{Mat4, Quat, Vec3};
use smallvec::SmallVec;

use crate::mesh::MeshId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            translation: Vec3::new(x, y, z),
            ..Self::default()
        }
    }

    /// Euler angles applied in XYZ order.
    pub fn with_euler(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = Quat::from_euler(glam::EulerRot::XYZ, x, y, z);
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_uniform_scale(self, s: f32) -> Self {
        self.with_scale(Vec3::splat(s))
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: [f32; 3],
    pub emissive: [f32; 3],
    pub opacity: f32,
    /// Skip lighting entirely.
    pub unlit: bool,
}

impl Material {
    pub fn lit(color: [f32; 3]) -> Self {
        Self {
            color,
            emissive: [0.0; 3],
            opacity: 1.0,
            unlit: false,
        }
    }

    pub fn unlit(color: [f32; 3]) -> Self {
        Self {
            unlit: true,
            ..Self::lit(color)
        }
    }

    pub fn with_emissive(mut self, emissive: [f32; 3]) -> Self {
        self.emissive = emissive;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drawable {
    pub mesh: MeshId,
    pub material: Material,
}

#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: &'static str,
    pub local: Transform,
    pub parent: Option<NodeId>,
    pub children: SmallVec<[NodeId; 8]>,
    pub visible: bool,
    pub drawable: Option<Drawable>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    pub mesh: MeshId,
    pub model: Mat4,
    pub material: Material,
}

#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &'static str, parent: Option<NodeId>, local: Transform) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SceneNode {
            name,
            local,
            parent,
            children: SmallVec::new(),
            visible: true,
            drawable: None,
        });
        if let Some(p) = parent {
            self.nodes[p.0].children.push(id);
        }
        id
    }

    pub fn add_mesh(
        &mut self,
        name: &'static str,
        parent: Option<NodeId>,
        local: Transform,
        mesh: MeshId,
        material: Material,
    ) -> NodeId {
        let id = self.add(name, parent, local);
        self.nodes[id.0].drawable = Some(Drawable { mesh, material });
        id
    }

    pub fn node(&self, id: NodeId) -> &SceneNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut SceneNode {
        &mut self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        self.nodes[id.0].visible = visible;
    }

    /// Visible only if every ancestor is visible too.
    pub fn is_effectively_visible(&self, id: NodeId) -> bool {
        let mut cur = Some(id);
        while let Some(n) = cur {
            let node = &self.nodes[n.0];
            if !node.visible {
                return false;
            }
            cur = node.parent;
        }
        true
    }

    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let node = &self.nodes[id.0];
        let local = node.local.matrix();
        match node.parent {
            Some(p) => self.world_matrix(p) * local,
            None => local,
        }
    }

    /// Walk every visible root and return draw items with resolved world
    /// matrices. Hidden nodes prune their whole subtree.
    pub fn collect_draws(&self) -> Vec<DrawItem> {
        let mut out = Vec::new();
        let mut stack: Vec<(NodeId, Mat4)> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.parent.is_none())
            .map(|(i, _)| (NodeId(i), Mat4::IDENTITY))
            .collect();
        while let Some((id, parent_world)) = stack.pop() {
            let node = &self.nodes[id.0];
            if !node.visible {
                continue;
            }
            let world = parent_world * node.local.matrix();
            if let Some(d) = node.drawable {
                out.push(DrawItem {
                    mesh: d.mesh,
                    model: world,
                    material: d.material,
                });
            }
            stack.extend(node.children.iter().map(|c| (*c, world)));
        }
        out
    }
}
