//! Scene graph stored as an arena of nodes.
//!
//! Nodes are addressed by [`NodeId`], a stable index handed out at insertion
//! time. Nothing is ever removed, so ids stay valid for the lifetime of the
//! scene and the frame updater can hold ids instead of references.

use fnv::FnvHashMap;
use glam::{Mat4, Vec3};
use thiserror::Error;

use crate::geometry::SectionShape;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SceneError {
    #[error("unknown scene node {0:?}")]
    UnknownNode(NodeId),
    #[error("scene node {0:?} is not a camera")]
    NotACamera(NodeId),
    #[error("node name `{0}` is already taken")]
    DuplicateName(&'static str),
}

/// Local transform. Rotation is Euler XYZ in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// `T * Rx * Ry * Rz * S`
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_rotation_x(self.rotation.x)
            * Mat4::from_rotation_y(self.rotation.y)
            * Mat4::from_rotation_z(self.rotation.z)
            * Mat4::from_scale(self.scale)
    }
}

/// Right-handed perspective camera looking down its local -Z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerspectiveCamera {
    pub fovy_radians: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl PerspectiveCamera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Group,
    Mesh {
        shape: SectionShape,
        color: Vec3,
    },
    Camera(PerspectiveCamera),
    /// Light pointing from the node position towards `target`.
    DirectionalLight {
        color: Vec3,
        intensity: f32,
        target: Vec3,
    },
    Particles {
        positions: Vec<Vec3>,
        color: Vec3,
        size: f32,
    },
    VideoPlane {
        tint: Vec3,
    },
}

#[derive(Clone, Debug)]
pub struct Node {
    pub name: &'static str,
    pub kind: NodeKind,
    pub transform: Transform,
    parent: Option<NodeId>,
}

impl Node {
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

#[derive(Default)]
pub struct Scene {
    nodes: Vec<Node>,
    names: FnvHashMap<&'static str, NodeId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node under `parent` (or at the root). Names must be unique.
    pub fn insert(
        &mut self,
        name: &'static str,
        kind: NodeKind,
        transform: Transform,
        parent: Option<NodeId>,
    ) -> Result<NodeId, SceneError> {
        if let Some(p) = parent {
            self.get(p)?;
        }
        if self.names.contains_key(name) {
            return Err(SceneError::DuplicateName(name));
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name,
            kind,
            transform,
            parent,
        });
        self.names.insert(name, id);
        Ok(id)
    }

    pub fn get(&self, id: NodeId) -> Result<&Node, SceneError> {
        self.nodes.get(id.0).ok_or(SceneError::UnknownNode(id))
    }

    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut Node, SceneError> {
        self.nodes.get_mut(id.0).ok_or(SceneError::UnknownNode(id))
    }

    pub fn transform_mut(&mut self, id: NodeId) -> Result<&mut Transform, SceneError> {
        Ok(&mut self.get_mut(id)?.transform)
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Compose local transforms from the root down to `id`.
    pub fn world_matrix(&self, id: NodeId) -> Result<Mat4, SceneError> {
        let mut m = Mat4::IDENTITY;
        let mut cursor = Some(id);
        while let Some(cur) = cursor {
            let node = self.get(cur)?;
            m = node.transform.matrix() * m;
            cursor = node.parent;
        }
        Ok(m)
    }

    /// World -> clip for the camera node `id`.
    pub fn view_projection(&self, id: NodeId) -> Result<Mat4, SceneError> {
        let camera = match &self.get(id)?.kind {
            NodeKind::Camera(c) => *c,
            _ => return Err(SceneError::NotACamera(id)),
        };
        let view = self.world_matrix(id)?.inverse();
        Ok(camera.projection_matrix() * view)
    }

    pub fn set_camera_aspect(&mut self, id: NodeId, aspect: f32) -> Result<(), SceneError> {
        match &mut self.get_mut(id)?.kind {
            NodeKind::Camera(c) => {
                c.aspect = aspect;
                Ok(())
            }
            _ => Err(SceneError::NotACamera(id)),
        }
    }
}
