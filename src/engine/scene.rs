use glam::Vec3;

use super::{
    storage::{Handle, Storage},
    transform::Transform,
};

/// A node in the scene graph. The root node has no parent and sits at the
/// world origin.
#[derive(Debug, Default)]
pub struct SceneNode {
    pub parent: Option<Handle<SceneNode>>,
    pub transform: Transform,
}

/// Placed spot light. There is no renderer here; lights are plain scene data
/// for whatever ends up drawing the scene.
#[derive(Clone, Debug)]
pub struct SpotLight {
    pub position: Vec3,
    pub direction: Vec3,
    pub diffuse: Vec3,
}

impl SpotLight {
    /// A spot light at `position`, aimed at the world origin.
    pub fn aimed_at_origin(position: Vec3, diffuse: Vec3) -> Self {
        Self {
            position,
            direction: (-position).normalize(),
            diffuse,
        }
    }
}

pub struct SceneGraph {
    nodes: Storage<SceneNode>,
    root: Handle<SceneNode>,

    pub ambient_light: Vec3,
    pub lights: Vec<SpotLight>,
}

impl SceneGraph {
    pub fn new() -> Self {
        let mut nodes = Storage::default();
        let root = nodes.insert(SceneNode::default());
        Self {
            nodes,
            root,
            ambient_light: Vec3::ZERO,
            lights: Vec::new(),
        }
    }

    pub fn root(&self) -> Handle<SceneNode> {
        self.root
    }

    pub fn create_child_node(&mut self, parent: Handle<SceneNode>) -> Handle<SceneNode> {
        self.nodes.insert(SceneNode {
            parent: Some(parent),
            transform: Transform::default(),
        })
    }

    pub fn node(&self, handle: Handle<SceneNode>) -> Option<&SceneNode> {
        self.nodes.get(handle)
    }

    pub fn node_mut(&mut self, handle: Handle<SceneNode>) -> Option<&mut SceneNode> {
        self.nodes.get_mut(handle)
    }

    /// Compose the node's transform with its parent chain.
    pub fn world_transform(&self, handle: Handle<SceneNode>) -> Transform {
        let Some(node) = self.nodes.get(handle) else {
            return Transform::default();
        };

        match node.parent {
            None => node.transform.clone(),
            Some(parent) => {
                let parent = self.world_transform(parent);
                Transform {
                    translation: parent.transform_point(node.transform.translation),
                    rotation: parent.rotation * node.transform.rotation,
                }
            }
        }
    }

    pub fn add_light(&mut self, light: SpotLight) {
        self.lights.push(light);
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// A scene hosted by an outer frame loop. `update` is called once per frame
/// with the elapsed time since the previous frame; returning `false` tells the
/// host to stop.
pub trait Scene {
    fn update(&mut self, delta_time: f32) -> bool;
}
