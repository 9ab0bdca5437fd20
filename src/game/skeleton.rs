use ahash::HashMap;

use crate::{engine::transform::Transform, game::animation::Clip};

#[derive(Clone, Debug)]
pub struct Bone {
    pub name: String,
    /// Stable handle for this bone; equals its index in [Skeleton::bones] and
    /// keys the bone's animation tracks.
    pub id: u32,
    /// The bone's initial local pose.
    pub bind: Transform,
}

#[derive(Default)]
pub struct Skeleton {
    pub name: String,
    pub bones: Vec<Bone>,
    pub animations: HashMap<String, Clip>,
}

impl Skeleton {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bones: Vec::new(),
            animations: HashMap::default(),
        }
    }

    pub fn add_bone(&mut self, name: impl Into<String>, bind: Transform) -> u32 {
        let id = self.bones.len() as u32;
        self.bones.push(Bone {
            name: name.into(),
            id,
            bind,
        });
        id
    }

    pub fn bone_by_name(&self, name: &str) -> Option<&Bone> {
        self.bones.iter().find(|bone| bone.name == name)
    }

    pub fn add_animation(&mut self, name: impl Into<String>, clip: Clip) {
        self.animations.insert(name.into(), clip);
    }

    pub fn animation(&self, name: &str) -> Option<&Clip> {
        self.animations.get(name)
    }
}
