use ahash::HashMap;
use glam::{Vec2, Vec3};

use super::{
    assets::AssetError,
    storage::{Handle, Storage},
};

#[derive(Clone, Copy, Debug)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub tex_coord: Vec2,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3, tex_coord: Vec2) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Build a flat +Y facing plane centered on the origin at the given
    /// height, split into a grid of `segments` quads with the texture tiled
    /// `uv_tile` times over the full extent.
    pub fn plane(extent: Vec2, height: f32, segments: u32, uv_tile: f32) -> Self {
        debug_assert!(segments > 0, "plane needs at least one segment");

        let verts_per_side = segments + 1;
        let mut vertices = Vec::with_capacity((verts_per_side * verts_per_side) as usize);

        for z in 0..verts_per_side {
            for x in 0..verts_per_side {
                let fx = x as f32 / segments as f32;
                let fz = z as f32 / segments as f32;
                vertices.push(Vertex::new(
                    Vec3::new(
                        (fx - 0.5) * extent.x,
                        height,
                        (fz - 0.5) * extent.y,
                    ),
                    Vec3::Y,
                    Vec2::new(fx, fz) * uv_tile,
                ));
            }
        }

        let mut indices = Vec::with_capacity((segments * segments * 6) as usize);
        for z in 0..segments {
            for x in 0..segments {
                let top_left = z * verts_per_side + x;
                let bottom_left = top_left + verts_per_side;

                indices.extend_from_slice(&[
                    top_left,
                    bottom_left,
                    top_left + 1,
                    top_left + 1,
                    bottom_left,
                    bottom_left + 1,
                ]);
            }
        }

        Self { vertices, indices }
    }
}

/// Named mesh cache. Procedural resources (the demo floor) are created under a
/// name once and removed by that name at teardown.
#[derive(Default)]
pub struct Meshes {
    meshes: Storage<Mesh>,
    lookup: HashMap<String, Handle<Mesh>>,
}

impl Meshes {
    pub fn insert(&mut self, name: &str, mesh: Mesh) -> Result<Handle<Mesh>, AssetError> {
        if self.lookup.contains_key(name) {
            return Err(AssetError::AlreadyExists(name.to_string()));
        }

        let handle = self.meshes.insert(mesh);
        self.lookup.insert(name.to_string(), handle);
        Ok(handle)
    }

    pub fn get(&self, name: &str) -> Option<&Mesh> {
        self.lookup.get(name).and_then(|handle| self.meshes.get(*handle))
    }

    pub fn remove(&mut self, name: &str) -> Option<Mesh> {
        let handle = self.lookup.remove(name)?;
        self.meshes.remove(handle)
    }
}
