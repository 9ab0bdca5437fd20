use std::sync::Arc;

use glam::{Quat, Vec2, Vec3};
use rand::Rng;

use crate::{
    engine::prelude::*,
    game::{
        animation::{LoopConfig, LoopDescriptor, Playback},
        assets::{SetupError, Skeletons},
        skeleton::Skeleton,
    },
};

const FLOOR_MESH: &str = "floor";

/// Content parameters for the sneak demo. The defaults are the reference
/// content: six characters on a 20 unit ring, the "Sneak" clip cut at 8.0
/// with a 60 degree right turn per cycle.
#[derive(Clone, Debug)]
pub struct SneakConfig {
    pub skeleton: String,
    pub animation: String,
    pub model_count: u32,
    pub ring_radius: f32,
    pub speed_range: std::ops::Range<f32>,
    pub loop_config: LoopConfig,
}

impl Default for SneakConfig {
    fn default() -> Self {
        Self {
            skeleton: "jaiqua.skeleton".to_string(),
            animation: "Sneak".to_string(),
            model_count: 6,
            ring_radius: 20.0,
            speed_range: 0.5..1.5,
            loop_config: LoopConfig {
                cutoff: 8.0,
                key_tolerance: 0.3,
                root_bone: "Spineroot".to_string(),
                turn_radians: -60f32.to_radians(),
            },
        }
    }
}

/// One walking character: a scene node plus its playback clock and speed. The
/// transform is plain data owned here and only pushed to the scene graph at
/// the end of each update.
pub struct CharacterInstance {
    pub node: Handle<SceneNode>,
    pub transform: Transform,
    pub playback: Playback,
    pub speed: f32,
}

impl CharacterInstance {
    /// Advance the clock; crossing the loop point re-anchors the transform so
    /// the next cycle continues where the walk would have gone, including the
    /// turn the cycle imparts. At most one loop event per call, however large
    /// `delta_time` is. Returns whether the loop point was crossed.
    pub fn advance(&mut self, looped: &LoopDescriptor, delta_time: f32) -> bool {
        self.playback.add_time(self.speed * delta_time, looped.cutoff);

        if self.playback.time < looped.cutoff {
            return false;
        }

        // Where the walk ends up in world space this cycle, and the extra
        // displacement the turn introduces relative to the start position.
        let current_end = self.transform.transform_point(looped.end_pos);
        let offset = looped.turn * (self.transform.rotation * -looped.start_pos);

        self.transform.translation = current_end + offset;
        self.transform.rotate(looped.turn);
        self.playback.time = 0.0;

        true
    }
}

/// Several characters walking a non-cyclic locomotion clip forever: the clip
/// is stitched into a seamless loop at setup and every instance's node is
/// re-anchored each time its clock crosses the loop point.
pub struct SneakScene {
    config: SneakConfig,
    graph: SceneGraph,
    meshes: Meshes,
    skeletons: Skeletons,
    skeleton: Handle<Skeleton>,
    looped: Arc<LoopDescriptor>,
    instances: Vec<CharacterInstance>,
}

impl SneakScene {
    pub fn new(
        config: SneakConfig,
        mut skeletons: Skeletons,
        rng: &mut impl Rng,
    ) -> Result<Self, SetupError> {
        let mut graph = SceneGraph::new();
        let mut meshes = Meshes::default();

        // Scene dressing: some ambient light, two coloured spots and a floor.
        graph.ambient_light = Vec3::splat(0.5);
        graph.add_light(SpotLight::aimed_at_origin(
            Vec3::new(-40.0, 180.0, -10.0),
            Vec3::new(0.0, 0.0, 0.5),
        ));
        graph.add_light(SpotLight::aimed_at_origin(
            Vec3::new(0.0, 150.0, -100.0),
            Vec3::new(0.0, 0.5, 0.0),
        ));
        meshes.insert(FLOOR_MESH, Mesh::plane(Vec2::splat(250.0), -1.0, 25, 15.0))?;

        let skeleton = skeletons.load(&config.skeleton)?;
        let looped = skeletons.prepare_loop(skeleton, &config.animation, &config.loop_config)?;

        let instances = (0..config.model_count)
            .map(|i| {
                // Place the characters at regular angular intervals around
                // the ring, facing along it.
                let mut transform = Transform::from_rotation(Quat::from_rotation_y(
                    std::f32::consts::TAU * i as f32 / config.model_count as f32,
                ));
                transform.translate_local(Vec3::new(0.0, 0.0, -config.ring_radius));

                let node = graph.create_child_node(graph.root());
                if let Some(scene_node) = graph.node_mut(node) {
                    scene_node.transform = transform.clone();
                }

                CharacterInstance {
                    node,
                    transform,
                    // Looping stays off; crossing the cutoff is handled here.
                    playback: Playback {
                        enabled: true,
                        ..Playback::new()
                    },
                    speed: rng.gen_range(config.speed_range.clone()),
                }
            })
            .collect();

        tracing::info!("Spawned {} sneaking characters.", config.model_count);

        Ok(Self {
            config,
            graph,
            meshes,
            skeletons,
            skeleton,
            looped,
            instances,
        })
    }

    pub fn instances(&self) -> &[CharacterInstance] {
        &self.instances
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn floor(&self) -> Option<&Mesh> {
        self.meshes.get(FLOOR_MESH)
    }

    /// World-space position of each character's locomotion root at its
    /// current playback time.
    pub fn sampled_root_positions(&self) -> Vec<Vec3> {
        let Some(skeleton) = self.skeletons.get(self.skeleton) else {
            return Vec::new();
        };
        let Some(clip) = skeleton.animation(&self.config.animation) else {
            return Vec::new();
        };
        let root = skeleton.bone_by_name(&self.config.loop_config.root_bone);

        self.instances
            .iter()
            .map(|instance| {
                let local = match root {
                    Some(bone) => {
                        let pose = clip.sample_pose(instance.playback.time, skeleton);
                        pose[bone.id as usize].translation
                    }
                    None => Vec3::ZERO,
                };
                self.graph
                    .world_transform(instance.node)
                    .transform_point(local)
            })
            .collect()
    }

    /// Release everything the scene created at setup.
    pub fn teardown(&mut self) {
        self.instances.clear();
        self.meshes.remove(FLOOR_MESH);
    }
}

impl Scene for SneakScene {
    fn update(&mut self, delta_time: f32) -> bool {
        for instance in self.instances.iter_mut() {
            instance.advance(&self.looped, delta_time);

            if let Some(node) = self.graph.node_mut(instance.node) {
                node.transform = instance.transform.clone();
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        engine::assets::AssetError,
        game::animation::{Clip, TransformKey},
    };
    use rand::{SeedableRng, rngs::StdRng};

    #[inline]
    fn approx_v3(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    fn descriptor() -> LoopDescriptor {
        LoopDescriptor {
            cutoff: 8.0,
            turn: Quat::from_rotation_y(-60f32.to_radians()),
            start_pos: Vec3::new(0.0, 0.5, 1.0),
            end_pos: Vec3::new(0.0, 0.5, -5.0),
        }
    }

    fn instance() -> CharacterInstance {
        let mut graph = SceneGraph::new();
        CharacterInstance {
            node: graph.create_child_node(graph.root()),
            transform: Transform::new(Vec3::new(3.0, 0.0, 4.0), Quat::from_rotation_y(0.7)),
            playback: Playback {
                enabled: true,
                ..Playback::new()
            },
            speed: 1.0,
        }
    }

    #[test]
    fn crossing_the_cutoff_applies_the_compensation_once() {
        let looped = descriptor();
        let mut instance = instance();

        let before = instance.transform.clone();
        assert!(!instance.advance(&looped, 3.0));
        assert!(!instance.advance(&looped, 3.0));
        assert!(approx_v3(instance.transform.translation, before.translation));

        assert!(instance.advance(&looped, 3.0));
        assert_eq!(instance.playback.time, 0.0);

        let current_end = before.transform_point(looped.end_pos);
        let offset = looped.turn * (before.rotation * -looped.start_pos);
        assert!(approx_v3(instance.transform.translation, current_end + offset));
        assert!(
            instance
                .transform
                .rotation
                .dot(before.rotation * looped.turn)
                .abs()
                > 1.0 - 1e-4
        );
    }

    #[test]
    fn root_world_position_is_continuous_across_the_boundary() {
        // For a planar walk (yaw-only node rotation) the root's world
        // position at the start of the next cycle must equal where the
        // previous cycle ended.
        let looped = descriptor();
        let mut instance = instance();

        let end_world = instance.transform.transform_point(looped.end_pos);
        instance.advance(&looped, 9.0);
        let next_start_world = instance.transform.transform_point(looped.start_pos);

        assert!(approx_v3(end_world, next_start_world));
    }

    #[test]
    fn large_delta_processes_a_single_loop_event() {
        let looped = descriptor();

        let mut stepped = instance();
        stepped.advance(&looped, 9.0);

        let mut jumped = instance();
        jumped.advance(&looped, 100.0);

        assert!(approx_v3(
            jumped.transform.translation,
            stepped.transform.translation
        ));
        assert_eq!(jumped.playback.time, 0.0);
    }

    #[test]
    fn identity_descriptor_leaves_the_transform_alone() {
        let looped = LoopDescriptor::identity(8.0);
        let mut instance = instance();
        let before = instance.transform.clone();

        assert!(instance.advance(&looped, 9.0));
        assert_eq!(instance.playback.time, 0.0);
        assert!(approx_v3(instance.transform.translation, before.translation));
        assert!(instance.transform.rotation.dot(before.rotation).abs() > 1.0 - 1e-5);
    }

    fn demo_skeleton() -> crate::game::skeleton::Skeleton {
        let mut skeleton = crate::game::skeleton::Skeleton::new("jaiqua.skeleton");
        let root = skeleton.add_bone("Spineroot", Transform::default());

        let mut clip = Clip::default();
        let track = clip.track_mut(root);
        track.insert(TransformKey::new(0.0));
        track.insert(TransformKey::new(10.0).with_translation(Vec3::new(0.0, 0.0, -5.0)));
        skeleton.add_animation("Sneak", clip);
        skeleton
    }

    fn demo_scene(model_count: u32) -> SneakScene {
        let skeletons = Skeletons::new(|name| match name {
            "jaiqua.skeleton" => Ok(demo_skeleton()),
            _ => Err(AssetError::NotFound(name.to_string())),
        });

        let config = SneakConfig {
            model_count,
            ..SneakConfig::default()
        };

        let mut rng = StdRng::seed_from_u64(7);
        SneakScene::new(config, skeletons, &mut rng).unwrap()
    }

    #[test]
    fn setup_spawns_the_configured_ring() {
        let scene = demo_scene(6);

        assert_eq!(scene.instances().len(), 6);
        assert!(scene.floor().is_some());
        assert_eq!(scene.graph().lights.len(), 2);

        for instance in scene.instances() {
            assert!((instance.transform.translation.length() - 20.0).abs() < 1e-3);
            assert!((0.5..1.5).contains(&instance.speed));
            assert!(instance.playback.enabled);
            assert!(!instance.playback.looping);
        }
    }

    #[test]
    fn update_pushes_instance_transforms_to_the_scene_graph() {
        let mut scene = demo_scene(2);

        assert!(scene.update(9.0));

        for instance in scene.instances() {
            let node = scene.graph().node(instance.node).unwrap();
            assert!(approx_v3(
                node.transform.translation,
                instance.transform.translation
            ));
        }
    }

    #[test]
    fn teardown_releases_scene_resources() {
        let mut scene = demo_scene(3);
        scene.teardown();

        assert!(scene.instances().is_empty());
        assert!(scene.floor().is_none());
    }
}
