use glam::{Quat, Vec3};

use crate::game::skeleton::Skeleton;

use super::track::TransformKey;

/// Authoring inputs for turning a non-cyclic locomotion clip into a seamless
/// loop. The tolerance and turn angle are tied to the source animation and
/// come in with the content, not from the clip data.
#[derive(Clone, Debug)]
pub struct LoopConfig {
    /// Time the clip is cut and re-joined at.
    pub cutoff: f32,
    /// Keys within this distance of the cutoff are dropped before the joint
    /// key is inserted.
    pub key_tolerance: f32,
    /// The bone carrying the locomotion translation.
    pub root_bone: String,
    /// How far one cycle turns the character about the vertical axis, in
    /// radians.
    pub turn_radians: f32,
}

/// Everything an instance needs to carry a character across the loop
/// boundary. Immutable once stitched and shared by every instance of the
/// clip.
#[derive(Clone, Debug)]
pub struct LoopDescriptor {
    pub cutoff: f32,
    /// Yaw applied to the character at each loop boundary.
    pub turn: Quat,
    /// Locomotion bone position at time zero, relative to the character node.
    pub start_pos: Vec3,
    /// Locomotion bone position the unedited clip reaches at the cutoff.
    pub end_pos: Vec3,
}

impl LoopDescriptor {
    /// Descriptor for a clip without the locomotion bone; compensation with
    /// it leaves the character transform untouched.
    pub fn identity(cutoff: f32) -> Self {
        Self {
            cutoff,
            turn: Quat::IDENTITY,
            start_pos: Vec3::ZERO,
            end_pos: Vec3::ZERO,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StitchError {
    #[error("Animation not found: {0}")]
    AnimationNotFound(String),

    #[error("Loop cutoff must be positive, got {0}")]
    NonPositiveCutoff(f32),

    #[error("Loop cutoff {cutoff} is past the end of the track for bone {bone} ({duration})")]
    CutoffOutOfRange {
        bone: u32,
        cutoff: f32,
        duration: f32,
    },
}

/// Rewrite the tail of every track in the named animation so that playback
/// over `[0, cutoff]` loops seamlessly.
///
/// Every bone except the locomotion root gets a synthesized final key equal
/// to its first key, so limb motion loops exactly. The root keeps moving
/// through its natural end pose; the resulting discontinuity is absorbed at
/// runtime by re-anchoring the character node with the returned descriptor.
///
/// Must run at most once per clip: the edit is destructive and re-running it
/// on an already stitched clip would cut the loop short. Callers go through
/// [Skeletons::prepare_loop], which guards this.
///
/// [Skeletons::prepare_loop]: crate::game::assets::Skeletons::prepare_loop
pub fn stitch(
    skeleton: &mut Skeleton,
    animation: &str,
    config: &LoopConfig,
) -> Result<LoopDescriptor, StitchError> {
    if config.cutoff <= 0.0 {
        return Err(StitchError::NonPositiveCutoff(config.cutoff));
    }

    let Skeleton {
        bones, animations, ..
    } = skeleton;

    let clip = animations
        .get_mut(animation)
        .ok_or_else(|| StitchError::AnimationNotFound(animation.to_string()))?;

    // Check every track up front; failing halfway through would leave the
    // clip half edited.
    for (bone, track) in clip.tracks() {
        if !track.is_empty() && config.cutoff > track.duration() {
            return Err(StitchError::CutoffOutOfRange {
                bone,
                cutoff: config.cutoff,
                duration: track.duration(),
            });
        }
    }

    let mut descriptor = None;

    for (bone_id, track) in clip.tracks_mut() {
        let Some(first) = track.first().copied() else {
            continue;
        };

        // The pose the unedited clip interpolates to at the cutoff.
        let old_key = track.sample(config.cutoff);

        // Drop tail keys that would fight the joint key.
        while track
            .last()
            .is_some_and(|key| key.time >= config.cutoff - config.key_tolerance)
        {
            track.pop_last();
        }

        let mut joint = TransformKey::new(config.cutoff);

        match bones.get(bone_id as usize) {
            Some(bone) if bone.name == config.root_bone => {
                let mut start_pos = first.translation + bone.bind.translation;
                let end_pos = old_key.translation + bone.bind.translation;
                // The walk is planar; interpolation noise must not turn into
                // a vertical step at the loop boundary.
                start_pos.y = end_pos.y;

                joint.translation = old_key.translation;
                joint.rotation = old_key.rotation;
                joint.scale = old_key.scale;

                descriptor = Some(LoopDescriptor {
                    cutoff: config.cutoff,
                    turn: Quat::from_rotation_y(config.turn_radians),
                    start_pos,
                    end_pos,
                });
            }
            _ => {
                joint.translation = first.translation;
                joint.rotation = first.rotation;
                joint.scale = first.scale;
            }
        }

        track.insert(joint);
    }

    Ok(descriptor.unwrap_or_else(|| {
        tracing::warn!(
            "Locomotion bone \"{}\" not found in \"{}\"; loop compensation disabled.",
            config.root_bone,
            animation,
        );
        LoopDescriptor::identity(config.cutoff)
    }))
}
