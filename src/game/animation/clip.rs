use ahash::HashMap;

use crate::{engine::transform::Transform, game::skeleton::Skeleton};

use super::track::BoneTrack;

/// Keyframe tracks for one animation, keyed by bone id.
#[derive(Clone, Debug, Default)]
pub struct Clip {
    tracks: HashMap<u32, BoneTrack>,
}

impl Clip {
    pub fn track(&self, bone: u32) -> Option<&BoneTrack> {
        self.tracks.get(&bone)
    }

    pub fn track_mut(&mut self, bone: u32) -> &mut BoneTrack {
        self.tracks.entry(bone).or_default()
    }

    pub fn tracks(&self) -> impl Iterator<Item = (u32, &BoneTrack)> {
        self.tracks.iter().map(|(id, track)| (*id, track))
    }

    pub fn tracks_mut(&mut self) -> impl Iterator<Item = (u32, &mut BoneTrack)> {
        self.tracks.iter_mut().map(|(id, track)| (*id, track))
    }

    /// Time of the last keyframe over all tracks.
    pub fn duration(&self) -> f32 {
        self.tracks
            .values()
            .map(|track| track.duration())
            .fold(0.0, f32::max)
    }

    /// Local pose per bone at `time`. Keyframes are relative to the bind
    /// pose; bones without a track hold their bind pose.
    pub fn sample_pose(&self, time: f32, skeleton: &Skeleton) -> Vec<Transform> {
        skeleton
            .bones
            .iter()
            .map(|bone| match self.tracks.get(&bone.id) {
                Some(track) => {
                    let key = track.sample(time);
                    Transform::new(
                        bone.bind.translation + key.translation,
                        bone.bind.rotation * key.rotation,
                    )
                }
                None => bone.bind.clone(),
            })
            .collect()
    }
}
