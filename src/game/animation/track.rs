use glam::{Quat, Vec3};

pub trait Interpolate: Copy {
    fn interpolate(left: Self, right: Self, n: f32) -> Self;
}

impl Interpolate for f32 {
    #[inline]
    fn interpolate(left: Self, right: Self, n: f32) -> Self {
        left + (right - left) * n
    }
}

impl Interpolate for Vec3 {
    #[inline]
    fn interpolate(left: Self, right: Self, n: f32) -> Self {
        left.lerp(right, n)
    }
}

impl Interpolate for Quat {
    #[inline]
    fn interpolate(left: Self, right: Self, n: f32) -> Self {
        left.slerp(right, n)
    }
}

/// A single keyframe: the full local pose of one bone at `time`.
#[derive(Clone, Copy, Debug)]
pub struct TransformKey {
    pub time: f32,
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl TransformKey {
    pub fn new(time: f32) -> Self {
        Self {
            time,
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }
}

impl Interpolate for TransformKey {
    #[inline]
    fn interpolate(left: Self, right: Self, n: f32) -> Self {
        Self {
            time: f32::interpolate(left.time, right.time, n),
            translation: Vec3::interpolate(left.translation, right.translation, n),
            rotation: Quat::interpolate(left.rotation, right.rotation, n),
            scale: Vec3::interpolate(left.scale, right.scale, n),
        }
    }
}

/// Keyframes for a single bone, ordered by time.
#[derive(Clone, Debug, Default)]
pub struct BoneTrack {
    keys: Vec<TransformKey>,
}

impl BoneTrack {
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TransformKey> {
        self.keys.get(index)
    }

    pub fn first(&self) -> Option<&TransformKey> {
        self.keys.first()
    }

    pub fn last(&self) -> Option<&TransformKey> {
        self.keys.last()
    }

    /// Time of the last keyframe.
    pub fn duration(&self) -> f32 {
        self.keys.last().map(|k| k.time).unwrap_or(0.0)
    }

    pub fn insert(&mut self, key: TransformKey) {
        match self
            .keys
            .binary_search_by(|k| k.time.total_cmp(&key.time))
        {
            Ok(i) => self.keys[i] = key,        // last wins
            Err(i) => self.keys.insert(i, key), // keep sorted
        }
    }

    pub fn pop_last(&mut self) -> Option<TransformKey> {
        self.keys.pop()
    }

    /// Interpolated pose at `time`, clamped to the track's span. An empty
    /// track holds the identity pose.
    pub fn sample(&self, time: f32) -> TransformKey {
        let Some(first) = self.keys.first() else {
            return TransformKey::new(time);
        };

        if self.keys.len() == 1 || time <= first.time {
            return *first;
        }
        let last = self.keys[self.keys.len() - 1];
        if time >= last.time {
            return last;
        }

        let i = self.keys.partition_point(|k| k.time <= time);
        let a = self.keys[i - 1];
        let b = self.keys[i];
        let t = ((time - a.time) / (b.time - a.time)).clamp(0.0, 1.0);

        TransformKey::interpolate(a, b, t)
    }
}
