use glam::{Mat4, Quat, Vec3};

/// A translation and rotation that can be converted into a 4x4 matrix.
#[derive(Clone, Debug, Default)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Transform {
    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// Create a new transform from a translation.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
        }
    }

    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation,
        }
    }

    /// Map a point from this transform's local space into its parent space.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation * point + self.translation
    }

    /// Compose a rotation onto this transform in local space.
    pub fn rotate(&mut self, rotation: Quat) {
        self.rotation *= rotation;
    }

    /// Move along the transform's own axes.
    pub fn translate_local(&mut self, offset: Vec3) {
        self.translation += self.rotation * offset;
    }

    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.translation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic() {
        let transform = Transform::default().to_mat4();
        assert_eq!(transform, Mat4::IDENTITY);

        let transform = Transform::from_rotation(Quat::from_xyzw(0.0, 0.0, 0.0, 1.0)).to_mat4();
        assert_eq!(transform, Mat4::IDENTITY);

        let transform = Transform::from_translation(Vec3::new(10.0, 8.0, 6.0)).to_mat4();

        let transform = transform * Transform::default().to_mat4();

        assert_eq!(transform, Mat4::from_translation(Vec3::new(10.0, 8.0, 6.0)));
    }

    #[test]
    fn transform_point_applies_rotation_then_translation() {
        let transform = Transform::new(
            Vec3::new(1.0, 0.0, 0.0),
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
        );

        // +Z rotates onto +X, then shifts by one along X.
        let p = transform.transform_point(Vec3::new(0.0, 0.0, 1.0));
        assert!((p - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn rotate_composes_in_local_space() {
        let quarter = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);

        let mut transform = Transform::from_rotation(quarter);
        transform.rotate(quarter);

        let expected = Quat::from_rotation_y(std::f32::consts::PI);
        assert!(transform.rotation.dot(expected).abs() > 1.0 - 1e-5);
    }

    #[test]
    fn translate_local_follows_orientation() {
        let mut transform =
            Transform::from_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        transform.translate_local(Vec3::new(0.0, 0.0, -20.0));

        // Local -Z points along world -X after a quarter turn.
        assert!((transform.translation - Vec3::new(-20.0, 0.0, 0.0)).length() < 1e-4);
    }
}
