use egui::{Pos2, Vec2};

/// Maps a figure's local space to world space: scale, then rotate, then
/// translate.
///
/// Rotation is in degrees and clockwise-positive on screen (y points down),
/// which is the standard rotation matrix applied in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseTransform {
    pub translation: Vec2,
    pub rotation_degrees: f32,
    /// Uniform scale, must be > 0 for `invert` to be defined
    pub scale: f32,
}

impl Default for PoseTransform {
    fn default() -> Self {
        Self {
            translation: Vec2::ZERO,
            rotation_degrees: 0.0,
            scale: 1.0,
        }
    }
}

impl PoseTransform {
    pub fn new(translation: Vec2, rotation_degrees: f32, scale: f32) -> Self {
        Self {
            translation,
            rotation_degrees,
            scale,
        }
    }

    pub fn identity() -> Self {
        Self::default()
    }

    /// Local -> world
    pub fn apply(&self, local: Pos2) -> Pos2 {
        let scaled = local.to_vec2() * self.scale;
        let rotated = rotate(scaled, self.rotation_degrees.to_radians());
        (rotated + self.translation).to_pos2()
    }

    /// World -> local, the exact inverse of [`PoseTransform::apply`].
    pub fn invert(&self, world: Pos2) -> Pos2 {
        let translated = world.to_vec2() - self.translation;
        let rotated = rotate(translated, -self.rotation_degrees.to_radians());
        (rotated / self.scale).to_pos2()
    }
}

fn rotate(v: Vec2, radians: f32) -> Vec2 {
    let (sin, cos) = radians.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Pos2, b: Pos2) {
        assert!((a - b).length() < 0.01, "{a:?} != {b:?}");
    }

    #[test]
    fn test_identity() {
        let t = PoseTransform::identity();
        assert_close(t.apply(Pos2::new(12.0, -3.0)), Pos2::new(12.0, -3.0));
    }

    #[test]
    fn test_rotation_is_clockwise_on_screen() {
        let t = PoseTransform::new(Vec2::ZERO, 90.0, 1.0);
        // +x rotates onto +y, which points down on screen
        assert_close(t.apply(Pos2::new(10.0, 0.0)), Pos2::new(0.0, 10.0));
    }

    #[test]
    fn test_scale_then_rotate_then_translate() {
        let t = PoseTransform::new(Vec2::new(100.0, 50.0), 180.0, 2.0);
        assert_close(t.apply(Pos2::new(5.0, 1.0)), Pos2::new(90.0, 48.0));
    }

    #[test]
    fn test_round_trip() {
        let poses = [
            PoseTransform::new(Vec2::new(400.0, 300.0), 0.0, 1.0),
            PoseTransform::new(Vec2::new(-20.0, 75.5), 37.0, 0.3),
            PoseTransform::new(Vec2::new(800.0, 0.0), 359.0, 3.0),
            PoseTransform::new(Vec2::new(10.0, 10.0), -450.0, 1.7),
        ];
        let points = [
            Pos2::new(0.0, 0.0),
            Pos2::new(-68.0, 40.0),
            Pos2::new(20.0, 115.0),
            Pos2::new(-33.0, -65.0),
        ];

        for pose in poses {
            for point in points {
                assert_close(pose.invert(pose.apply(point)), point);
            }
        }
    }
}
