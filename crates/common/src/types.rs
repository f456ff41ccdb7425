use glam::{Mat4, Vec2, Vec3};
use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Primitive kinds that can be placed in a scene. Only unit cubes exist today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    #[default]
    Cube,
}

/// 24-bit RGB color, `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color(u32);

impl Color {
    pub const MAX: u32 = 0xFF_FFFF;
    pub const WHITE: Self = Self(Self::MAX);

    /// Build a color from raw bits; anything above 24 bits is dropped.
    pub const fn from_bits(bits: u64) -> Self {
        Self((bits & Self::MAX as u64) as u32)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Linear-ish `[r, g, b]` in `0.0..=1.0` for shader upload.
    pub fn to_rgb_f32(self) -> [f32; 3] {
        [
            ((self.0 >> 16) & 0xff) as f32 / 255.0,
            ((self.0 >> 8) & 0xff) as f32 / 255.0,
            (self.0 & 0xff) as f32 / 255.0,
        ]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.0)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ColorVisitor)
    }
}

/// Accepts any non-negative JSON number. Fractional values are floored, which
/// is how scenes exported with `Math.random() * 0xffffff` colors still load.
struct ColorVisitor;

impl Visitor<'_> for ColorVisitor {
    type Value = Color;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative RGB number")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Color, E> {
        Ok(Color::from_bits(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Color, E> {
        if v < 0 {
            return Err(E::invalid_value(Unexpected::Signed(v), &self));
        }
        Ok(Color::from_bits(v as u64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Color, E> {
        if !v.is_finite() || v < 0.0 {
            return Err(E::invalid_value(Unexpected::Float(v), &self));
        }
        Ok(Color::from_bits(v.floor() as u64))
    }
}

/// A placed primitive. Identity is positional: two objects at the same
/// position are distinct and both collide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    pub color: Color,
    #[serde(with = "xyz")]
    pub position: Vec3,
}

impl SceneObject {
    pub fn cube(color: Color, position: Vec3) -> Self {
        Self {
            kind: ObjectKind::Cube,
            color,
            position,
        }
    }
}

/// `glam::Vec3` serializes as `[x, y, z]`; scene files use `{"x", "y", "z"}`.
mod xyz {
    use glam::Vec3;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Xyz {
        x: f32,
        y: f32,
        z: f32,
    }

    pub fn serialize<S: Serializer>(v: &Vec3, serializer: S) -> Result<S::Ok, S::Error> {
        Xyz {
            x: v.x,
            y: v.y,
            z: v.z,
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec3, D::Error> {
        let p = Xyz::deserialize(deserializer)?;
        Ok(Vec3::new(p.x, p.y, p.z))
    }
}

/// Read-only camera projection of the player, published once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl CameraPose {
    /// View direction including pitch. Yaw 0 looks down -Z.
    pub fn forward(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(-sy * cp, sp, -cy * cp)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), Vec3::Y)
    }
}

/// Input sampled once at the start of a tick.
///
/// `look` is only present when a pointer delta arrived while the look-lock
/// was engaged. `jump` is a one-tick trigger, not a held key.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub look: Option<Vec2>,
}

impl FrameInput {
    pub fn any_direction(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn scene_object_json_shape() {
        let obj = SceneObject::cube(Color::from_bits(0x228b22), Vec3::new(1.0, 0.5, -2.0));
        let json = serde_json::to_value(obj).unwrap();
        assert_eq!(json["type"], "cube");
        assert_eq!(json["color"], 0x228b22);
        assert_eq!(json["position"]["x"], 1.0);
        assert_eq!(json["position"]["y"], 0.5);
        assert_eq!(json["position"]["z"], -2.0);
    }

    #[test]
    fn fractional_color_is_floored() {
        let obj: SceneObject = serde_json::from_str(
            r#"{"type":"cube","color":1234567.891,"position":{"x":0,"y":0.5,"z":0}}"#,
        )
        .unwrap();
        assert_eq!(obj.color.bits(), 1_234_567);
    }

    #[test]
    fn negative_color_rejected() {
        let res: Result<SceneObject, _> = serde_json::from_str(
            r#"{"type":"cube","color":-1,"position":{"x":0,"y":0,"z":0}}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn unknown_kind_rejected() {
        let res: Result<SceneObject, _> = serde_json::from_str(
            r#"{"type":"sphere","color":0,"position":{"x":0,"y":0,"z":0}}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn color_masks_to_24_bits() {
        assert_eq!(Color::from_bits(0x1_00ff_00ff).bits(), 0xff_00ff);
        assert_eq!(Color::WHITE.to_rgb_f32(), [1.0, 1.0, 1.0]);
        assert_eq!(Color::from_bits(0x87ceeb).to_string(), "#87ceeb");
    }

    #[test]
    fn pose_forward_follows_pitch() {
        let level = CameraPose {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
        };
        assert_relative_eq!(level.forward().z, -1.0);

        let up = CameraPose {
            pitch: std::f32::consts::FRAC_PI_4,
            ..level
        };
        assert!(up.forward().y > 0.0);
        assert_relative_eq!(up.forward().length(), 1.0, epsilon = 1e-6);
    }
}
