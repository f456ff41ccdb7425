use cubescape_common::{CameraPose, SceneObject};
use std::fmt::Write;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer draws exactly what it is given: one camera pose and the scene
/// objects in render order.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&self, pose: &CameraPose, objects: &[SceneObject]) -> Self::Output;
}

/// Text dump of a frame for the CLI and tests.
#[derive(Debug, Clone)]
pub struct DebugTextRenderer {
    /// Objects listed individually before the rest are summarized.
    max_listed: usize,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self { max_listed: 16 }
    }

    pub fn with_limit(max_listed: usize) -> Self {
        Self { max_listed }
    }
}

impl Default for DebugTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, pose: &CameraPose, objects: &[SceneObject]) -> String {
        let mut out = String::new();
        let p = pose.position;
        let _ = writeln!(out, "=== Frame (objects={}) ===", objects.len());
        let _ = writeln!(
            out,
            "Camera: pos=({:.2}, {:.2}, {:.2}) yaw={:.3} pitch={:.3}",
            p.x, p.y, p.z, pose.yaw, pose.pitch
        );
        for o in objects.iter().take(self.max_listed) {
            let q = o.position;
            let _ = writeln!(
                out,
                "  {:?} {} pos=({:.2}, {:.2}, {:.2})",
                o.kind, o.color, q.x, q.y, q.z
            );
        }
        if objects.len() > self.max_listed {
            let _ = writeln!(out, "  ... {} more", objects.len() - self.max_listed);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubescape_common::Color;
    use glam::Vec3;

    fn pose() -> CameraPose {
        CameraPose {
            position: Vec3::new(0.0, 1.0, 8.0),
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    #[test]
    fn empty_scene() {
        let out = DebugTextRenderer::new().render(&pose(), &[]);
        assert!(out.contains("objects=0"));
        assert!(out.contains("pos=(0.00, 1.00, 8.00)"));
    }

    #[test]
    fn lists_objects_in_order() {
        let objects = [
            SceneObject::cube(Color::from_bits(0xff0000), Vec3::new(1.0, 0.5, 0.0)),
            SceneObject::cube(Color::from_bits(0x00ff00), Vec3::new(2.0, 0.5, 0.0)),
        ];
        let out = DebugTextRenderer::new().render(&pose(), &objects);
        let red = out.find("#ff0000").unwrap();
        let green = out.find("#00ff00").unwrap();
        assert!(red < green);
        assert!(out.contains("Cube"));
    }

    #[test]
    fn long_scenes_are_summarized() {
        let objects: Vec<_> = (0..5)
            .map(|i| SceneObject::cube(Color::WHITE, Vec3::new(i as f32, 0.5, 0.0)))
            .collect();
        let out = DebugTextRenderer::with_limit(2).render(&pose(), &objects);
        assert!(out.contains("... 3 more"));
        assert_eq!(out.matches("Cube").count(), 2);
    }
}
