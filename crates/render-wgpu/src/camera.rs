use cubescape_common::CameraPose;
use glam::Mat4;

/// Perspective projection for the player camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y: 75.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Projection {
    /// Track the surface size. Zero-sized surfaces keep the previous aspect.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self, pose: &CameraPose) -> Mat4 {
        self.matrix() * pose.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::{Vec3, Vec4};

    fn spawn_pose() -> CameraPose {
        CameraPose {
            position: Vec3::new(0.0, 1.0, 8.0),
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    #[test]
    fn point_ahead_lands_mid_screen() {
        let vp = Projection::default().view_projection(&spawn_pose());
        let clip = vp * Vec4::new(0.0, 1.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert_relative_eq!(ndc.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(ndc.y, 0.0, epsilon = 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn point_behind_is_clipped() {
        let vp = Projection::default().view_projection(&spawn_pose());
        let clip = vp * Vec4::new(0.0, 1.0, 20.0, 1.0);
        assert!(clip.w < 0.0);
    }

    #[test]
    fn viewport_resize_updates_aspect() {
        let mut p = Projection::default();
        p.set_viewport(800, 400);
        assert_eq!(p.aspect, 2.0);
        p.set_viewport(0, 400);
        assert_eq!(p.aspect, 2.0);
    }
}
