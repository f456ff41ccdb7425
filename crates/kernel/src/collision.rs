use crate::scene::SceneObjectStore;
use cubescape_common::{MotionConfig, ObjectKind, SceneObject};
use glam::{Vec3, Vec3Swizzles};

/// Answers whether a candidate camera position is blocked.
///
/// Every cube is treated as an infinitely tall cylinder of radius
/// `cube_half_extent + player_radius` around its (x, z) centre, so height is
/// ignored entirely. The ground plane blocks anything below eye height.
/// Queries are a linear scan; there is no broad phase.
#[derive(Debug, Clone, Copy)]
pub struct CollisionField<'a> {
    objects: &'a [SceneObject],
    reach: f32,
    ground: f32,
}

impl<'a> CollisionField<'a> {
    pub fn new(scene: &'a SceneObjectStore, config: &MotionConfig) -> Self {
        Self::from_objects(scene.objects(), config)
    }

    pub fn from_objects(objects: &'a [SceneObject], config: &MotionConfig) -> Self {
        Self {
            objects,
            reach: config.cube_half_extent + config.player_radius,
            ground: config.eye_height,
        }
    }

    /// Planar distance below which a cube blocks.
    pub fn reach(&self) -> f32 {
        self.reach
    }

    /// Lowest unblocked camera height.
    pub fn ground(&self) -> f32 {
        self.ground
    }

    pub fn blocked(&self, candidate: Vec3) -> bool {
        self.blocking_object(candidate).is_some() || candidate.y < self.ground
    }

    /// First cube horizontally overlapping `candidate`, in store order.
    pub fn blocking_object(&self, candidate: Vec3) -> Option<&'a SceneObject> {
        let at = candidate.xz();
        self.objects.iter().find(|o| {
            o.kind == ObjectKind::Cube && at.distance(o.position.xz()) < self.reach
        })
    }
}
