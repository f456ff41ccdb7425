use cubescape_common::SceneObject;
use glam::{Vec3, Vec3Swizzles};
use std::collections::BTreeSet;
use std::fmt;

/// Scene inspector for developer tooling.
///
/// Provides read-only queries over the ordered object list.
pub struct SceneInspector;

impl SceneInspector {
    /// Produce a summary of the scene.
    pub fn summary(objects: &[SceneObject]) -> SceneSummary {
        let distinct: BTreeSet<[u32; 3]> = objects
            .iter()
            .map(|o| o.position.to_array().map(f32::to_bits))
            .collect();
        let bounds = objects.first().map(|first| {
            objects
                .iter()
                .fold((first.position, first.position), |(lo, hi), o| {
                    (lo.min(o.position), hi.max(o.position))
                })
        });
        SceneSummary {
            object_count: objects.len(),
            distinct_positions: distinct.len(),
            bounds,
        }
    }

    /// Object whose (x, z) centre is closest to `point`, height ignored the
    /// same way the collision field ignores it.
    pub fn nearest(objects: &[SceneObject], point: Vec3) -> Option<NearestObject> {
        objects
            .iter()
            .enumerate()
            .map(|(index, o)| NearestObject {
                index,
                object: *o,
                planar_distance: point.xz().distance(o.position.xz()),
            })
            .min_by(|a, b| a.planar_distance.total_cmp(&b.planar_distance))
    }
}

/// Summary of scene contents for the inspector.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSummary {
    pub object_count: usize,
    /// Objects sharing a position count once here.
    pub distinct_positions: usize,
    /// Min and max object centres.
    pub bounds: Option<(Vec3, Vec3)>,
}

impl fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scene: objects={} distinct_positions={}",
            self.object_count, self.distinct_positions
        )?;
        if let Some((lo, hi)) = self.bounds {
            write!(
                f,
                " bounds=({:.2}, {:.2}, {:.2})..({:.2}, {:.2}, {:.2})",
                lo.x, lo.y, lo.z, hi.x, hi.y, hi.z
            )?;
        }
        Ok(())
    }
}

/// Result of `SceneInspector::nearest`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestObject {
    pub index: usize,
    pub object: SceneObject,
    pub planar_distance: f32,
}

impl fmt::Display for NearestObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.object.position;
        write!(
            f,
            "Nearest [#{}] {} pos=({:.2}, {:.2}, {:.2}) planar_distance={:.2}",
            self.index, self.object.color, p.x, p.y, p.z, self.planar_distance
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubescape_common::Color;

    fn cube(x: f32, y: f32, z: f32) -> SceneObject {
        SceneObject::cube(Color::WHITE, Vec3::new(x, y, z))
    }

    #[test]
    fn summary_empty_scene() {
        let summary = SceneInspector::summary(&[]);
        assert_eq!(summary.object_count, 0);
        assert!(summary.bounds.is_none());
        assert_eq!(summary.to_string(), "Scene: objects=0 distinct_positions=0");
    }

    #[test]
    fn summary_counts_duplicates_once() {
        let objects = [cube(0.0, 0.5, 0.0), cube(0.0, 0.5, 0.0), cube(3.0, 1.5, -2.0)];
        let summary = SceneInspector::summary(&objects);
        assert_eq!(summary.object_count, 3);
        assert_eq!(summary.distinct_positions, 2);
        assert_eq!(
            summary.bounds,
            Some((Vec3::new(0.0, 0.5, -2.0), Vec3::new(3.0, 1.5, 0.0)))
        );
        assert!(summary.to_string().contains("bounds="));
    }

    #[test]
    fn nearest_ignores_height() {
        let objects = [cube(5.0, 0.5, 0.0), cube(1.0, 9.5, 0.0), cube(-3.0, 0.5, 0.0)];
        let hit = SceneInspector::nearest(&objects, Vec3::new(0.0, 1.0, 0.0)).unwrap();
        assert_eq!(hit.index, 1);
        assert_eq!(hit.planar_distance, 1.0);
        assert!(hit.to_string().starts_with("Nearest [#1]"));
    }

    #[test]
    fn nearest_on_empty_scene() {
        assert!(SceneInspector::nearest(&[], Vec3::ZERO).is_none());
    }
}
