use cubescape_common::SceneObject;
use glam::Vec3;

/// An event record produced by every mutation of the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    /// An object was appended at `index`.
    Placed { index: usize, object: SceneObject },
    /// The whole store was cleared and repopulated.
    Replaced { previous: usize, current: usize },
}

/// Ordered collection of placed objects.
///
/// Insertion order is render order and serialization order. Objects are never
/// edited in place: a pass appends, a load replaces everything.
#[derive(Debug, Clone, Default)]
pub struct SceneObjectStore {
    objects: Vec<SceneObject>,
    /// Append-only log of mutations, drained by the host.
    event_log: Vec<SceneEvent>,
}

impl SceneObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SceneObject> {
        self.objects.iter()
    }

    pub fn get(&self, index: usize) -> Option<&SceneObject> {
        self.objects.get(index)
    }

    /// Append one object. Returns its index.
    pub fn place(&mut self, object: SceneObject) -> usize {
        let index = self.objects.len();
        self.objects.push(object);
        self.event_log.push(SceneEvent::Placed { index, object });
        index
    }

    /// Append every object in order. Returns how many were added.
    pub fn extend(&mut self, objects: impl IntoIterator<Item = SceneObject>) -> usize {
        let before = self.objects.len();
        for object in objects {
            self.place(object);
        }
        self.objects.len() - before
    }

    /// Clear the store and repopulate it from `objects`.
    pub fn replace(&mut self, objects: Vec<SceneObject>) {
        let previous = self.objects.len();
        self.objects = objects;
        tracing::debug!(previous, current = self.objects.len(), "scene replaced");
        self.event_log.push(SceneEvent::Replaced {
            previous,
            current: self.objects.len(),
        });
    }

    /// Axis-aligned bounds of all object centres, `None` when empty.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = self.objects.first()?.position;
        Some(self.objects.iter().fold((first, first), |(lo, hi), o| {
            (lo.min(o.position), hi.max(o.position))
        }))
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.event_log)
    }

    pub fn events(&self) -> &[SceneEvent] {
        &self.event_log
    }
}

impl<'a> IntoIterator for &'a SceneObjectStore {
    type Item = &'a SceneObject;
    type IntoIter = std::slice::Iter<'a, SceneObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
