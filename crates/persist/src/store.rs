use crate::scene_file::{from_json, to_json};
use cubescape_common::SceneObject;
use std::path::{Path, PathBuf};

/// File name written by `SceneFileStore::save`.
pub const SCENE_FILE_NAME: &str = "scene.json";

/// Errors from loading or saving a scene.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("scene JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Loads and saves the ordered object list.
pub trait Persistence {
    /// `Ok(None)` when nothing was chosen to load.
    fn load(&mut self) -> Result<Option<Vec<SceneObject>>, PersistError>;

    fn save(&mut self, objects: &[SceneObject]) -> Result<(), PersistError>;
}

/// Scene file in a directory: `<dir>/scene.json`.
///
/// An absent file stands in for a cancelled file picker and loads as `None`.
#[derive(Debug, Clone)]
pub struct SceneFileStore {
    root: PathBuf,
}

impl SceneFileStore {
    /// Open the store, creating the directory if needed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, PersistError> {
        let root = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn scene_path(&self) -> PathBuf {
        self.root.join(SCENE_FILE_NAME)
    }

    /// Load an explicit file. Unlike `load`, a missing file is an error.
    pub fn load_path(path: impl AsRef<Path>) -> Result<Vec<SceneObject>, PersistError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let objects = from_json(&text)?;
        tracing::info!(path = %path.display(), count = objects.len(), "scene loaded");
        Ok(objects)
    }
}

impl Persistence for SceneFileStore {
    fn load(&mut self) -> Result<Option<Vec<SceneObject>>, PersistError> {
        let path = self.scene_path();
        if !path.exists() {
            tracing::info!(path = %path.display(), "no scene file; nothing loaded");
            return Ok(None);
        }
        Self::load_path(&path).map(Some)
    }

    fn save(&mut self, objects: &[SceneObject]) -> Result<(), PersistError> {
        let path = self.scene_path();
        std::fs::write(&path, to_json(objects)?)?;
        tracing::info!(path = %path.display(), count = objects.len(), "scene saved");
        Ok(())
    }
}

/// Holds the last saved scene as JSON text in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    text: Option<String>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with raw text, e.g. to exercise parse failures.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl Persistence for MemoryPersistence {
    fn load(&mut self) -> Result<Option<Vec<SceneObject>>, PersistError> {
        self.text.as_deref().map(from_json).transpose()
    }

    fn save(&mut self, objects: &[SceneObject]) -> Result<(), PersistError> {
        self.text = Some(to_json(objects)?);
        Ok(())
    }
}
