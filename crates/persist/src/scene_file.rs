use crate::store::PersistError;
use cubescape_common::SceneObject;

/// Pretty-printed JSON array, two-space indent, in slice order.
pub fn to_json(objects: &[SceneObject]) -> Result<String, PersistError> {
    Ok(serde_json::to_string_pretty(objects)?)
}

/// Parse a scene file. Any malformed entry fails the whole document.
pub fn from_json(text: &str) -> Result<Vec<SceneObject>, PersistError> {
    Ok(serde_json::from_str(text)?)
}
