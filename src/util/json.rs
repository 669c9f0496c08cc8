// src/util/json.rs
//! Small wrappers for reading and writing flat JSON documents (game data,
//! high scores, settings). Writes are not atomic: a crash mid-write can leave
//! a truncated file behind.
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Serializer, Value};

use crate::errors::{ArcadeError, Result};

pub type JsonMap = Map<String, Value>;

/// Loads a JSON object from `path`.
pub fn load(path: impl AsRef<Path>) -> Result<JsonMap> {
    load_as(path)
}

/// Loads any deserializable document from `path`.
pub fn load_as<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ArcadeError::not_found(path));
    }

    let file = File::open(path)?;
    let value = serde_json::from_reader(BufReader::new(file))?;
    Ok(value)
}

/// Writes `data` to `path` as UTF-8, indented JSON, replacing any existing file.
pub fn save(path: impl AsRef<Path>, data: &JsonMap) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);

    let mut serializer = Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
    data.serialize(&mut serializer)?;
    writer.flush()?;

    log::debug!("Saved JSON document to {}", path.display());
    Ok(())
}

/// Loads the object at `path`, sets `key` to `value` and rewrites the whole file.
pub fn set_value(path: impl AsRef<Path>, key: impl Into<String>, value: impl Into<Value>) -> Result<()> {
    let path = path.as_ref();
    let mut data = load(path)?;
    data.insert(key.into(), value.into());
    save(path, &data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        match load(&path) {
            Err(ArcadeError::NotFound { path: reported }) => assert_eq!(reported, path),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn save_writes_four_space_indent_and_raw_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");

        let mut data = JsonMap::new();
        data.insert("name".into(), json!("Pequeño"));
        save(&path, &data).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "{\n    \"name\": \"Pequeño\"\n}");
    }

    #[test]
    fn set_value_on_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");

        assert!(matches!(
            set_value(&path, "score", 10),
            Err(ArcadeError::NotFound { .. })
        ));
        assert!(!path.exists());
    }

    #[test]
    fn malformed_json_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(load(&path), Err(ArcadeError::Json(_))));
    }
}
