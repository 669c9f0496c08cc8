// src/game/config.rs
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::Result;
use crate::util::json::{self, JsonMap};

/// Settings handed to [`GameModule::initialize`](super::GameModule::initialize).
///
/// A plain JSON object, usually read from the game's data file by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameConfig {
    values: JsonMap,
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from(json::load(path)?))
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    /// Integers are accepted as floats.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_map(&self) -> &JsonMap {
        &self.values
    }
}

impl From<JsonMap> for GameConfig {
    fn from(values: JsonMap) -> Self {
        Self { values }
    }
}
