use crate::HostError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Document-level key/value settings storage
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<Value>;

    /// Overwrite the value under `key`
    fn set(&mut self, key: &str, value: Value) -> Result<(), HostError>;

    fn remove(&mut self, key: &str) -> Result<(), HostError>;

    /// Make previous writes durable
    fn flush(&mut self) -> Result<(), HostError>;
}

/// In-memory settings, serialized together with a [`crate::MemoryDocument`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemorySettings {
    values: BTreeMap<String, Value>,

    #[serde(skip)]
    dirty: bool,

    #[serde(skip)]
    flushes: usize,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unflushed writes pending
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of flushes since creation or load
    pub fn flush_count(&self) -> usize {
        self.flushes
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), HostError> {
        self.values.insert(key.to_string(), value);
        self.dirty = true;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), HostError> {
        if self.values.remove(key).is_some() {
            self.dirty = true;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), HostError> {
        self.dirty = false;
        self.flushes += 1;
        Ok(())
    }
}
