// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Storage port for durable slots and the JSON codec that sits on top of it.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Storage port for raw slot contents (keyed by slot name).
pub trait ConfigStore {
    /// Load the raw bytes of a slot. Returns `NotFound` when the slot is empty.
    fn load_raw(&self, slot: &str) -> Result<Vec<u8>, ConfigError>;
    /// Overwrite a slot with raw bytes.
    fn save_raw(&self, slot: &str, data: &[u8]) -> Result<(), ConfigError>;
}

/// Error type for slot storage operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Slot not present in the store.
    #[error("not found")]
    NotFound,
    /// I/O error while reading/writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON encoding/decoding failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Catch-all error variant.
    #[error("other: {0}")]
    Other(String),
}

/// Encodes values as JSON text and delegates storage to a `ConfigStore`.
#[derive(Debug, Clone)]
pub struct ConfigService<S> {
    store: S,
}

impl<S> ConfigService<S> {
    /// Create a new service using the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S> ConfigService<S>
where
    S: ConfigStore,
{
    /// Load and decode the slot into `T`. Returns `Ok(None)` if the slot is missing or empty.
    pub fn load<T>(&self, slot: &str) -> Result<Option<T>, ConfigError>
    where
        T: DeserializeOwned,
    {
        match self.load_value(slot)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Load the slot as untyped JSON. Returns `Ok(None)` if the slot is missing or empty.
    pub fn load_value(&self, slot: &str) -> Result<Option<Value>, ConfigError> {
        match self.store.load_raw(slot) {
            Ok(bytes) => {
                if bytes.iter().all(u8::is_ascii_whitespace) {
                    return Ok(None);
                }
                Ok(Some(serde_json::from_slice(&bytes)?))
            }
            Err(ConfigError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Encode `value` as compact JSON text and write it to the slot.
    pub fn save<T>(&self, slot: &str, value: &T) -> Result<(), ConfigError>
    where
        T: Serialize,
    {
        let data = serde_json::to_vec(value)?;
        self.store.save_raw(slot, &data)
    }
}
