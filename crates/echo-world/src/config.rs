// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Store configuration and the port it is loaded through.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage port for raw config blobs (keyed by logical name).
///
/// Implementations report a missing key as [`ConfigError::NotFound`], which
/// [`StoreConfig::load`] turns into the default config. Every other error is
/// passed through to the caller.
pub trait ConfigSource {
    /// Load a raw config blob. Returns `NotFound` when missing.
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
}

/// Error type for config operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Key not present in the source.
    #[error("not found")]
    NotFound,
    /// The source could not be read.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    /// Deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// The source rejected the request, e.g. a key it cannot map to storage.
    #[error("other: {0}")]
    Other(String),
}

/// Reads `<key>.json` files from one directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    base: PathBuf,
}

impl DirSource {
    /// Source rooted at `base`. The directory need not exist yet; every key
    /// is then reported as missing.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Directory the blobs are read from.
    pub fn base(&self) -> &Path {
        &self.base
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, ConfigError> {
        let plain = !key.is_empty()
            && key != "."
            && key != ".."
            && !key.contains(['/', '\\']);
        if !plain {
            return Err(ConfigError::Other(format!("invalid config key {key:?}")));
        }
        Ok(self.base.join(format!("{key}.json")))
    }
}

impl ConfigSource for DirSource {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        match fs::read(self.path_for(key)?) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Err(ConfigError::NotFound),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }
}

/// Tunables for one [`ObjectStore`](crate::ObjectStore).
///
/// Missing fields take their defaults, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Name attached to every log event the store emits.
    pub label: String,
    /// Reject poses containing NaN or infinity on add and move.
    pub reject_non_finite_poses: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            label: "world".to_owned(),
            reject_non_finite_poses: true,
        }
    }
}

impl StoreConfig {
    /// Parses a JSON blob.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ConfigError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Serializes to pretty JSON.
    pub fn to_json(&self) -> Result<Vec<u8>, ConfigError> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    /// Loads the config stored under `key`. A missing or empty blob yields
    /// the default config; malformed JSON is an error.
    pub fn load<S>(source: &S, key: &str) -> Result<Self, ConfigError>
    where
        S: ConfigSource + ?Sized,
    {
        match source.load_raw(key) {
            Ok(bytes) if bytes.is_empty() => Ok(Self::default()),
            Ok(bytes) => Self::from_json(&bytes),
            Err(ConfigError::NotFound) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }
}
