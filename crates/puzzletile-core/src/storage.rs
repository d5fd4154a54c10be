//! Artifact storage for encoded tiles.
//!
//! The pipeline never decides where tiles live. It hands each encoded tile to
//! a [`TileStore`] together with a namespace (one per puzzle) and the tile's
//! stable file name, and records whatever address the store returns.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Caller-visible location of a stored tile (relative path or URL).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileAddress(String);

impl TileAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for TileAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Namespace or tile name cannot be used as a single path segment.
    #[error("Invalid storage path segment: {0:?}")]
    InvalidNamespace(String),

    /// Something was already stored at this address.
    #[error("Tile already stored at {0}")]
    Duplicate(String),
}

/// Destination for encoded tiles.
pub trait TileStore {
    /// Persist `bytes` as `name` inside `namespace` and return its address.
    fn store(&mut self, namespace: &str, name: &str, bytes: &[u8])
        -> Result<TileAddress, StorageError>;
}

impl<S: TileStore + ?Sized> TileStore for &mut S {
    fn store(
        &mut self,
        namespace: &str,
        name: &str,
        bytes: &[u8],
    ) -> Result<TileAddress, StorageError> {
        (**self).store(namespace, name, bytes)
    }
}

/// Reject anything that is not exactly one normal path segment.
fn validate_segment(segment: &str) -> Result<(), StorageError> {
    let mut components = Path::new(segment).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !segment.contains(['/', '\\']) => Ok(()),
        _ => Err(StorageError::InvalidNamespace(segment.to_string())),
    }
}

/// Writes tiles to `<root>/<namespace>/<name>` on the local filesystem.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
    public_base: Option<String>,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            public_base: None,
        }
    }

    /// Prefix returned addresses with a public URL, e.g. `https://host/static`.
    pub fn with_public_base(mut self, base: impl Into<String>) -> Self {
        let base = base.into();
        self.public_base = Some(base.trim_end_matches('/').to_string());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn address_for(&self, namespace: &str, name: &str) -> TileAddress {
        match &self.public_base {
            Some(base) => TileAddress(format!("{base}/{namespace}/{name}")),
            None => TileAddress(format!("{namespace}/{name}")),
        }
    }
}

impl TileStore for DirectoryStore {
    fn store(
        &mut self,
        namespace: &str,
        name: &str,
        bytes: &[u8],
    ) -> Result<TileAddress, StorageError> {
        validate_segment(namespace)?;
        validate_segment(name)?;

        let dir = self.root.join(namespace);
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            path: dir.clone(),
            source,
        })?;

        let path = dir.join(name);
        fs::write(&path, bytes).map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), len = bytes.len(), "stored tile");

        Ok(self.address_for(namespace, name))
    }
}

/// Keeps tiles in memory, keyed by `<namespace>/<name>`.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    tiles: BTreeMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, address: &TileAddress) -> Option<&[u8]> {
        self.tiles.get(address.as_str()).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// All stored addresses in lexical order.
    pub fn addresses(&self) -> impl Iterator<Item = TileAddress> + '_ {
        self.tiles.keys().cloned().map(TileAddress)
    }
}

impl TileStore for MemoryStore {
    fn store(
        &mut self,
        namespace: &str,
        name: &str,
        bytes: &[u8],
    ) -> Result<TileAddress, StorageError> {
        validate_segment(namespace)?;
        validate_segment(name)?;
        let key = format!("{namespace}/{name}");
        if self.tiles.contains_key(&key) {
            return Err(StorageError::Duplicate(key));
        }
        self.tiles.insert(key.clone(), bytes.to_vec());
        Ok(TileAddress(key))
    }
}
