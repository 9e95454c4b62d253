//! Album catalog providers.
//!
//! The tracker consumes the catalog once at startup through
//! [`AlbumProvider`]. Two providers ship with the crate: an in-memory one
//! and a file-backed one that reads JSON or bincode.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::album::Album;
use crate::errors::{CatalogError, Result};

/// Source of the immutable album definition.
pub trait AlbumProvider {
    /// Load the album. Called once per tracker.
    fn album(&self) -> Result<Album>;
}

/// Provider over an album that is already in memory.
#[derive(Clone, Debug)]
pub struct StaticAlbumProvider {
    album: Album,
}

impl StaticAlbumProvider {
    #[must_use]
    pub fn new(album: Album) -> Self {
        Self { album }
    }
}

impl AlbumProvider for StaticAlbumProvider {
    fn album(&self) -> Result<Album> {
        Ok(self.album.clone())
    }
}

/// On-disk catalog encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogFormat {
    /// `.json`
    Json,
    /// `.bin`, bincode-encoded `AlbumDefinition`
    Bincode,
}

impl CatalogFormat {
    /// Infer the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(Self::Json),
            "bin" => Some(Self::Bincode),
            _ => None,
        }
    }

    /// Decode an album from raw bytes.
    pub fn decode(self, bytes: &[u8]) -> std::result::Result<Album, CatalogError> {
        match self {
            Self::Json => Ok(serde_json::from_slice(bytes)?),
            Self::Bincode => Ok(bincode::deserialize(bytes)?),
        }
    }

    /// Encode an album to raw bytes.
    pub fn encode(self, album: &Album) -> std::result::Result<Vec<u8>, CatalogError> {
        match self {
            Self::Json => Ok(serde_json::to_vec_pretty(album)?),
            Self::Bincode => Ok(bincode::serialize(album)?),
        }
    }
}

/// Provider that reads the album from a catalog file.
#[derive(Clone, Debug)]
pub struct FileAlbumProvider {
    path: PathBuf,
    format: CatalogFormat,
}

impl FileAlbumProvider {
    /// Create a provider, inferring the format from the extension.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let format = CatalogFormat::from_path(&path)
            .ok_or_else(|| CatalogError::UnsupportedFormat(path.clone()))?;
        Ok(Self { path, format })
    }

    /// Create a provider with an explicit format.
    #[must_use]
    pub fn with_format(path: impl Into<PathBuf>, format: CatalogFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AlbumProvider for FileAlbumProvider {
    fn album(&self) -> Result<Album> {
        let bytes = fs::read(&self.path).map_err(|source| CatalogError::Io {
            path: self.path.clone(),
            source,
        })?;
        let album = self.format.decode(&bytes)?;
        debug!(path = %self.path.display(), album = %album.id(), cards = album.len(), "Loaded album catalog");
        Ok(album)
    }
}
