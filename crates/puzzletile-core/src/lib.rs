//! Puzzletile Core - image tiling for sliding/jigsaw puzzles
//!
//! Turns an uploaded photo into an `N x N` grid of equally sized PNG tiles:
//!
//! 1. Decode, apply the EXIF orientation, force RGB ([`decode`])
//! 2. Crop the centered square ([`transform`])
//! 3. Resize to `tile_edge * grid` pixels per side ([`resize`])
//! 4. Cut into tiles in row-major order and store them ([`slice`], [`storage`])
//!
//! The pipeline is synchronous and holds no state between invocations.
//! Content moderation and storage are supplied by the caller through the
//! [`ImageModerator`] and [`TileStore`] traits.
//!
//! # Examples
//!
//! ```ignore
//! use puzzletile_core::{tile, DirectoryStore};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let mut store = DirectoryStore::new("storage");
//! let addresses = tile(&bytes, 4, "puzzle-42", &mut store).unwrap();
//! assert_eq!(addresses.len(), 16);
//! ```

pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod moderation;
pub mod pipeline;
pub mod resize;
pub mod slice;
pub mod storage;
pub mod transform;

#[cfg(test)]
mod test_support;

pub use config::{
    GridSize, TilingConfig, DEFAULT_GRID, DEFAULT_TILE_EDGE, MAX_GRID, MAX_TILE_EDGE, MIN_GRID,
};
pub use decode::{DecodedImage, SourceImage};
pub use error::{Result, TileError};
pub use moderation::{tile_if_approved, AllowAll, GateError, ImageModerator, ModerationVerdict};
pub use pipeline::{tile, Tiler};
pub use resize::{CanonicalSquare, ResampleFilter};
pub use slice::{tile_name, TileDescriptor, TileSet};
pub use storage::{DirectoryStore, MemoryStore, StorageError, TileAddress, TileStore};
