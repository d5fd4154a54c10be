//! Crate-level error type for the tiling pipeline.
//!
//! Every variant is invocation-fatal: a failing stage aborts the whole run and
//! no partial tile set is ever returned.

use thiserror::Error;

use crate::storage::StorageError;

pub type Result<T> = std::result::Result<T, TileError>;

/// Errors produced while turning an image into puzzle tiles.
#[derive(Debug, Error)]
pub enum TileError {
    /// The input bytes are not a decodable raster image.
    #[error("Failed to decode image: {0}")]
    Decode(String),

    /// The image decoded but its color model cannot be reduced to RGB.
    #[error("Unsupported color format: {0}")]
    UnsupportedFormat(String),

    /// The decoded raster has no pixels.
    #[error("Image has zero size: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    /// Grid size outside the accepted range.
    #[error(
        "Invalid grid size {0}: must be between {min} and {max}",
        min = crate::config::MIN_GRID,
        max = crate::config::MAX_GRID
    )]
    InvalidGrid(u32),

    /// Configured tile edge is unusable.
    #[error("Invalid tile edge {0}: must be greater than zero")]
    InvalidTileEdge(u32),

    /// A crop rectangle reaches outside its source raster.
    #[error(
        "Crop region {width}x{height} at ({left}, {top}) exceeds {source_width}x{source_height} image"
    )]
    RegionOutOfBounds {
        left: u32,
        top: u32,
        width: u32,
        height: u32,
        source_width: u32,
        source_height: u32,
    },

    /// A tile failed to encode to PNG.
    #[error("Failed to encode tile {index}: {reason}")]
    Encode { index: usize, reason: String },

    /// The storage collaborator refused a tile.
    #[error("Failed to store tile {index}: {source}")]
    Storage {
        index: usize,
        #[source]
        source: StorageError,
    },
}
