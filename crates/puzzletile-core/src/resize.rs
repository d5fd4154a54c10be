//! Canonical resizing of the square crop.
//!
//! The square is scaled uniformly to `tile_edge * grid` pixels per side, so
//! the canonical square always divides into whole tiles.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{GridSize, TilingConfig};
use crate::decode::DecodedImage;
use crate::error::{Result, TileError};
use crate::transform::SquareImage;

/// Resampling filter for the canonical resize.
///
/// Only smoothing filters are offered; nearest-neighbour would alias badly
/// on the large up/down scales puzzle photos go through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResampleFilter {
    /// Catmull-Rom cubic (sharp, moderately fast).
    CatmullRom,
    /// Gaussian (soft).
    Gaussian,
    /// Lanczos with window 3 (highest quality).
    #[default]
    Lanczos3,
}

impl ResampleFilter {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            ResampleFilter::CatmullRom => image::imageops::FilterType::CatmullRom,
            ResampleFilter::Gaussian => image::imageops::FilterType::Gaussian,
            ResampleFilter::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// The resized square, carrying the geometry the slicer relies on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalSquare {
    image: DecodedImage,
    grid: GridSize,
    tile_edge: u32,
}

impl CanonicalSquare {
    pub fn image(&self) -> &DecodedImage {
        &self.image
    }

    pub fn into_image(self) -> DecodedImage {
        self.image
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    pub fn tile_edge(&self) -> u32 {
        self.tile_edge
    }

    /// Side length in pixels (`tile_edge * grid`).
    pub fn target_size(&self) -> u32 {
        self.image.width
    }
}

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `TileError::EmptyImage` if either target dimension is zero.
pub fn resize_exact(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: ResampleFilter,
) -> Result<DecodedImage> {
    if width == 0 || height == 0 {
        return Err(TileError::EmptyImage { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| TileError::Decode("pixel buffer does not match dimensions".to_string()))?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());
    Ok(DecodedImage::from_rgb_image(resized))
}

/// Scale the square crop to its canonical `tile_edge * grid` size.
///
/// `grid` is re-validated here so a bad value never reaches the slicer.
///
/// # Errors
///
/// `TileError::InvalidGrid` for a grid outside `MIN_GRID..=MAX_GRID`,
/// `TileError::InvalidTileEdge` for a tile edge outside `1..=MAX_TILE_EDGE`.
pub fn resize_canonical(
    square: &SquareImage,
    grid: u32,
    config: &TilingConfig,
) -> Result<CanonicalSquare> {
    let grid = GridSize::new(grid)?;
    let target_size = config.target_size(grid)?;
    debug!(
        side = square.side(),
        target_size,
        grid = grid.get(),
        filter = ?config.filter,
        "canonical resize"
    );

    let image = resize_exact(square.as_image(), target_size, target_size, config.filter)?;
    Ok(CanonicalSquare {
        image,
        grid,
        tile_edge: config.tile_edge,
    })
}
