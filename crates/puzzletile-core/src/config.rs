//! Pipeline configuration and grid validation.

use serde::{Deserialize, Serialize};

use crate::encode::PngCompression;
use crate::error::{Result, TileError};
use crate::resize::ResampleFilter;

/// Smallest accepted grid (tiles per side).
pub const MIN_GRID: u32 = 2;

/// Largest accepted grid (tiles per side).
pub const MAX_GRID: u32 = 10;

/// Grid used by callers that do not pick a difficulty.
pub const DEFAULT_GRID: u32 = 3;

/// Default edge length of one tile, in pixels.
pub const DEFAULT_TILE_EDGE: u32 = 256;

/// Largest accepted tile edge, in pixels. Keeps the canonical square at most
/// `MAX_TILE_EDGE * MAX_GRID` pixels per side.
pub const MAX_TILE_EDGE: u32 = 1024;

/// Number of tiles per side of the puzzle, validated to `MIN_GRID..=MAX_GRID`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct GridSize(u32);

impl GridSize {
    /// Validate a raw grid value. Out-of-range values are rejected, never clamped.
    pub fn new(grid: u32) -> Result<Self> {
        if (MIN_GRID..=MAX_GRID).contains(&grid) {
            Ok(Self(grid))
        } else {
            Err(TileError::InvalidGrid(grid))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Total number of tiles (`grid * grid`).
    pub fn tile_count(self) -> usize {
        (self.0 * self.0) as usize
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self(DEFAULT_GRID)
    }
}

impl TryFrom<u32> for GridSize {
    type Error = TileError;

    fn try_from(value: u32) -> Result<Self> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for GridSize {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = u32::deserialize(deserializer)?;
        GridSize::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Tunables for the tiling pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TilingConfig {
    /// Edge length of each tile in pixels. The canonical square is
    /// `tile_edge * grid` pixels wide. Higher values (320, 384) keep more detail.
    pub tile_edge: u32,
    /// Filter used when scaling the square crop to its canonical size.
    pub filter: ResampleFilter,
    /// PNG compression effort for tile output. Always lossless.
    pub compression: PngCompression,
}

impl Default for TilingConfig {
    fn default() -> Self {
        Self {
            tile_edge: DEFAULT_TILE_EDGE,
            filter: ResampleFilter::default(),
            compression: PngCompression::default(),
        }
    }
}

impl TilingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the tile edge length.
    pub fn with_tile_edge(mut self, tile_edge: u32) -> Self {
        self.tile_edge = tile_edge;
        self
    }

    /// Check the configuration before running the pipeline.
    ///
    /// # Errors
    ///
    /// `TileError::InvalidTileEdge` for a tile edge outside `1..=MAX_TILE_EDGE`.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_TILE_EDGE).contains(&self.tile_edge) {
            return Err(TileError::InvalidTileEdge(self.tile_edge));
        }
        Ok(())
    }

    /// Side length of the canonical square for `grid`.
    ///
    /// # Errors
    ///
    /// `TileError::InvalidTileEdge` if the config does not validate.
    pub fn target_size(&self, grid: GridSize) -> Result<u32> {
        self.validate()?;
        self.tile_edge
            .checked_mul(grid.get())
            .ok_or(TileError::InvalidTileEdge(self.tile_edge))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_bounds() {
        assert!(matches!(GridSize::new(1), Err(TileError::InvalidGrid(1))));
        assert!(matches!(GridSize::new(11), Err(TileError::InvalidGrid(11))));
        assert!(matches!(GridSize::new(0), Err(TileError::InvalidGrid(0))));
        assert_eq!(GridSize::new(2).unwrap().get(), 2);
        assert_eq!(GridSize::new(10).unwrap().get(), 10);
    }

    #[test]
    fn test_grid_tile_count() {
        assert_eq!(GridSize::new(4).unwrap().tile_count(), 16);
        assert_eq!(GridSize::new(10).unwrap().tile_count(), 100);
    }

    #[test]
    fn test_grid_default() {
        assert_eq!(GridSize::default().get(), DEFAULT_GRID);
    }

    #[test]
    fn test_config_defaults() {
        let config = TilingConfig::new();
        assert_eq!(config.tile_edge, 256);
        assert_eq!(config.filter, ResampleFilter::Lanczos3);
        assert_eq!(config.compression, PngCompression::Best);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_zero_tile_edge_rejected() {
        let config = TilingConfig::new().with_tile_edge(0);
        assert!(matches!(config.validate(), Err(TileError::InvalidTileEdge(0))));
    }

    #[test]
    fn test_config_tile_edge_upper_bound() {
        assert!(TilingConfig::new().with_tile_edge(MAX_TILE_EDGE).validate().is_ok());
        let config = TilingConfig::new().with_tile_edge(MAX_TILE_EDGE + 1);
        assert!(matches!(
            config.validate(),
            Err(TileError::InvalidTileEdge(edge)) if edge == MAX_TILE_EDGE + 1
        ));
    }

    #[test]
    fn test_target_size_rejects_huge_tile_edge() {
        let grid = GridSize::new(MAX_GRID).unwrap();
        let config = TilingConfig::new().with_tile_edge(u32::MAX / 4);
        assert!(matches!(config.target_size(grid), Err(TileError::InvalidTileEdge(_))));

        let largest = TilingConfig::new().with_tile_edge(MAX_TILE_EDGE);
        assert_eq!(largest.target_size(grid).unwrap(), MAX_TILE_EDGE * MAX_GRID);
    }

    #[test]
    fn test_target_size_is_multiple_of_grid() {
        let config = TilingConfig::new();
        for grid in MIN_GRID..=MAX_GRID {
            let grid = GridSize::new(grid).unwrap();
            let target = config.target_size(grid).unwrap();
            assert_eq!(target % grid.get(), 0);
            assert_eq!(target / grid.get(), DEFAULT_TILE_EDGE);
        }
    }
}
