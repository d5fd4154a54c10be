//! The four-stage tiling pipeline.
//!
//! decode + orient -> center square -> canonical resize -> slice + encode.
//! Each stage consumes the previous stage's output and nothing is shared
//! between invocations, so callers may run many invocations concurrently.

use tracing::info;

use crate::config::{GridSize, TilingConfig};
use crate::decode::{decode_normalized, SourceImage};
use crate::error::Result;
use crate::resize::{resize_canonical, CanonicalSquare};
use crate::slice::{slice_tiles, TileSet};
use crate::storage::{TileAddress, TileStore};
use crate::transform::center_square;

/// Tiling pipeline bound to one configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tiler {
    config: TilingConfig,
}

impl Tiler {
    pub fn new(config: TilingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TilingConfig {
        &self.config
    }

    /// Run the first three stages and return the canonical square.
    pub fn canonical(&self, source: &SourceImage<'_>, grid: u32) -> Result<CanonicalSquare> {
        let grid = GridSize::new(grid)?;
        self.config.validate()?;

        let decoded = decode_normalized(source)?;
        let square = center_square(decoded)?;
        resize_canonical(&square, grid.get(), &self.config)
    }

    /// Run the whole pipeline, storing tiles under `namespace`.
    ///
    /// # Errors
    ///
    /// Any stage failure aborts the run; see [`crate::TileError`].
    pub fn run<S: TileStore + ?Sized>(
        &self,
        source: &SourceImage<'_>,
        grid: u32,
        namespace: &str,
        store: &mut S,
    ) -> Result<TileSet> {
        let canonical = self.canonical(source, grid)?;
        let set = slice_tiles(&canonical, self.config.compression, namespace, store)?;

        info!(
            source = source.display_name(),
            namespace,
            grid = set.grid().get(),
            tile_edge = set.tile_edge(),
            tiles = set.len(),
            "tiled image"
        );
        Ok(set)
    }
}

/// Tile `image_bytes` into a `grid x grid` puzzle with the default config.
///
/// Returns the tile addresses in row-major order.
pub fn tile<S: TileStore + ?Sized>(
    image_bytes: &[u8],
    grid: u32,
    namespace: &str,
    store: &mut S,
) -> Result<Vec<TileAddress>> {
    Tiler::default()
        .run(&SourceImage::new(image_bytes), grid, namespace, store)
        .map(|set| set.addresses())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
