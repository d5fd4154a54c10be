//! Tile slicing: cut the canonical square into `grid x grid` PNG tiles.
//!
//! Tiles are produced in row-major order. Downstream consumers rebuild the
//! puzzle by index, so `index = row * grid + column` and the file name derived
//! from it are part of the output contract.

use serde::Serialize;
use tracing::debug;

use crate::config::GridSize;
use crate::encode::{encode_png, PngCompression};
use crate::error::{Result, TileError};
use crate::resize::CanonicalSquare;
use crate::storage::{TileAddress, TileStore};
use crate::transform::{crop_exact, CropRect};

/// Stable, lexically sortable file name for tile `index`.
///
/// Three digits cover the largest grid (10x10 = 100 tiles).
pub fn tile_name(index: usize) -> String {
    format!("tile_{index:03}.png")
}

/// Pixel region of the tile at (`row`, `column`).
pub fn tile_rect(row: u32, column: u32, tile_edge: u32) -> CropRect {
    CropRect::new(column * tile_edge, row * tile_edge, tile_edge, tile_edge)
}

/// One encoded tile that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedTile {
    pub row: u32,
    pub column: u32,
    pub index: usize,
    /// PNG bytes.
    pub bytes: Vec<u8>,
}

impl EncodedTile {
    pub fn name(&self) -> String {
        tile_name(self.index)
    }
}

/// A stored tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileDescriptor {
    pub row: u32,
    pub column: u32,
    pub index: usize,
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub address: TileAddress,
}

impl TileDescriptor {
    pub fn name(&self) -> String {
        tile_name(self.index)
    }
}

/// All tiles of one invocation, in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileSet {
    grid: GridSize,
    tile_edge: u32,
    tiles: Vec<TileDescriptor>,
}

impl TileSet {
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    pub fn tile_edge(&self) -> u32 {
        self.tile_edge
    }

    /// Side length of the canonical square the tiles were cut from.
    pub fn target_size(&self) -> u32 {
        self.tile_edge * self.grid.get()
    }

    pub fn tiles(&self) -> &[TileDescriptor] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tile addresses by index.
    pub fn addresses(&self) -> Vec<TileAddress> {
        self.tiles.iter().map(|t| t.address.clone()).collect()
    }

    pub fn into_tiles(self) -> Vec<TileDescriptor> {
        self.tiles
    }
}

/// Crop and encode every tile of `canonical`.
///
/// # Errors
///
/// `TileError::Encode` for the first tile that fails; no tiles are returned
/// in that case.
pub fn encode_tiles(
    canonical: &CanonicalSquare,
    compression: PngCompression,
) -> Result<Vec<EncodedTile>> {
    let grid = canonical.grid().get();
    let tile_edge = canonical.tile_edge();
    let mut tiles = Vec::with_capacity(canonical.grid().tile_count());

    for row in 0..grid {
        for column in 0..grid {
            let index = (row * grid + column) as usize;
            let region = crop_exact(canonical.image(), tile_rect(row, column, tile_edge))?;
            let bytes = encode_png(&region.pixels, region.width, region.height, compression)
                .map_err(|e| TileError::Encode {
                    index,
                    reason: e.to_string(),
                })?;
            tiles.push(EncodedTile {
                row,
                column,
                index,
                bytes,
            });
        }
    }

    Ok(tiles)
}

/// Encode all tiles, then hand them to `store` under `namespace`.
///
/// Encoding finishes for every tile before the first one is stored, so an
/// encode failure leaves nothing behind in the store.
///
/// # Errors
///
/// `TileError::Encode` or `TileError::Storage`; no `TileSet` is returned on
/// failure.
pub fn slice_tiles<S: TileStore + ?Sized>(
    canonical: &CanonicalSquare,
    compression: PngCompression,
    namespace: &str,
    store: &mut S,
) -> Result<TileSet> {
    let encoded = encode_tiles(canonical, compression)?;
    debug!(
        count = encoded.len(),
        bytes = encoded.iter().map(|t| t.bytes.len()).sum::<usize>(),
        "encoded tiles"
    );

    let mut tiles = Vec::with_capacity(encoded.len());
    for tile in encoded {
        let address = store
            .store(namespace, &tile.name(), &tile.bytes)
            .map_err(|source| TileError::Storage {
                index: tile.index,
                source,
            })?;
        tiles.push(TileDescriptor {
            row: tile.row,
            column: tile.column,
            index: tile.index,
            bytes: tile.bytes,
            address,
        });
    }

    Ok(TileSet {
        grid: canonical.grid(),
        tile_edge: canonical.tile_edge(),
        tiles,
    })
}
