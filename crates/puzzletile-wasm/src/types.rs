//! WASM-compatible wrapper types for tiling output.
//!
//! These types own their data on the Rust side; getters returning bytes copy
//! them into JavaScript memory as a `Uint8Array`.

use puzzletile_core::decode::DecodedImage;
use puzzletile_core::TileSet;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// A decoded RGB image for JavaScript (used for canonical-square previews).
#[wasm_bindgen]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 3 for RGB)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional; wasm-bindgen's finalizer releases the memory otherwise.
    pub fn free(self) {}
}

impl JsDecodedImage {
    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }
}

/// One PNG tile.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsTile {
    row: u32,
    column: u32,
    index: usize,
    bytes: Vec<u8>,
}

#[wasm_bindgen]
impl JsTile {
    #[wasm_bindgen(getter)]
    pub fn row(&self) -> u32 {
        self.row
    }

    #[wasm_bindgen(getter)]
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Row-major index (`row * grid + column`).
    #[wasm_bindgen(getter)]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Stable file name, e.g. `tile_004.png`.
    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        puzzletile_core::tile_name(self.index)
    }

    /// PNG bytes (copied).
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}

/// Plain summary of a tile set, handed to JS as an object.
#[derive(Debug, Serialize)]
pub(crate) struct Manifest {
    pub grid: u32,
    pub tile_edge: u32,
    pub target_size: u32,
    pub names: Vec<String>,
}

/// All tiles of one image, in row-major order.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsTileSet {
    grid: u32,
    tile_edge: u32,
    tiles: Vec<JsTile>,
}

#[wasm_bindgen]
impl JsTileSet {
    #[wasm_bindgen(getter)]
    pub fn grid(&self) -> u32 {
        self.grid
    }

    #[wasm_bindgen(getter)]
    pub fn tile_edge(&self) -> u32 {
        self.tile_edge
    }

    /// Side of the canonical square (`tile_edge * grid`).
    #[wasm_bindgen(getter)]
    pub fn target_size(&self) -> u32 {
        self.tile_edge * self.grid
    }

    /// Number of tiles (`grid * grid`).
    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.tiles.len()
    }

    /// Tile at row-major `index`, or `undefined` when out of range.
    pub fn tile(&self, index: usize) -> Option<JsTile> {
        self.tiles.get(index).cloned()
    }

    /// Tile file names in index order.
    pub fn names(&self) -> js_sys::Array {
        self.tiles
            .iter()
            .map(|t| JsValue::from_str(&t.name()))
            .collect()
    }

    /// `{ grid, tile_edge, target_size, names }` as a plain object.
    pub fn manifest(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.to_manifest()).map_err(JsValue::from)
    }
}

impl JsTileSet {
    pub(crate) fn from_tile_set(set: TileSet) -> Self {
        let grid = set.grid().get();
        let tile_edge = set.tile_edge();
        let tiles = set
            .into_tiles()
            .into_iter()
            .map(|t| JsTile {
                row: t.row,
                column: t.column,
                index: t.index,
                bytes: t.bytes,
            })
            .collect();
        Self {
            grid,
            tile_edge,
            tiles,
        }
    }

    pub(crate) fn to_manifest(&self) -> Manifest {
        Manifest {
            grid: self.grid,
            tile_edge: self.tile_edge,
            target_size: self.target_size(),
            names: self.tiles.iter().map(JsTile::name).collect(),
        }
    }
}
