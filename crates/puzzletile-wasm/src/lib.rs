//! Puzzletile WASM - WebAssembly bindings for the tiling pipeline
//!
//! Exposes `puzzletile-core` to JavaScript/TypeScript so a browser can cut a
//! puzzle locally.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for tiles and images
//! - `tile` - Tiling bindings (full pipeline, canonical preview, tile naming)
//!
//! # Usage
//!
//! ```typescript
//! import init, { tile_image } from '@puzzletile/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const set = tile_image(bytes, 3);
//! console.log(`${set.length} tiles of ${set.tile_edge}px`);
//! ```

use wasm_bindgen::prelude::*;

mod tile;
mod types;

pub use tile::{canonical_square, tile_image, tile_image_with_config, tile_name};
pub use types::{JsDecodedImage, JsTile, JsTileSet};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Largest accepted grid, for building difficulty pickers.
#[wasm_bindgen]
pub fn max_grid() -> u32 {
    puzzletile_core::MAX_GRID
}

/// Smallest accepted grid.
#[wasm_bindgen]
pub fn min_grid() -> u32 {
    puzzletile_core::MIN_GRID
}
