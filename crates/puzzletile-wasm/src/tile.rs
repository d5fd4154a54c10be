//! Tiling WASM bindings.
//!
//! Lets the browser cut a puzzle locally, e.g. to preview tiles before
//! uploading. Tiles are kept in memory and returned to JavaScript.
//!
//! # Example
//!
//! ```typescript
//! import { tile_image, tile_image_with_config } from '@puzzletile/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const set = tile_image(bytes, 4);
//! for (let i = 0; i < set.length; i++) {
//!   const tile = set.tile(i);
//!   const url = URL.createObjectURL(new Blob([tile.bytes()], { type: 'image/png' }));
//! }
//!
//! // Smaller tiles for a quick preview
//! const preview = tile_image_with_config(bytes, 4, { tile_edge: 64, compression: 'fast' });
//! ```

use crate::types::{JsDecodedImage, JsTileSet};
use puzzletile_core::{MemoryStore, SourceImage, TileError, Tiler, TilingConfig};
use wasm_bindgen::prelude::*;

/// Namespace used for the throwaway in-memory store.
const PREVIEW_NAMESPACE: &str = "preview";

fn run_tiler(bytes: &[u8], grid: u32, config: TilingConfig) -> Result<JsTileSet, TileError> {
    let mut store = MemoryStore::new();
    Tiler::new(config)
        .run(&SourceImage::new(bytes), grid, PREVIEW_NAMESPACE, &mut store)
        .map(JsTileSet::from_tile_set)
}

fn parse_config(config: JsValue) -> Result<TilingConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(TilingConfig::default());
    }
    serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Invalid tiling config: {e}")))
}

fn to_js_error(err: TileError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Cut an image into `grid x grid` PNG tiles with the default settings.
///
/// # Errors
///
/// Throws if the grid is outside 2..=10 or the bytes are not a decodable image.
#[wasm_bindgen]
pub fn tile_image(bytes: &[u8], grid: u32) -> Result<JsTileSet, JsValue> {
    run_tiler(bytes, grid, TilingConfig::default()).map_err(to_js_error)
}

/// Cut an image into tiles using a config object
/// (`{ tile_edge?, filter?, compression? }`).
#[wasm_bindgen]
pub fn tile_image_with_config(
    bytes: &[u8],
    grid: u32,
    config: JsValue,
) -> Result<JsTileSet, JsValue> {
    let config = parse_config(config)?;
    run_tiler(bytes, grid, config).map_err(to_js_error)
}

/// Decode, orient, crop and resize without slicing.
///
/// Returns the canonical square the tiles would be cut from.
#[wasm_bindgen]
pub fn canonical_square(bytes: &[u8], grid: u32) -> Result<JsDecodedImage, JsValue> {
    Tiler::default()
        .canonical(&SourceImage::new(bytes), grid)
        .map(|c| JsDecodedImage::from_decoded(c.into_image()))
        .map_err(to_js_error)
}

/// File name of the tile at `index` (`tile_000.png` ...).
#[wasm_bindgen]
pub fn tile_name(index: usize) -> String {
    puzzletile_core::tile_name(index)
}

/// Tests that run on native targets.
///
/// Functions returning `Result<T, JsValue>` only work on wasm32, so these go
/// through the plain-Rust helpers.
#[cfg(test)]
mod tests {
    use super::*;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([x as u8, y as u8, 200])
        });
        let mut bytes = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut bytes, image::ImageFormat::Png)
            .unwrap();
        bytes.into_inner()
    }

    #[test]
    fn test_run_tiler_counts() {
        let set = run_tiler(&png(30, 50), 3, TilingConfig::new().with_tile_edge(5)).unwrap();
        assert_eq!(set.length(), 9);
        assert_eq!(set.target_size(), 15);
    }

    #[test]
    fn test_run_tiler_rejects_grid() {
        let result = run_tiler(&png(10, 10), 11, TilingConfig::new().with_tile_edge(5));
        assert!(matches!(result, Err(TileError::InvalidGrid(11))));
    }

    #[test]
    fn test_run_tiler_rejects_garbage() {
        let result = run_tiler(&[1, 2, 3], 2, TilingConfig::default());
        assert!(matches!(result, Err(TileError::Decode(_))));
    }

    #[test]
    fn test_run_tiler_rejects_oversized_tile_edge() {
        let config = TilingConfig::new().with_tile_edge(puzzletile_core::MAX_TILE_EDGE + 1);
        let result = run_tiler(&png(10, 10), 10, config);
        assert!(matches!(result, Err(TileError::InvalidTileEdge(_))));
    }

    #[test]
    fn test_tile_name_binding() {
        assert_eq!(tile_name(12), "tile_012.png");
    }
}
