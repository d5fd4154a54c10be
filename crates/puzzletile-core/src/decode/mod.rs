//! Decoding and orientation normalization.
//!
//! First stage of the tiling pipeline:
//! - Decode any supported raster format (JPEG, PNG, GIF, WebP, BMP)
//! - Apply the EXIF orientation tag so the raster is visually upright
//! - Force the pixel format to 8-bit RGB, dropping alpha
//!
//! # Examples
//!
//! ```ignore
//! use puzzletile_core::decode::{decode_normalized, SourceImage};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_normalized(&SourceImage::new(&bytes)).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod orient;
mod types;

pub use orient::{apply_orientation, decode_normalized, get_orientation};
pub use types::{DecodedImage, Orientation, SourceImage};
