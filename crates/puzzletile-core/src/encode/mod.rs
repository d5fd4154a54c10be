//! Lossless tile encoding.
//!
//! Tiles are written as 8-bit RGB PNG. A lossy format would put compression
//! artifacts along tile edges, which show up as seams once the puzzle is
//! reassembled.
//!
//! # Examples
//!
//! ```ignore
//! use puzzletile_core::encode::{encode_png, PngCompression};
//!
//! let pixels = vec![128u8; 100 * 100 * 3]; // Gray image
//! let png_bytes = encode_png(&pixels, 100, 100, PngCompression::Best).unwrap();
//! println!("Encoded {} bytes", png_bytes.len());
//! ```

mod png;

pub use png::{encode_png, EncodeError, PngCompression, PNG_SIGNATURE};
