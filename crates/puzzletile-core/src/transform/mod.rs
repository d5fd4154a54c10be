//! Geometric selection: exact rectangular crops and the centered square crop.
//!
//! Nothing here resamples. Pixels inside a crop are copied unchanged, so
//! tiles cut from the canonical square reassemble to it exactly.
//!
//! # Coordinate System
//!
//! - Coordinates are integer pixels
//! - Origin is the top-left corner
//! - Regions are half-open: `[left, left + width) x [top, top + height)`

mod crop;

pub use crop::{center_square, crop_exact, square_crop_rect, CropRect, SquareImage};
